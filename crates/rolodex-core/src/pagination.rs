//! Page-window arithmetic for `GET /contact`.
//!
//! The store is asked for `page_size * page` hits and the last `page_size` of
//! them are returned. A page size of zero means "everything the store gives
//! back", in which case `page` is ignored.

use crate::{Error, Result};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A validated `pageSize` / `page` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page_size: usize,
  page:      usize,
}

impl Default for PageRequest {
  fn default() -> Self {
    Self {
      page_size: DEFAULT_PAGE_SIZE,
      page:      1,
    }
  }
}

impl PageRequest {
  /// Build a request from raw query-string values. Empty strings count as
  /// absent. `page` requires an explicit `page_size`.
  pub fn from_params(
    page_size: Option<&str>,
    page: Option<&str>,
  ) -> Result<Self> {
    let page_size = non_empty(page_size);
    let page = non_empty(page);

    let request = match (page_size, page) {
      (None, Some(_)) => {
        return Err(Error::Pagination("page requires pageSize"));
      }
      (None, None) => Self::default(),
      (Some(size), page) => {
        let page_size = size.trim().parse::<usize>().map_err(|_| {
          Error::Pagination("pageSize must be a non-negative integer")
        })?;
        let page = match page {
          Some(p) => p.trim().parse::<usize>().map_err(|_| {
            Error::Pagination("page must be a positive integer")
          })?,
          None => 1,
        };
        Self::new(page_size, page)?
      }
    };
    Ok(request)
  }

  /// Build a request from numbers. `page` is 1-based.
  pub fn new(page_size: usize, page: usize) -> Result<Self> {
    if page_size == 0 {
      return Ok(Self { page_size, page: 1 });
    }
    if page == 0 {
      return Err(Error::Pagination("page must be at least 1"));
    }
    if page_size.checked_mul(page).is_none() {
      return Err(Error::Pagination("pageSize * page is too large"));
    }
    Ok(Self { page_size, page })
  }

  /// A request that returns every hit the store yields.
  pub fn all() -> Self { Self { page_size: 0, page: 1 } }

  pub fn page_size(&self) -> usize { self.page_size }

  pub fn page(&self) -> usize { self.page }

  /// How many hits to ask the store for; `None` means no limit.
  pub fn fetch_limit(&self) -> Option<usize> {
    // Overflow is rejected in `new`.
    (self.page_size != 0).then(|| self.page_size * self.page)
  }

  /// Cut the requested window out of a batch fetched with
  /// [`Self::fetch_limit`]. Short batches yield a short or empty page.
  pub fn window<T>(&self, hits: Vec<T>) -> Vec<T> {
    if self.page_size == 0 {
      return hits;
    }
    hits
      .into_iter()
      .skip(self.page_size * (self.page - 1))
      .take(self.page_size)
      .collect()
  }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.is_empty())
}
