//! Pagination request/response value objects shared by list queries.

use serde::{Deserialize, Serialize};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on rows per page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page selection for list queries. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Pagination {
    /// Creates a page selection, clamping out-of-range values.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }.normalized()
    }

    /// Clamps page to >= 1 and page size to `1..=MAX_PAGE_SIZE`.
    pub fn normalized(self) -> Self {
        let page = self.page.max(1);
        let page_size = match self.page_size {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        };
        Self { page, page_size }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        let normalized = self.normalized();
        u64::from(normalized.page - 1) * u64::from(normalized.page_size)
    }

    /// Number of rows to return.
    pub fn limit(&self) -> u64 {
        u64::from(self.normalized().page_size)
    }

    /// Applies this page to an already-filtered, already-ordered slice.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let offset = self.offset() as usize;
        let limit = self.limit() as usize;
        items.iter().skip(offset).take(limit).cloned().collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// One page of results plus the total matching row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_rows: u64,
}

impl<T> Page<T> {
    /// Builds a page from items already cut to `pagination`.
    pub fn new(items: Vec<T>, pagination: Pagination, total_rows: u64) -> Self {
        let pagination = pagination.normalized();
        Self {
            items,
            page: pagination.page,
            page_size: pagination.page_size,
            total_rows,
        }
    }

    /// An empty page.
    pub fn empty(pagination: Pagination) -> Self {
        Self::new(Vec::new(), pagination, 0)
    }

    /// Transforms every item while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_rows: self.total_rows,
        }
    }
}
