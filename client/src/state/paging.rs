//! Cursor over the backend's paged list responses.
//!
//! Paging follows the `next`/`previous` links the backend returns; the client
//! never derives page counts itself.

#[cfg(test)]
#[path = "paging_test.rs"]
mod paging_test;

use crate::net::types::Page;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    /// 1-based page currently shown.
    pub page: u32,
    pub has_next: bool,
    pub has_previous: bool,
    pub total: u64,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self { page: 1, has_next: false, has_previous: false, total: 0 }
    }
}

impl PageCursor {
    pub fn from_page<T>(page: u32, response: &Page<T>) -> Self {
        Self {
            page: page.max(1),
            has_next: response.next.is_some(),
            has_previous: response.previous.is_some(),
            total: response.count,
        }
    }

    pub fn next(self) -> Option<u32> {
        self.has_next.then(|| self.page + 1)
    }

    pub fn previous(self) -> Option<u32> {
        (self.has_previous && self.page > 1).then(|| self.page - 1)
    }
}
