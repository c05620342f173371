//! Paginate executor.

use alloc::vec::Vec;
use core::fmt;
use tabula_core::Row;

/// Returns the number of pages needed for `total_rows`, 0 when empty.
///
/// A page size of 0 is treated as 1.
#[inline]
pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1))
}

/// Clamps `page_index` to the last valid page, or 0 when there are no rows.
#[inline]
pub fn clamp_page_index(page_index: usize, total_rows: usize, page_size: usize) -> usize {
    page_index.min(total_pages(total_rows, page_size).saturating_sub(1))
}

/// One page window over the filtered rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    /// Rows of this page, in filtered order.
    pub rows: Vec<Row>,
    pub page_index: usize,
    pub page_size: usize,
    /// Number of rows across all pages.
    pub total_rows: usize,
    pub total_pages: usize,
}

impl Page {
    /// Returns true if a page precedes this one.
    #[inline]
    pub fn has_previous(&self) -> bool {
        self.page_index > 0 && self.total_pages > 0
    }

    /// Returns true if a page follows this one.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }

    /// Returns the "showing x to y of z" bounds of this page.
    pub fn info(&self) -> PageInfo {
        if self.rows.is_empty() {
            return PageInfo {
                first: 0,
                last: 0,
                total: self.total_rows,
            };
        }
        let first = self.page_index * self.page_size + 1;
        PageInfo {
            first,
            last: first + self.rows.len() - 1,
            total: self.total_rows,
        }
    }
}

/// 1-based bounds of a page within the filtered rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// First row shown, 0 when nothing is shown.
    pub first: usize,
    /// Last row shown, 0 when nothing is shown.
    pub last: usize,
    pub total: usize,
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} to {} of {} entries", self.first, self.last, self.total)
    }
}

/// Paginate executor - cuts a page window out of the filtered rows.
pub struct PaginateExecutor {
    page_index: usize,
    page_size: usize,
}

impl PaginateExecutor {
    /// Creates a new paginate executor. A page size of 0 is treated as 1.
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }

    /// Executes the pagination on the input rows.
    ///
    /// The window `[index * size, index * size + size)` is clipped to the
    /// input; an index past the end yields an empty page.
    pub fn execute(&self, input: &[Row]) -> Page {
        let len = input.len();
        let start = self.page_index.saturating_mul(self.page_size).min(len);
        let end = start.saturating_add(self.page_size).min(len);

        Page {
            rows: input[start..end].to_vec(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_rows: len,
            total_pages: total_pages(len, self.page_size),
        }
    }
}
