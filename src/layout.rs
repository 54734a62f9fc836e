//! Page geometry of a table.
//!
//! Column widths and offsets are fixed by the row schema and live in the crate
//! root as constants. The page size and the number of pages are chosen at
//! startup and captured once in a [`Layout`], which is then handed to the
//! table. Both are bounded by [`MAX_PAGE_SIZE`] and [`MAX_TABLE_PAGES`].

use tracing::debug;

use crate::error::LayoutError;
use crate::{MAX_PAGE_SIZE, MAX_TABLE_PAGES, PAGE_SIZE, ROW_SIZE, TABLE_MAX_PAGES, TABLE_MAX_ROWS};

/// Immutable storage geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    page_size: usize,
    max_pages: usize,
    rows_per_page: usize,
    max_rows: usize,
}

impl Layout {
    /// Creates a layout for pages of `page_size` bytes, at most `max_pages` of them.
    pub fn new(page_size: usize, max_pages: usize) -> Result<Self, LayoutError> {
        if page_size < ROW_SIZE {
            return Err(LayoutError::PageTooSmall {
                page_size,
                row_size: ROW_SIZE,
            });
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(LayoutError::PageTooLarge {
                page_size,
                limit: MAX_PAGE_SIZE,
            });
        }
        if max_pages == 0 {
            return Err(LayoutError::NoPages);
        }
        if max_pages > MAX_TABLE_PAGES {
            return Err(LayoutError::TooManyPages {
                max_pages,
                limit: MAX_TABLE_PAGES,
            });
        }

        let rows_per_page = page_size / ROW_SIZE;
        let max_rows = rows_per_page
            .checked_mul(max_pages)
            .ok_or(LayoutError::CapacityOverflow {
                rows_per_page,
                max_pages,
            })?;

        let layout = Self {
            page_size,
            max_pages,
            rows_per_page,
            max_rows,
        };
        debug!(
            page_size,
            max_pages,
            rows_per_page = layout.rows_per_page,
            max_rows,
            "computed table layout"
        );
        Ok(layout)
    }

    pub fn row_size(&self) -> usize {
        ROW_SIZE
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Total number of rows the table can hold.
    pub fn max_rows(&self) -> usize {
        self.max_rows
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            max_pages: TABLE_MAX_PAGES,
            rows_per_page: PAGE_SIZE / ROW_SIZE,
            max_rows: TABLE_MAX_ROWS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ROWS_PER_PAGE;

    #[test]
    fn default_matches_constants() {
        let layout = Layout::default();
        assert_eq!(layout.row_size(), 291);
        assert_eq!(layout.rows_per_page(), ROWS_PER_PAGE);
        assert_eq!(layout.rows_per_page(), 14);
        assert_eq!(layout.max_rows(), TABLE_MAX_ROWS);
        assert_eq!(layout.max_rows(), 1400);
        assert_eq!(Layout::new(PAGE_SIZE, TABLE_MAX_PAGES), Ok(layout));
    }

    #[test]
    fn page_holds_a_whole_number_of_rows() {
        let layout = Layout::new(ROW_SIZE * 3 + 10, 2).unwrap();
        assert_eq!(layout.rows_per_page(), 3);
        assert_eq!(layout.max_rows(), 6);
    }

    #[test]
    fn rejects_page_smaller_than_a_row() {
        assert_eq!(
            Layout::new(ROW_SIZE - 1, 10),
            Err(LayoutError::PageTooSmall {
                page_size: ROW_SIZE - 1,
                row_size: ROW_SIZE,
            })
        );
    }

    #[test]
    fn rejects_zero_pages() {
        assert_eq!(Layout::new(PAGE_SIZE, 0), Err(LayoutError::NoPages));
    }

    #[test]
    fn rejects_oversized_geometry() {
        assert_eq!(
            Layout::new(PAGE_SIZE, usize::MAX),
            Err(LayoutError::TooManyPages {
                max_pages: usize::MAX,
                limit: MAX_TABLE_PAGES,
            })
        );
        assert!(matches!(
            Layout::new(PAGE_SIZE, MAX_TABLE_PAGES + 1),
            Err(LayoutError::TooManyPages { .. })
        ));
        assert_eq!(
            Layout::new(usize::MAX, 1),
            Err(LayoutError::PageTooLarge {
                page_size: usize::MAX,
                limit: MAX_PAGE_SIZE,
            })
        );
    }

    #[test]
    fn largest_geometry_has_exact_capacity() {
        let layout = Layout::new(MAX_PAGE_SIZE, MAX_TABLE_PAGES).unwrap();
        assert_eq!(layout.rows_per_page(), MAX_PAGE_SIZE / ROW_SIZE);
        assert_eq!(layout.max_rows(), (MAX_PAGE_SIZE / ROW_SIZE) * MAX_TABLE_PAGES);
    }
}
