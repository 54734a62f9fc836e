//! Append-only table of rows stored in lazily allocated pages.

use tracing::{debug, trace};

use crate::error::TableError;
use crate::layout::Layout;
use crate::row::{Row, RowCodec};

type Page = Box<[u8]>;

pub struct Table {
    layout: Layout,
    num_rows: usize,
    pages: Vec<Option<Page>>,
}

impl Table {
    pub fn new(layout: Layout) -> Self {
        let mut pages = Vec::with_capacity(layout.max_pages());
        pages.resize_with(layout.max_pages(), || None);

        Self {
            layout,
            num_rows: 0,
            pages,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of pages that have been touched so far.
    pub fn allocated_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= self.layout.max_rows()
    }

    /// Returns the bytes of row `row_num`, allocating its page on first use.
    ///
    /// The index is not checked against the number of rows written.
    ///
    /// # Panics
    ///
    /// Panics if `row_num` lies beyond the last page.
    pub fn row_slot_mut(&mut self, row_num: usize) -> &mut [u8] {
        let (page_num, offset) = self.position(row_num);
        let page_size = self.layout.page_size();
        let row_size = self.layout.row_size();

        let page = self.pages[page_num].get_or_insert_with(|| {
            debug!(page_num, page_size, "allocating page");
            vec![0u8; page_size].into_boxed_slice()
        });
        &mut page[offset..offset + row_size]
    }

    /// Read-only counterpart of [`Table::row_slot_mut`].
    ///
    /// Returns `None` if the row's page was never allocated or lies beyond
    /// the last page.
    pub fn row_slot(&self, row_num: usize) -> Option<&[u8]> {
        let (page_num, offset) = self.position(row_num);
        let page = self.pages.get(page_num)?.as_deref()?;
        Some(&page[offset..offset + self.layout.row_size()])
    }

    /// Appends `row` after the last one.
    ///
    /// On error the table is left exactly as it was.
    pub fn append(&mut self, row: &Row) -> Result<(), TableError> {
        if self.is_full() {
            debug!(num_rows = self.num_rows, "table is full");
            return Err(TableError::CapacityExceeded {
                max_rows: self.layout.max_rows(),
            });
        }

        let row_num = self.num_rows;
        RowCodec::encode_into(row, self.row_slot_mut(row_num));
        self.num_rows += 1;
        trace!(row_num, id = row.id, "appended row");
        Ok(())
    }

    /// Iterates over every row in insertion order.
    pub fn scan(&self) -> Scan<'_> {
        Scan {
            table: self,
            next_row: 0,
        }
    }

    fn position(&self, row_num: usize) -> (usize, usize) {
        let rows_per_page = self.layout.rows_per_page();
        let page_num = row_num / rows_per_page;
        let offset = (row_num % rows_per_page) * self.layout.row_size();
        (page_num, offset)
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        debug!(
            num_rows = self.num_rows,
            pages = self.allocated_pages(),
            "releasing table"
        );
    }
}

/// Iterator returned by [`Table::scan`].
pub struct Scan<'a> {
    table: &'a Table,
    next_row: usize,
}

impl Iterator for Scan<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.next_row >= self.table.num_rows {
            return None;
        }
        let slot = self.table.row_slot(self.next_row)?;
        self.next_row += 1;
        Some(RowCodec::decode(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.num_rows.saturating_sub(self.next_row);
        (remaining, Some(remaining))
    }
}
