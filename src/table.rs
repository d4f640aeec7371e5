use std::path::Path;

use log::{debug, info, warn};

use crate::cursor::Cursor;
use crate::error::{Result, StorageError};
use crate::layout::Layout;
use crate::pager::Pager;
use crate::row::Row;

/// Result of an insert that did not hit a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    TableFull,
}

/// The single table: a pager plus the number of valid rows.
///
/// Bytes past `num_rows` inside a loaded page are not rows, whatever they
/// contain.
pub struct Table {
    pager: Pager,
    num_rows: usize,
}

impl Table {
    pub fn open(path: impl AsRef<Path>, layout: Layout) -> Result<Self> {
        let path = path.as_ref();
        let pager = Pager::open(path, layout)?;
        let file_length = pager.file_length();
        let num_rows = layout.rows_in_file(file_length);

        if layout.has_partial_row(file_length) {
            warn!(
                "{} ends with a partial row ({file_length} bytes), ignoring it",
                path.display()
            );
        }
        if num_rows > layout.max_rows() {
            return Err(StorageError::TooManyRows {
                rows: num_rows,
                max: layout.max_rows(),
            });
        }

        info!("opened {} with {num_rows} rows", path.display());
        Ok(Self { pager, num_rows })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn layout(&self) -> Layout {
        self.pager.layout()
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= self.layout().max_rows()
    }

    pub fn row_location(&self, row_num: usize) -> (usize, usize) {
        self.layout().row_location(row_num)
    }

    pub(crate) fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    /// Appends `row` after the last existing row.
    pub fn insert(&mut self, row: &Row) -> Result<InsertOutcome> {
        if self.is_full() {
            return Ok(InsertOutcome::TableFull);
        }

        let mut cursor = Cursor::at_end(self);
        row.encode(cursor.value()?, 0);
        self.num_rows += 1;

        debug!("inserted row {} with id {}", self.num_rows - 1, row.id);
        Ok(InsertOutcome::Inserted)
    }

    /// Every row, in insertion order.
    pub fn select(&mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::with_capacity(self.num_rows);
        let mut cursor = Cursor::at_start(self);
        while !cursor.is_end() {
            rows.push(Row::decode(cursor.value()?, 0));
            cursor.advance()?;
        }
        Ok(rows)
    }

    /// Flushes every loaded page and closes the file.
    ///
    /// Full pages are written whole. The trailing page is written only up to
    /// its last row, so the file never holds more than `num_rows` rows.
    pub fn close(mut self) -> Result<()> {
        let layout = self.layout();
        let full_pages = self.num_rows / layout.rows_per_page();

        for page_num in 0..full_pages {
            if self.pager.is_loaded(page_num) {
                self.pager.flush(page_num, layout.page_size)?;
                self.pager.release(page_num);
            }
        }

        let remaining_rows = self.num_rows % layout.rows_per_page();
        if remaining_rows > 0 && self.pager.is_loaded(full_pages) {
            self.pager.flush(full_pages, remaining_rows * layout.row_size())?;
            self.pager.release(full_pages);
        }

        info!("closed table with {} rows", self.num_rows);
        self.pager.close()
    }
}
