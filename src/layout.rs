use crate::{MAX_PAGES_LIMIT, PAGE_SIZE, ROW_SIZE, TABLE_MAX_PAGES};

/// Page geometry shared by the pager and the table.
///
/// The row width is fixed by the column constants; only the page size and
/// the page capacity vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub page_size: usize,
    pub max_pages: usize,
}

impl Layout {
    /// Panics if a page cannot hold a single row or `max_pages` exceeds
    /// [`MAX_PAGES_LIMIT`].
    pub const fn new(page_size: usize, max_pages: usize) -> Self {
        assert!(page_size >= ROW_SIZE, "page size must fit at least one row");
        assert!(max_pages <= MAX_PAGES_LIMIT, "page capacity above MAX_PAGES_LIMIT");
        Self {
            page_size,
            max_pages,
        }
    }

    pub const fn row_size(&self) -> usize {
        ROW_SIZE
    }

    /// Rows never straddle pages; the tail of each page is left unused.
    pub const fn rows_per_page(&self) -> usize {
        self.page_size / ROW_SIZE
    }

    pub const fn max_rows(&self) -> usize {
        self.rows_per_page() * self.max_pages
    }

    /// Maps a row index to its page index and the byte offset inside that page.
    pub const fn row_location(&self, row_num: usize) -> (usize, usize) {
        let rows_per_page = self.rows_per_page();
        (
            row_num / rows_per_page,
            (row_num % rows_per_page) * ROW_SIZE,
        )
    }

    pub const fn page_offset(&self, page_num: usize) -> u64 {
        page_num as u64 * self.page_size as u64
    }

    /// Number of complete rows stored in a file of `file_length` bytes.
    ///
    /// Full pages are written whole, padding included, so only the trailing
    /// page is measured in rows. A partial trailing row is dropped.
    pub const fn rows_in_file(&self, file_length: u64) -> usize {
        let page_size = self.page_size as u64;
        let full_pages = (file_length / page_size) as usize;
        let tail_rows = ((file_length % page_size) / ROW_SIZE as u64) as usize;
        full_pages * self.rows_per_page() + tail_rows
    }

    /// Whether `file_length` ends in the middle of a row.
    pub const fn has_partial_row(&self, file_length: u64) -> bool {
        let tail = file_length % self.page_size as u64;
        let row_size = ROW_SIZE as u64;
        tail % row_size != 0 && tail / row_size < self.rows_per_page() as u64
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(PAGE_SIZE, TABLE_MAX_PAGES)
    }
}
