//! A single-table row store kept in fixed-size pages of one backing file.
//!
//! Rows are appended in arrival order and never updated or deleted. The
//! [`Pager`] caches every page it touches for the lifetime of the
//! [`Table`], so a table can never grow past `max_pages * page_size` bytes.

pub mod cursor;
pub mod error;
pub mod layout;
pub mod pager;
pub mod row;
pub mod statement;
pub mod table;

pub use cursor::Cursor;
pub use error::{Result, StorageError};
pub use layout::Layout;
pub use pager::Pager;
pub use row::Row;
pub use table::{InsertOutcome, Table};

pub const COLUMN_USERNAME_SIZE: usize = 32;
pub const COLUMN_EMAIL_SIZE: usize = 255;
pub const ID_SIZE: usize = size_of::<u32>();
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100;
/// Upper bound for a configured page capacity: 256 MiB of cached pages.
pub const MAX_PAGES_LIMIT: usize = 1 << 16;
pub const ROWS_PER_PAGE: usize = PAGE_SIZE / ROW_SIZE;
pub const TABLE_MAX_ROWS: usize = ROWS_PER_PAGE * TABLE_MAX_PAGES;
