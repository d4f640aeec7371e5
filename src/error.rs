use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures the engine cannot recover from.
///
/// Any of these ends the session: the table is left as it is and nothing
/// further is flushed. A full table is not an error, see
/// [`InsertOutcome`](crate::InsertOutcome).
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("unable to open database file {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on page {page}")]
    PageIo {
        page: usize,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("page {page} out of bounds (max pages: {max})")]
    PageOutOfBounds { page: usize, max: usize },

    #[error("tried to flush page {page}, which is not in memory")]
    FlushUnloadedPage { page: usize },

    #[error("database file holds {rows} rows but the table can address only {max}")]
    TooManyRows { rows: usize, max: usize },

    #[error("cursor advanced past the end of the table")]
    CursorPastEnd,
}

pub type Result<T> = std::result::Result<T, StorageError>;
