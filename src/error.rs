//! Error types for every layer of the row store.

use std::io;

use thiserror::Error;

/// Result type for REPL operations.
pub type Result<T> = std::result::Result<T, ReplError>;

/// Invalid page geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A page cannot hold a single row.
    #[error("page size {page_size} is smaller than one row ({row_size} bytes)")]
    PageTooSmall { page_size: usize, row_size: usize },

    #[error("page size {page_size} exceeds the limit of {limit} bytes")]
    PageTooLarge { page_size: usize, limit: usize },

    /// The table would have no pages at all.
    #[error("table must have at least one page")]
    NoPages,

    #[error("{max_pages} pages exceeds the limit of {limit} pages")]
    TooManyPages { max_pages: usize, limit: usize },

    /// Total row capacity does not fit in a `usize`.
    #[error("{max_pages} pages of {rows_per_page} rows overflows the row count")]
    CapacityOverflow { rows_per_page: usize, max_pages: usize },
}

/// Errors raised by the paged table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Every slot of every page is taken.
    #[error("table capacity of {max_rows} rows exceeded")]
    CapacityExceeded { max_rows: usize },
}

/// Errors turning a line of text into a statement.
///
/// The `Display` output of each variant is what the REPL prints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrepareError {
    /// The line starts with a known keyword but its arguments are malformed.
    #[error("Syntax error. Could not parse statement: '{0}'.")]
    Syntax(String),

    /// The keyword is neither `insert` nor `select`.
    #[error("Unrecognized statement: '{0}'.")]
    Unrecognized(String),

    /// A text argument does not fit its column.
    #[error("String is too long.")]
    StringTooLong,

    #[error("ID must be positive.")]
    NegativeId,
}

/// Errors applying a statement to the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteError {
    #[error("Error: Table full.")]
    TableFull,
}

impl From<TableError> for ExecuteError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::CapacityExceeded { .. } => ExecuteError::TableFull,
        }
    }
}

/// Fatal errors that stop the REPL.
#[derive(Debug, Error)]
pub enum ReplError {
    /// Standard input reached end of file before `.exit`.
    #[error("failed to read input: end of input")]
    InputClosed,

    #[error("failed to read input")]
    ReadInput(#[source] io::Error),

    #[error("failed to write output")]
    WriteOutput(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn io_failures_name_their_cause_once() {
        let err = ReplError::ReadInput(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        assert_eq!(err.to_string(), "failed to read input");
        assert_eq!(err.source().map(|e| e.to_string()).as_deref(), Some("disk on fire"));

        let chained = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(chained, "failed to read input: disk on fire");
        assert_eq!(chained.matches("disk on fire").count(), 1);

        let err = ReplError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(format!("{:#}", anyhow::Error::from(err)), "failed to write output: closed");
    }
}
