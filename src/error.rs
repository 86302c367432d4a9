use thiserror::Error;

/// Canonical result for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A row's cell count disagrees with the established column count.
    /// Fatal to the whole load; no partial table is returned.
    #[error("row {row} has {actual} cells, but other rows have {expected}")]
    Shape {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Column lookup by name found no case-insensitive match.
    #[error("column `{0}` does not exist")]
    NotFound(String),

    /// An internal consistency failure. Never triggered by tables built
    /// through this crate's own read/infer/cast path.
    #[error("internal invariant failed: {0}")]
    Invariant(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
