//! Error types shared across the discovery crates.

use thiserror::Error;

/// Fatal error raised by the discovery pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed `mapping.tsv` entry
    #[error("mapping error: {0}")]
    Mapping(String),

    /// Malformed table data (e.g. a row narrower than the table schema)
    #[error("table data error: {0}")]
    Data(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
