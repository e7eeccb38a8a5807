//! Crate-wide error type for the ingestion layer. The solver core has no
//! fallible operations and therefore never appears here — this type only
//! guards the boundary where an external CSV file meets the solver.

use thiserror::Error;

/// Everything that can go wrong while parsing the tabular input format, in
/// the idiom of `vm_io::IoError`: one variant per failure class, each
/// carrying enough context to act on without re-parsing.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("header row: {0}")]
    Header(String),

    #[error("row {row}: {msg}")]
    Row { row: usize, msg: String },
}

pub type IngestResult<T> = Result<T, IngestError>;
