//! Error kinds surfaced by the engine and the CLI.

/// Discriminated result type for every public engine entry point.
///
/// Propagation policy: a single malformed row or predicate aborts the
/// whole operation. Nothing is recovered locally and no partial output
/// is ever produced.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("unknown variant calling method: {0}")]
    UnknownVariantCallingMethod(String),

    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("invalid predicate: {0}")]
    InvalidPredicate(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("I/O failure: {0}")]
    IOFailure(#[from] std::io::Error),

    #[error("I/O failure: {0}")]
    CsvFailure(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
