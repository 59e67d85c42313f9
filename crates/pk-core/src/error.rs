//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `PkError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The error type for `pk-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum PkError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `pk-core`.
pub type PkResult<T> = Result<T, PkError>;
