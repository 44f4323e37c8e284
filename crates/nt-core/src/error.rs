//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `NtError` as one variant
//! where configuration problems can surface.

use thiserror::Error;

/// Errors raised by `nt-core` itself.
#[derive(Debug, Error)]
pub enum NtError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `nt-core`.
pub type NtResult<T> = Result<T, NtError>;
