//! Error types for finding codes
//!
//! Validation itself never fails: every problem with a feed is recorded in a
//! report. The only fallible operation in this crate is turning a wire string
//! back into a typed code.

use crate::codes::Severity;
use thiserror::Error;

/// Result type for code lookups
pub type CodeResult<T> = Result<T, CodeError>;

/// Errors raised while interpreting finding codes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// The string is not a known code in the requested namespace
    #[error("Unknown {severity} code: '{code}'")]
    UnknownCode { severity: Severity, code: String },
}
