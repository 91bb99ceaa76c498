//! Error types for by-subject operations.
//!
//! This module provides the [`BySubjectError`] type for the stream-level and
//! conversion APIs and the [`Result`] convenience type. Decoding a single line
//! with [`BySubjectRecord::parse`](crate::BySubjectRecord::parse) never returns
//! an error; it reports malformed input through its boolean result.

use thiserror::Error;

/// Error type for all by-subject library operations.
#[derive(Error, Debug)]
pub enum BySubjectError {
    /// Error indicating a record that cannot be represented or reconstructed.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A line that could not be decoded as a by-subject record.
    ///
    /// `id` is the identifier left on the record by the failed parse, which is
    /// the digits scanned before the line turned out to be malformed.
    #[error("Malformed line {line} (id {id})")]
    MalformedLine {
        /// 1-based line number within the source.
        line: usize,
        /// Partial identifier scanned before the failure.
        id: u32,
    },

    /// Error indicating input that cannot be processed at all.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error indicating an operation on a reader or writer in the wrong state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON conversion.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`BySubjectError`].
pub type Result<T> = std::result::Result<T, BySubjectError>;
