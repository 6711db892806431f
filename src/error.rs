//! Unified error types for mpdump.
//!
//! This module provides a single [`MpdumpError`] enum that covers all error
//! cases in the library. This design follows the pattern used by popular
//! crates like `reqwest`, `serde_json`, and `zip`.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging
//!
//! There is no retry logic anywhere in the library: every collaborator error
//! propagates up and terminates the export. Files already flushed for prior
//! channels remain on disk.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for mpdump operations.
///
/// This type is broadly used across the library for any operation that
/// may produce an error.
///
/// # Example
///
/// ```rust
/// use mpdump::error::Result;
/// use mpdump::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, MpdumpError>;

/// The error type for all mpdump operations.
///
/// This enum represents all possible errors that can occur when exporting
/// a workspace. Each variant contains context about what went wrong and,
/// where applicable, the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MpdumpError {
    /// Configuration error (missing or invalid credential).
    ///
    /// Reported before any export network activity; the binary exits with
    /// status 2 for this variant, matching the classic dump tools.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/HTTP error from the Slack Web API transport.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Slack Web API answered with an `ok: false` envelope.
    ///
    /// Contains the API method that failed and the error code Slack
    /// returned (e.g. `channel_not_found`, `invalid_auth`).
    #[error("Slack API call {method} failed: {code}")]
    Api {
        /// The Web API method that was called (e.g. `groups.history`).
        method: &'static str,
        /// The error code from the response envelope.
        code: String,
    },

    /// A message carried a malformed or missing timestamp.
    ///
    /// Timestamps drive the per-day partitioning, so a bad one is a
    /// data-integrity problem: the whole export aborts rather than
    /// skipping the record.
    #[error("malformed message timestamp {input:?}")]
    Timestamp {
        /// The timestamp string that failed to parse.
        input: String,
    },

    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The output directory cannot be created
    /// - Permission denied
    /// - Disk is full (when writing day files or the archive)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    ///
    /// This can occur when decoding an API response or writing day files.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Archive creation error.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// UTF-8 encoding error.
    ///
    /// Occurs when serialized output is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl MpdumpError {
    /// The process exit status for this error.
    ///
    /// Configuration errors (missing or rejected credential) exit with 2,
    /// everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            MpdumpError::Config(_) => 2,
            _ => 1,
        }
    }
}

impl From<std::string::FromUtf8Error> for MpdumpError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        MpdumpError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}
