//! Error handling for the huffwire library
//!
//! All fallible operations return [`Result`]. The error type is `Clone` so that
//! sticky bit streams can hand the same failure back on every later call.

use std::sync::Arc;
use thiserror::Error;

use crate::codec::ValueKind;

/// Main error type for the huffwire library
#[derive(Error, Debug, Clone)]
pub enum HuffwireError {
    /// I/O related errors reported by the underlying reader or writer
    #[error("I/O error: {0}")]
    Io(Arc<std::io::Error>),

    /// Invalid data format or argument
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },

    /// Index out of bounds access
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// The encoded stream violates the wire format
    #[error("Protocol violation: {message}")]
    Protocol {
        /// Error message describing the violation
        message: String,
    },

    /// A value of a different kind was decoded than the caller asked for
    #[error("Unexpected value kind: expected {expected}, found {found:?}")]
    UnexpectedKind {
        /// Description of the accepted kinds
        expected: &'static str,
        /// The kind actually present in the stream
        found: ValueKind,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl HuffwireError {
    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData { message: message.into() }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create a protocol violation error
    pub fn protocol<S: Into<String>>(message: S) -> Self {
        Self::Protocol { message: message.into() }
    }

    /// Create an unexpected kind error
    pub fn unexpected_kind(expected: &'static str, found: ValueKind) -> Self {
        Self::UnexpectedKind { expected, found }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create an I/O error from a message
    pub fn io_error<S: Into<String>>(message: S) -> Self {
        Self::Io(Arc::new(std::io::Error::new(std::io::ErrorKind::Other, message.into())))
    }

    /// The I/O error kind, if this is an I/O failure
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Only a kind mismatch leaves the stream usable; everything else is terminal
    /// for the stream it was raised on.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::UnexpectedKind { .. } => true,
            Self::Io(_) => false,
            Self::InvalidData { .. } => false,
            Self::OutOfBounds { .. } => false,
            Self::Protocol { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::InvalidData { .. } => "data",
            Self::OutOfBounds { .. } => "bounds",
            Self::Protocol { .. } => "protocol",
            Self::UnexpectedKind { .. } => "kind",
            Self::Configuration { .. } => "config",
        }
    }
}

impl From<std::io::Error> for HuffwireError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HuffwireError>;

/// Assert that an index is within bounds
#[inline]
pub fn check_bounds(index: usize, size: usize) -> Result<()> {
    if index >= size {
        Err(HuffwireError::out_of_bounds(index, size))
    } else {
        Ok(())
    }
}

/// Assert that an inclusive range lies within bounds
#[inline]
pub fn check_range(start: usize, end: usize, size: usize) -> Result<()> {
    if start > end {
        return Err(HuffwireError::invalid_data(format!(
            "Invalid range: start {} > end {}",
            start, end
        )));
    }
    check_bounds(end, size)
}
