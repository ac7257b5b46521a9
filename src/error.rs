//! Error types and handling infrastructure for scrollnorm.
//!
//! The normalizer itself almost never fails: capability probes degrade to
//! "unsupported" and removing an unknown listener is a no-op. What remains are
//! listener failures that must reach the host, configuration problems, and
//! terminal I/O in the bundled terminal host.

use thiserror::Error;

/// Boxed error returned by a scroll listener.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for scrollnorm operations.
#[derive(Error, Debug)]
pub enum ScrollnormError {
    /// A listener failed; the remaining listeners were not called for this dispatch.
    #[error("Scroll listener #{index} failed: {source}")]
    Listener {
        index: usize,
        #[source]
        source: ListenerError,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Terminal I/O errors from the terminal host or the demo viewer
    #[error("Terminal operation failed: {message}")]
    TerminalError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Standard Result type for scrollnorm operations.
pub type Result<T> = std::result::Result<T, ScrollnormError>;

impl ScrollnormError {
    /// Wrap a listener failure together with the listener's position in the fan-out
    pub fn listener(index: usize, source: ListenerError) -> Self {
        Self::Listener { index, source }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a TerminalError from an io::Error with additional context
    pub fn terminal(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::TerminalError {
            message: message.into(),
            source,
        }
    }
}

impl From<std::io::Error> for ScrollnormError {
    fn from(err: std::io::Error) -> Self {
        Self::TerminalError {
            message: "I/O operation failed".to_string(),
            source: err,
        }
    }
}
