//! Error types for pyloader.
//!
//! Every crate in the workspace reports failures through [`Error`], so the
//! transform host and the CLI see one consistent hierarchy.
//!
//! # Examples
//!
//! ```
//! use pyloader_core::{Error, Result};
//!
//! fn check_endpoint(endpoint: &str) -> Result<()> {
//!     if endpoint.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "endpoint cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_endpoint("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pyloader.
#[derive(Error, Debug)]
pub enum Error {
    /// The Python parser reported a structured error for the source.
    ///
    /// Raised when the introspection helper could not import or parse the
    /// module. The transform of that file is aborted.
    #[error("Import error: {message}")]
    Introspection {
        /// Error text reported by the parser
        message: String,
    },

    /// The parser process could not be run or produced unusable output.
    #[error("Python parser process failed: {message}")]
    ParserProcess {
        /// Description of the process failure
        message: String,
        /// Underlying I/O error, if any
        #[source]
        source: Option<std::io::Error>,
    },

    /// A remote function was called with the wrong number of arguments.
    #[error("Expected {expected} arguments, but got {actual} (calling '{function}')")]
    ArityMismatch {
        /// Name of the called function
        function: String,
        /// Declared parameter count
        expected: usize,
        /// Number of arguments supplied
        actual: usize,
    },

    /// A call named a function the module does not export.
    #[error("Module '{module}' has no exported function '{function}'")]
    UnknownFunction {
        /// Module that was searched
        module: String,
        /// Requested function name
        function: String,
    },

    /// An HTTP request to the session server failed.
    ///
    /// Covers network failures, non-2xx statuses and undecodable bodies. The
    /// transport error is passed through unchanged as the source.
    #[error("Request '{operation}' to {endpoint} failed")]
    Transport {
        /// Remote operation (`registermodule`, `execute`)
        operation: String,
        /// Session endpoint (`host:port`)
        endpoint: String,
        /// Underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Template registration or rendering failed.
    #[error("Template error: {message}")]
    Template {
        /// Description of the template failure
        message: String,
    },

    /// Validation error for domain values.
    ///
    /// Raised for names that cannot be emitted as identifiers, malformed
    /// endpoints, and similar input problems.
    #[error("Validation error in {field}: {reason}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Detailed reason for the validation failure
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Filesystem error while reading sources or writing generated files.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Invalid argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if the Python parser rejected the source.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyloader_core::Error;
    ///
    /// let err = Error::Introspection {
    ///     message: "invalid syntax (<unknown>, line 1)".to_string(),
    /// };
    /// assert!(err.is_introspection_error());
    /// assert!(err.to_string().starts_with("Import error:"));
    /// ```
    #[must_use]
    pub const fn is_introspection_error(&self) -> bool {
        matches!(self, Self::Introspection { .. } | Self::ParserProcess { .. })
    }

    /// Returns `true` if this is an argument-count error.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyloader_core::Error;
    ///
    /// let err = Error::ArityMismatch {
    ///     function: "add".to_string(),
    ///     expected: 2,
    ///     actual: 3,
    /// };
    /// assert!(err.is_arity_error());
    /// assert!(err.to_string().contains("Expected 2 arguments, but got 3"));
    /// ```
    #[must_use]
    pub const fn is_arity_error(&self) -> bool {
        matches!(self, Self::ArityMismatch { .. })
    }

    /// Returns `true` if this is a transport error.
    #[must_use]
    pub const fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a validation error.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::Template { .. })
    }

    /// Returns `true` if the call named an unknown function.
    #[must_use]
    pub const fn is_unknown_function(&self) -> bool {
        matches!(self, Self::UnknownFunction { .. })
    }
}

/// Result type alias for pyloader operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_introspection_error_message_carries_parser_text() {
        let err = Error::Introspection {
            message: "unexpected indent".to_string(),
        };
        assert!(err.is_introspection_error());
        assert_eq!(err.to_string(), "Import error: unexpected indent");
    }

    #[test]
    fn test_parser_process_counts_as_introspection() {
        let err = Error::ParserProcess {
            message: "exit status 1".to_string(),
            source: None,
        };
        assert!(err.is_introspection_error());
        assert!(!err.is_transport_error());
    }

    #[test]
    fn test_arity_error_names_both_counts() {
        let err = Error::ArityMismatch {
            function: "subtract".to_string(),
            expected: 2,
            actual: 0,
        };
        assert!(err.is_arity_error());
        let display = err.to_string();
        assert!(display.contains("Expected 2 arguments, but got 0"));
        assert!(display.contains("subtract"));
    }

    #[test]
    fn test_transport_error_keeps_source() {
        let err = Error::Transport {
            operation: "execute".to_string(),
            endpoint: "localhost:80".to_string(),
            source: "connection refused".into(),
        };
        assert!(err.is_transport_error());
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "Request 'execute' to localhost:80 failed");
    }

    #[test]
    fn test_io_error_display_includes_path() {
        let err = Error::Io {
            path: PathBuf::from("/tmp/example.py.js"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/example.py.js"));
    }

    #[test]
    fn test_predicates_are_exclusive() {
        let err = Error::ConfigError {
            message: "bad".to_string(),
        };
        assert!(err.is_config_error());
        assert!(!err.is_validation_error());
        assert!(!err.is_template_error());
        assert!(!err.is_unknown_function());
    }
}
