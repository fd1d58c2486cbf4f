//! Strong domain types for pyloader.
//!
//! Newtypes keep module names and session endpoints from being mixed up with
//! the many other strings (source text, scripts, file ids) flowing through
//! the transform.
//!
//! # Examples
//!
//! ```
//! use pyloader_core::{ModuleName, SessionEndpoint};
//!
//! let module = ModuleName::from_id("/project/src/example.py");
//! assert_eq!(module.as_str(), "example");
//!
//! let endpoint = SessionEndpoint::new("localhost:80").unwrap();
//! assert_eq!(endpoint.as_str(), "localhost:80");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// File extension recognised as Python source.
pub const PYTHON_EXTENSION: &str = ".py";

/// Module name used when a file id has no usable last segment.
pub const DEFAULT_MODULE_NAME: &str = "module";

/// Python module name (newtype over String).
///
/// Used both as the remote session's module key and as the basis of the
/// generated export name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleName(String);

impl ModuleName {
    /// Creates a module name from a raw string.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derives the module name from a file id.
    ///
    /// Strips a trailing `.py` and keeps the last path segment. Both `/` and
    /// `\` are treated as separators. Falls back to [`DEFAULT_MODULE_NAME`]
    /// when nothing is left.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyloader_core::ModuleName;
    ///
    /// assert_eq!(ModuleName::from_id("example.py").as_str(), "example");
    /// assert_eq!(ModuleName::from_id("a/b/tools.py").as_str(), "tools");
    /// assert_eq!(ModuleName::from_id("src/.py").as_str(), "module");
    /// ```
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        let stem = id.strip_suffix(PYTHON_EXTENSION).unwrap_or(id);
        let name = stem.rsplit(['/', '\\']).next().unwrap_or(stem);

        if name.is_empty() {
            Self::new(DEFAULT_MODULE_NAME)
        } else {
            Self::new(name)
        }
    }

    /// Returns the module name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ModuleName` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ModuleName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Remote session endpoint in `host:port` form.
///
/// The session client prefixes it with `http://` and appends the session API
/// path, so schemes and paths are rejected here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionEndpoint(String);

impl SessionEndpoint {
    /// Creates a validated endpoint.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the endpoint is empty, contains
    /// whitespace, a scheme (`://`) or a path separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyloader_core::SessionEndpoint;
    ///
    /// assert!(SessionEndpoint::new("127.0.0.1:8080").is_ok());
    /// assert!(SessionEndpoint::new("").is_err());
    /// assert!(SessionEndpoint::new("http://host:80").is_err());
    /// ```
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        let trimmed = endpoint.as_ref().trim();

        let reason = if trimmed.is_empty() {
            Some("endpoint cannot be empty")
        } else if trimmed.contains("://") {
            Some("endpoint must be host:port without a scheme")
        } else if trimmed.contains(['/', '\\']) {
            Some("endpoint must not contain a path")
        } else if trimmed.chars().any(char::is_whitespace) {
            Some("endpoint must not contain whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(Error::ValidationError {
                field: "endpoint".to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(Self(trimmed.to_string())),
        }
    }

    /// Returns the endpoint as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SessionEndpoint {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SessionEndpoint> for String {
    fn from(endpoint: SessionEndpoint) -> Self {
        endpoint.0
    }
}

impl std::str::FromStr for SessionEndpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
