//! Configuration types for pyloader.
//!
//! [`LoaderOptions`] controls what the transform emits; [`WireContract`]
//! pins down the request field names used against the session server.
//!
//! Both deserialize from TOML or JSON. Keys are snake_case, and the camelCase
//! spellings used by JavaScript bundler configs are accepted as aliases.
//!
//! # Examples
//!
//! ```
//! use pyloader_core::{LoaderOptions, RegisterSourceField};
//!
//! let options = LoaderOptions::default();
//! assert!(!options.generate_javascript);
//! assert!(options.generate_type_definitions);
//! assert_eq!(options.wire.register_source_field, RegisterSourceField::Contents);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Package the generated JavaScript imports `PythonApiClient` from.
pub const DEFAULT_RUNTIME_PACKAGE: &str = "@disguise-one/designer-pythonapi";

/// Options for the Python loader transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Write the generated JavaScript next to the source as `<id>.js`.
    ///
    /// Default: false
    #[serde(alias = "generateJavascript")]
    pub generate_javascript: bool,

    /// Write the generated declarations next to the source as `<id>.d.ts`.
    ///
    /// Default: true
    #[serde(alias = "generateTypeDefinitions")]
    pub generate_type_definitions: bool,

    /// Module specifier the generated code imports its runtime from.
    #[serde(alias = "runtimePackage")]
    pub runtime_package: String,

    /// Python interpreter used for introspection.
    ///
    /// If `None`, `python3` (then `python`) is looked up on `PATH`.
    pub python: Option<PathBuf>,

    /// Wire-level field names for the session protocol.
    pub wire: WireContract,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            generate_javascript: false,
            generate_type_definitions: true,
            runtime_package: DEFAULT_RUNTIME_PACKAGE.to_string(),
            python: None,
            wire: WireContract::default(),
        }
    }
}

impl LoaderOptions {
    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the runtime package is blank, or
    /// an interpreter override is an empty path.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyloader_core::LoaderOptions;
    ///
    /// assert!(LoaderOptions::default().validate().is_ok());
    ///
    /// let mut invalid = LoaderOptions::default();
    /// invalid.runtime_package = "  ".to_string();
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.runtime_package.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "runtime_package cannot be empty".to_string(),
            });
        }

        if let Some(python) = &self.python
            && python.as_os_str().is_empty()
        {
            return Err(Error::ConfigError {
                message: "python interpreter path cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Field carrying the module source in a `registermodule` request.
///
/// Revisions of the session server disagree on this name, so it is
/// configuration rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RegisterSourceField {
    /// `{ "moduleName": ..., "contents": ... }`
    #[default]
    #[serde(rename = "contents")]
    Contents,
    /// `{ "moduleName": ..., "sourceCode": ... }`
    #[serde(rename = "sourceCode", alias = "source_code")]
    SourceCode,
}

impl RegisterSourceField {
    /// Returns the JSON field name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyloader_core::RegisterSourceField;
    ///
    /// assert_eq!(RegisterSourceField::Contents.as_str(), "contents");
    /// assert_eq!(RegisterSourceField::SourceCode.as_str(), "sourceCode");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contents => "contents",
            Self::SourceCode => "sourceCode",
        }
    }
}

/// Wire contract for the session protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WireContract {
    /// Name of the source field in `registermodule` requests.
    #[serde(alias = "registerSourceField")]
    pub register_source_field: RegisterSourceField,
}
