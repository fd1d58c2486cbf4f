//! Types produced by Python introspection.
//!
//! These mirror the JSON document emitted by the bundled parser helper:
//! either `{"functions": [...]}` or `{"error": "..."}`.
//!
//! # Examples
//!
//! ```
//! use pyloader_introspector::{FunctionSignature, ParsedModule};
//!
//! let module: ParsedModule = serde_json::from_str(
//!     r#"{"functions": [{"name": "add", "parameters": ["a", "b"]}]}"#,
//! ).unwrap();
//!
//! let module = module.into_result().unwrap();
//! assert_eq!(module.functions, vec![FunctionSignature::new("add", ["a", "b"])]);
//! ```

use pyloader_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Signature of one exported Python function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Function name as written in the Python source
    pub name: String,
    /// Positional parameter names, in declaration order
    #[serde(default)]
    pub parameters: Vec<String>,
}

impl FunctionSignature {
    /// Creates a signature from a name and parameter names.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of parameters a call must supply.
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// Introspection result for one Python module.
///
/// When `error` is set the function list is not trusted; use
/// [`ParsedModule::into_result`] to turn that into an [`Error`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedModule {
    /// Exported functions, in source order
    #[serde(default)]
    pub functions: Vec<FunctionSignature>,
    /// Parser-reported error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParsedModule {
    /// Creates a successful result from a list of functions.
    #[must_use]
    pub const fn new(functions: Vec<FunctionSignature>) -> Self {
        Self {
            functions,
            error: None,
        }
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Returns an iterator over the function names, in order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|f| f.name.as_str())
    }

    /// Converts a parser-reported error into [`Error::Introspection`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Introspection`] carrying the parser's message if
    /// `error` is set.
    pub fn into_result(self) -> Result<Self> {
        match self.error {
            Some(message) => Err(Error::Introspection { message }),
            None => Ok(self),
        }
    }
}
