//! Python source introspection.
//!
//! Extracts the exported top-level functions of a Python module, and their
//! positional parameters, without executing the module. The result feeds the
//! code generator.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod parser;
pub mod types;

pub use parser::{PARSE_SCRIPT, PythonParser, SubprocessParser};
pub use types::{FunctionSignature, ParsedModule};
