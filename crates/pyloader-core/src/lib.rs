//! Core types, configuration, and errors for pyloader.
//!
//! This crate provides the foundational types shared by every other crate in
//! the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`ModuleName`, `SessionEndpoint`)
//! - Error hierarchy with contextual information
//! - Loader and wire-contract configuration
//! - CLI value types (`OutputFormat`, `ExitCode`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub mod cli;

pub use config::{DEFAULT_RUNTIME_PACKAGE, LoaderOptions, RegisterSourceField, WireContract};
pub use error::{Error, Result};
pub use types::{DEFAULT_MODULE_NAME, ModuleName, PYTHON_EXTENSION, SessionEndpoint};
