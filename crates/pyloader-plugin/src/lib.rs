//! Bundler transform hook for Python modules.
//!
//! [`PythonLoader::transform`] is the Rust side of a Vite/Rollup plugin's
//! `transform(code, id)` hook: for `.py` ids it introspects the source,
//! generates the wrapper module and its declarations, optionally writes
//! them next to the source, and returns the hook result.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod emit;
pub mod loader;
pub mod types;

pub use loader::PythonLoader;
pub use types::{TransformMeta, TransformOutput};
