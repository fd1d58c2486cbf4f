//! Code generation for Python modules.
//!
//! Turns a parsed Python module into an ES module exporting a session
//! factory, and optionally TypeScript declarations for it, using Handlebars
//! templates.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod generator;
pub mod javascript;
pub mod template_engine;
pub mod types;

pub use generator::{GENERATOR_NAME, ModuleGenerator};
pub use types::GeneratedModule;
