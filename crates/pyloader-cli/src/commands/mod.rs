//! Command implementations for the pyloader CLI.
//!
//! `main` parses arguments and hands each command typed values. A command
//! prints its report in the requested format and returns an exit code.

pub mod call;
pub mod common;
pub mod completions;
pub mod execute;
pub mod introspect;
pub mod register;
pub mod transform;
