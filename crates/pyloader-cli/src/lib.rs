//! pyloader CLI library.
//!
//! Command implementations and output formatters, exposed so they can be
//! tested without spawning the binary.

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

pub mod commands;
pub mod formatters;
