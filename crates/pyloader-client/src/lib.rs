//! Client for the remote Python session API.
//!
//! A session server hosts Python modules by name. A module is registered
//! once with its source, after which arbitrary scripts can be executed in
//! its namespace:
//!
//! - `POST http://<endpoint>/api/session/python/registermodule`
//! - `POST http://<endpoint>/api/session/python/execute`
//!
//! [`PythonApiClient`] speaks that protocol for one module.
//! [`RemoteModule`] adds the exported function list on top, so calls are
//! checked locally before they are sent.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod client;
pub mod remote;
pub mod script;
pub mod types;

pub use client::PythonApiClient;
pub use remote::RemoteModule;
pub use script::call_script;
pub use types::{ExecuteResponse, RegisterResponse, Status};
