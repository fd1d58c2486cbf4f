//! Request and response bodies of the session API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status envelope returned by every session endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Status {
    /// Status code reported by the server (`0` on success)
    pub code: i64,
    /// Human-readable status message
    pub message: String,
    /// Additional status details, passed through unchanged
    pub details: Vec<Value>,
}

/// Response to a `registermodule` request.
///
/// # Examples
///
/// ```
/// use pyloader_client::RegisterResponse;
///
/// let response: RegisterResponse = serde_json::from_str(
///     r#"{"status": {"code": 0, "message": "OK", "details": []}}"#,
/// ).unwrap();
///
/// assert_eq!(response.status.message, "OK");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Registration status
    pub status: Status,
}

/// Response to an `execute` request.
///
/// `return_value` is the server's textual rendering of the result; it is
/// not decoded further.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    /// Execution status
    pub status: Status,
    /// Designer log output captured during execution
    #[serde(default)]
    pub d3_log: String,
    /// Python stdout/stderr captured during execution
    #[serde(default)]
    pub python_log: String,
    /// Value returned by the script
    #[serde(default)]
    pub return_value: String,
}

/// Body of an `execute` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExecuteRequest<'a> {
    pub module_name: &'a str,
    pub script: &'a str,
}
