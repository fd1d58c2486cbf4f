//! Call-script construction.
//!
//! A remote call is a one-line Python script, `return name(arg1, arg2, ...)`,
//! where each argument is the JSON text of the value. JSON literals for
//! strings, numbers and arrays are also valid Python literals, which is what
//! makes this encoding work for the common cases.

use pyloader_core::{Error, Result};
use serde_json::Value;

/// Builds the script that calls `function` with `args`.
///
/// # Errors
///
/// Returns [`Error::ArityMismatch`] if `args` and `parameters` differ in
/// length.
///
/// # Examples
///
/// ```
/// use pyloader_client::call_script;
/// use serde_json::json;
///
/// let params = vec!["a".to_string(), "b".to_string()];
/// let script = call_script("add", &params, &[json!(2), json!("x")]).unwrap();
/// assert_eq!(script, r#"return add(2, "x")"#);
///
/// let err = call_script("add", &params, &[json!(2)]).unwrap_err();
/// assert!(err.is_arity_error());
/// ```
pub fn call_script(function: &str, parameters: &[String], args: &[Value]) -> Result<String> {
    if args.len() != parameters.len() {
        return Err(Error::ArityMismatch {
            function: function.to_string(),
            expected: parameters.len(),
            actual: args.len(),
        });
    }

    let args = args
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("return {function}({args})"))
}
