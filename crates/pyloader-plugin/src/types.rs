//! Transform hook result types.
//!
//! These serialize to the object shape bundlers expect back from a
//! `transform` hook.

use serde::{Deserialize, Serialize};

/// Result of transforming one Python module.
///
/// # Examples
///
/// ```
/// use pyloader_plugin::{TransformMeta, TransformOutput};
///
/// let output = TransformOutput {
///     code: "export const m = () => ({});\n".to_string(),
///     map: None,
///     module_side_effects: false,
///     meta: TransformMeta { type_definitions: "export {};\n".to_string() },
/// };
///
/// let json = serde_json::to_value(&output).unwrap();
/// assert_eq!(json["moduleSideEffects"], false);
/// assert!(json["map"].is_null());
/// assert_eq!(json["meta"]["typeDefinitions"], "export {};\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    /// Generated JavaScript module
    pub code: String,
    /// Source map; never produced
    pub map: Option<String>,
    /// Whether importing the module has side effects; always `false`
    pub module_side_effects: bool,
    /// Extra data for other plugins
    pub meta: TransformMeta,
}

/// Metadata attached to a transformed module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformMeta {
    /// TypeScript declarations for the generated module
    pub type_definitions: String,
}
