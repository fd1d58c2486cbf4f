//! Types for code generation.
//!
//! [`GeneratedModule`] is the generator's output. The `*Context` structs are
//! what the Handlebars templates see.

use serde::{Deserialize, Serialize};

/// Code produced for one Python module.
///
/// # Examples
///
/// ```
/// use pyloader_codegen::GeneratedModule;
///
/// let generated = GeneratedModule {
///     code: "export const example = () => {};\n".to_string(),
///     type_declarations: None,
/// };
///
/// assert!(generated.type_declarations.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedModule {
    /// JavaScript module exporting the session factory
    pub code: String,
    /// TypeScript declarations for `code`, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_declarations: Option<String>,
}

/// Context for the `js/module` template.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleContext<'a> {
    /// Generator name for the header comment
    pub generator: &'a str,
    /// Module name as used on the wire
    pub module_name: &'a str,
    /// Identifier the factory is exported under
    pub export_name: &'a str,
    /// Package providing `PythonApiClient`
    pub runtime_package: &'a str,
    /// Module name as a string literal
    pub module_literal: String,
    /// Python source as a string literal
    pub source_literal: String,
    /// Rendered wrapper functions, each followed by a blank line
    pub functions: String,
    /// Members of the returned object, joined for the template
    pub members: String,
}

/// Context for the `js/function` template.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionContext<'a> {
    /// Python function name (used in the call script)
    pub name: &'a str,
    /// Local JavaScript binding for the wrapper
    pub binding: &'a str,
    /// Required argument count
    pub arity: usize,
    /// Stringified arguments for the call script
    pub script_args: String,
}

/// Context for the `dts/module` template.
#[derive(Debug, Clone, Serialize)]
pub struct DeclarationContext<'a> {
    /// Generator name for the header comment
    pub generator: &'a str,
    /// Module name as used on the wire
    pub module_name: &'a str,
    /// Identifier the factory is exported under
    pub export_name: &'a str,
    /// Package providing the runtime types
    pub runtime_package: &'a str,
    /// Rendered function type aliases, followed by a blank line
    pub function_types: String,
    /// Members of the factory's return type, joined for the template
    pub members: String,
}

/// Context for the `dts/function` template.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionTypeContext {
    /// Name of the type alias (`<name>Function`)
    pub type_name: String,
    /// Typed parameter list
    pub parameters: String,
}
