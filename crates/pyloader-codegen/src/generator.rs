//! JavaScript module and declaration generator.
//!
//! Turns a module name, its Python source and its parsed function list into
//! an ES module exporting a session factory, plus optional TypeScript
//! declarations for it.
//!
//! The generated factory takes a session endpoint, constructs one
//! `PythonApiClient` bound to the module, starts registration without
//! awaiting it, and returns `{ client, registration, ...functions }`. Every
//! wrapper checks its argument count, serialises each argument with
//! `JSON.stringify` and executes `return <name>(<args>)` remotely.
//!
//! Output is a pure function of the inputs: the same module name, source and
//! signatures always produce byte-identical text.
//!
//! # Examples
//!
//! ```
//! use pyloader_codegen::ModuleGenerator;
//! use pyloader_core::ModuleName;
//! use pyloader_introspector::FunctionSignature;
//!
//! let generator = ModuleGenerator::new().unwrap();
//! let functions = vec![FunctionSignature::new("add", ["a", "b"])];
//!
//! let generated = generator
//!     .generate(&ModuleName::new("example"), "def add(a, b): return a + b", &functions, true)
//!     .unwrap();
//!
//! assert!(generated.code.contains("export const example = (directorEndpoint) => {"));
//! assert!(generated.type_declarations.unwrap().contains("export type addFunction"));
//! ```

use crate::javascript::{
    is_reserved_word, require_identifier, string_literal, stringified_arguments, to_identifier,
};
use crate::template_engine::{DTS_FUNCTION, DTS_MODULE, JS_FUNCTION, JS_MODULE, TemplateEngine};
use crate::types::{
    DeclarationContext, FunctionContext, FunctionTypeContext, GeneratedModule, ModuleContext,
};
use pyloader_core::{DEFAULT_RUNTIME_PACKAGE, Error, ModuleName, Result};
use pyloader_introspector::FunctionSignature;
use std::collections::HashSet;

/// Name written into the header comment of generated files.
pub const GENERATOR_NAME: &str = "pyloader";

/// Fixed members of the object the factory returns.
const CLIENT_MEMBERS: [&str; 2] = ["client", "registration"];

/// Bindings already in scope inside the factory body.
const SCOPE_BINDINGS: [&str; 2] = ["PythonApiClient", "directorEndpoint"];

/// Names imported at the top of the generated code and declarations.
const IMPORTED_BINDINGS: [&str; 4] = [
    "AxiosResponse",
    "ExecuteResponse",
    "PythonApiClient",
    "RegisterResponse",
];

const REGISTRATION_TYPE: &str = "Promise<AxiosResponse<RegisterResponse>>";

/// Generator for per-module JavaScript wrappers and declarations.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; templates are compiled once in
/// [`ModuleGenerator::new`] and shared by every call.
#[derive(Debug)]
pub struct ModuleGenerator<'a> {
    engine: TemplateEngine<'a>,
    runtime_package: String,
}

/// A wrapper function and the local binding it is emitted under.
struct Wrapper<'f> {
    signature: &'f FunctionSignature,
    binding: String,
}

impl Wrapper<'_> {
    fn member(&self) -> String {
        if self.binding == self.signature.name {
            self.binding.clone()
        } else {
            format!("{}: {}", self.signature.name, self.binding)
        }
    }
}

/// Names resolved for one module before rendering.
struct ModulePlan<'f> {
    export_name: String,
    wrappers: Vec<Wrapper<'f>>,
}

impl<'a> ModuleGenerator<'a> {
    /// Creates a generator importing from the default runtime package.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            runtime_package: DEFAULT_RUNTIME_PACKAGE.to_string(),
        })
    }

    /// Sets the module specifier generated code imports its runtime from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the specifier is empty or
    /// contains quotes, backslashes or line breaks.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyloader_codegen::ModuleGenerator;
    ///
    /// let generator = ModuleGenerator::new().unwrap().with_runtime_package("./runtime.js").unwrap();
    /// assert_eq!(generator.runtime_package(), "./runtime.js");
    ///
    /// assert!(ModuleGenerator::new().unwrap().with_runtime_package("it's").is_err());
    /// ```
    pub fn with_runtime_package(mut self, package: impl Into<String>) -> Result<Self> {
        let package = package.into();
        if package.trim().is_empty() || package.contains(['\'', '"', '\\', '\n', '\r']) {
            return Err(Error::ValidationError {
                field: "runtime_package".to_string(),
                reason: format!("'{package}' cannot be used as a module specifier"),
            });
        }
        self.runtime_package = package;
        Ok(self)
    }

    /// Returns the runtime package specifier.
    #[must_use]
    pub fn runtime_package(&self) -> &str {
        &self.runtime_package
    }

    /// Generates the JavaScript module and, optionally, its declarations.
    ///
    /// # Errors
    ///
    /// Returns error if a function or parameter name is not an identifier,
    /// a function name collides with `client` or `registration`, or template
    /// rendering fails.
    pub fn generate(
        &self,
        module_name: &ModuleName,
        source: &str,
        functions: &[FunctionSignature],
        with_declarations: bool,
    ) -> Result<GeneratedModule> {
        let code = self.generate_code(module_name, source, functions)?;
        let type_declarations = if with_declarations {
            Some(self.generate_declarations(module_name, functions)?)
        } else {
            None
        };

        Ok(GeneratedModule {
            code,
            type_declarations,
        })
    }

    /// Generates the JavaScript module exporting the session factory.
    ///
    /// # Errors
    ///
    /// See [`ModuleGenerator::generate`].
    pub fn generate_code(
        &self,
        module_name: &ModuleName,
        source: &str,
        functions: &[FunctionSignature],
    ) -> Result<String> {
        let plan = plan_module(module_name, functions)?;

        let mut rendered_functions = String::new();
        for wrapper in &plan.wrappers {
            let context = FunctionContext {
                name: &wrapper.signature.name,
                binding: &wrapper.binding,
                arity: wrapper.signature.arity(),
                script_args: stringified_arguments(wrapper.signature.arity()),
            };
            rendered_functions.push_str(&self.engine.render(JS_FUNCTION, &context)?);
            rendered_functions.push('\n');
        }

        let members = CLIENT_MEMBERS
            .iter()
            .map(ToString::to_string)
            .chain(plan.wrappers.iter().map(Wrapper::member))
            .collect::<Vec<_>>()
            .join(",\n    ");

        let context = ModuleContext {
            generator: GENERATOR_NAME,
            module_name: module_name.as_str(),
            export_name: &plan.export_name,
            runtime_package: &self.runtime_package,
            module_literal: string_literal(module_name.as_str())?,
            source_literal: string_literal(source)?,
            functions: rendered_functions,
            members,
        };

        let code = self.engine.render(JS_MODULE, &context)?;
        tracing::debug!(
            "Generated {} bytes of JavaScript for module {} ({} functions)",
            code.len(),
            module_name,
            plan.wrappers.len()
        );

        Ok(code)
    }

    /// Generates TypeScript declarations for the module.
    ///
    /// # Errors
    ///
    /// See [`ModuleGenerator::generate`].
    pub fn generate_declarations(
        &self,
        module_name: &ModuleName,
        functions: &[FunctionSignature],
    ) -> Result<String> {
        let plan = plan_module(module_name, functions)?;

        let mut function_types = String::new();
        for wrapper in &plan.wrappers {
            let context = FunctionTypeContext {
                type_name: type_name(&wrapper.signature.name),
                parameters: typed_parameters(&wrapper.signature.parameters),
            };
            function_types.push_str(&self.engine.render(DTS_FUNCTION, &context)?);
        }
        if !function_types.is_empty() {
            function_types.push('\n');
        }

        let members = [
            "client: PythonApiClient".to_string(),
            format!("registration: {REGISTRATION_TYPE}"),
        ]
        .into_iter()
        .chain(plan.wrappers.iter().map(|w| {
            format!("{}: {}", w.signature.name, type_name(&w.signature.name))
        }))
        .collect::<Vec<_>>()
        .join(",\n  ");

        let context = DeclarationContext {
            generator: GENERATOR_NAME,
            module_name: module_name.as_str(),
            export_name: &plan.export_name,
            runtime_package: &self.runtime_package,
            function_types,
            members,
        };

        let declarations = self.engine.render(DTS_MODULE, &context)?;
        tracing::debug!(
            "Generated {} bytes of declarations for module {}",
            declarations.len(),
            module_name
        );

        Ok(declarations)
    }
}

/// Validates names and picks a binding for every wrapper.
fn plan_module<'f>(
    module_name: &ModuleName,
    functions: &'f [FunctionSignature],
) -> Result<ModulePlan<'f>> {
    let mut export_name = to_identifier(module_name.as_str());
    while IMPORTED_BINDINGS.contains(&export_name.as_str()) {
        export_name.push('_');
    }

    let mut taken: HashSet<&str> = functions.iter().map(|f| f.name.as_str()).collect();
    taken.extend(SCOPE_BINDINGS);
    let mut renamed: Vec<String> = Vec::new();

    let mut wrappers = Vec::with_capacity(functions.len());
    for signature in functions {
        require_identifier("function", &signature.name)?;
        if CLIENT_MEMBERS.contains(&signature.name.as_str()) {
            return Err(Error::ValidationError {
                field: "function".to_string(),
                reason: format!(
                    "'{}' collides with a member of the generated module",
                    signature.name
                ),
            });
        }
        for parameter in &signature.parameters {
            require_identifier("parameter", parameter)?;
        }

        let needs_rename =
            is_reserved_word(&signature.name) || SCOPE_BINDINGS.contains(&signature.name.as_str());
        let binding = if needs_rename {
            let binding = free_name(&signature.name, |candidate| {
                taken.contains(candidate) || renamed.iter().any(|r| r == candidate)
            });
            renamed.push(binding.clone());
            binding
        } else {
            signature.name.clone()
        };

        wrappers.push(Wrapper { signature, binding });
    }

    Ok(ModulePlan {
        export_name,
        wrappers,
    })
}

/// Appends `_` to `base` until the result is neither reserved nor in use.
fn free_name(base: &str, in_use: impl Fn(&str) -> bool) -> String {
    let mut candidate = format!("{base}_");
    while is_reserved_word(&candidate) || in_use(&candidate) {
        candidate.push('_');
    }
    candidate
}

fn type_name(function: &str) -> String {
    format!("{function}Function")
}

fn typed_parameters(parameters: &[String]) -> String {
    let mut seen: Vec<String> = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        let name = if is_reserved_word(parameter) {
            free_name(parameter, |candidate| {
                parameters.iter().any(|p| p == candidate) || seen.iter().any(|s| s == candidate)
            })
        } else {
            parameter.clone()
        };
        seen.push(name);
    }

    seen.iter()
        .map(|name| format!("{name}: any"))
        .collect::<Vec<_>>()
        .join(", ")
}
