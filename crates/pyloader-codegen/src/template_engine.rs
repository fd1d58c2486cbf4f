//! Template engine for code generation using Handlebars.
//!
//! Wraps Handlebars with the built-in JavaScript and declaration templates
//! pre-registered. Rendering is strict (missing variables fail) and does not
//! HTML-escape, since the output is source code.
//!
//! # Examples
//!
//! ```
//! use pyloader_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greeting", "// {{name}} <{{kind}}>").unwrap();
//!
//! let out = engine.render("greeting", &json!({"name": "add", "kind": "a & b"})).unwrap();
//! assert_eq!(out, "// add <a & b>");
//! ```

use handlebars::Handlebars;
use pyloader_core::{Error, Result};
use serde::Serialize;

/// Generated JavaScript module (factory + wrappers).
pub const JS_MODULE: &str = "js/module";
/// One async wrapper function inside the JavaScript module.
pub const JS_FUNCTION: &str = "js/function";
/// TypeScript declarations for the generated module.
pub const DTS_MODULE: &str = "dts/module";
/// One function type alias inside the declarations.
pub const DTS_FUNCTION: &str = "dts/function";

/// Template engine for code generation.
///
/// This type is `Send` and `Sync`; one engine can serve every file of a
/// build.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails (should not happen
    /// with valid built-in templates).
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_builtin_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    fn register_builtin_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        let builtin = [
            (JS_MODULE, include_str!("../templates/js/module.js.hbs")),
            (JS_FUNCTION, include_str!("../templates/js/function.js.hbs")),
            (DTS_MODULE, include_str!("../templates/dts/module.d.ts.hbs")),
            (DTS_FUNCTION, include_str!("../templates/dts/function.d.ts.hbs")),
        ];

        for (name, template) in builtin {
            handlebars
                .register_template_string(name, template)
                .map_err(|e| Error::Template {
                    message: format!("Failed to register {name} template: {e}"),
                })?;
        }

        Ok(())
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - A variable referenced by the template is missing
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::Template {
                message: format!("Rendering '{template_name}' failed: {e}"),
            })
    }

    /// Registers a custom template, replacing any template of that name.
    ///
    /// # Errors
    ///
    /// Returns error if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::Template {
                message: format!("Failed to register template '{name}': {e}"),
            })
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}
