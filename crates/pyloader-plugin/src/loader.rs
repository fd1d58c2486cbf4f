//! The `transform` hook.

use crate::emit::{sibling_path, write_files};
use crate::types::{TransformMeta, TransformOutput};
use pyloader_codegen::ModuleGenerator;
use pyloader_core::{LoaderOptions, ModuleName, PYTHON_EXTENSION, Result};
use pyloader_introspector::{PythonParser, SubprocessParser};
use std::fmt;

/// Bundler plugin that turns `.py` imports into remote-call modules.
///
/// Each Python file is introspected for its exported functions, and the
/// import is replaced by a generated ES module whose factory binds those
/// functions to a session endpoint.
///
/// The loader holds no mutable state; one instance can transform files from
/// several threads at once.
///
/// # Examples
///
/// ```
/// use pyloader_core::LoaderOptions;
/// use pyloader_introspector::{FunctionSignature, ParsedModule, PythonParser};
/// use pyloader_plugin::PythonLoader;
///
/// struct Fixed;
///
/// impl PythonParser for Fixed {
///     fn parse(&self, _source: &str) -> pyloader_core::Result<ParsedModule> {
///         Ok(ParsedModule::new(vec![FunctionSignature::new("add", ["a", "b"])]))
///     }
/// }
///
/// let options = LoaderOptions { generate_type_definitions: false, ..LoaderOptions::default() };
/// let loader = PythonLoader::with_parser(options, Fixed).unwrap();
///
/// assert!(loader.transform("", "src/app.ts").unwrap().is_none());
///
/// let output = loader.transform("def add(a, b): ...", "src/math.py").unwrap().unwrap();
/// assert!(output.code.contains("export const math = (directorEndpoint) => {"));
/// assert!(output.meta.type_definitions.contains("addFunction"));
/// ```
pub struct PythonLoader {
    parser: Box<dyn PythonParser>,
    generator: ModuleGenerator<'static>,
    options: LoaderOptions,
}

impl PythonLoader {
    /// Plugin name reported to the bundler.
    pub const NAME: &'static str = "vite-plugin-designer-python-loader";

    /// Creates a loader that introspects with a Python subprocess.
    ///
    /// Uses `options.python` if set, otherwise looks for `python3` or
    /// `python` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`](pyloader_core::Error::ConfigError) if
    /// the options are invalid or no interpreter can be found.
    pub fn new(options: LoaderOptions) -> Result<Self> {
        let parser = SubprocessParser::from_override(options.python.as_deref())?;
        tracing::debug!("Using Python interpreter {}", parser.interpreter().display());
        Self::with_parser(options, parser)
    }

    /// Creates a loader with a custom parser.
    ///
    /// # Errors
    ///
    /// Returns error if the options are invalid.
    pub fn with_parser(options: LoaderOptions, parser: impl PythonParser + 'static) -> Result<Self> {
        options.validate()?;
        let generator =
            ModuleGenerator::new()?.with_runtime_package(options.runtime_package.clone())?;

        Ok(Self {
            parser: Box::new(parser),
            generator,
            options,
        })
    }

    /// Returns the loader options.
    #[must_use]
    pub const fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Returns `true` if `id` names a module this loader transforms.
    #[must_use]
    pub fn handles(id: &str) -> bool {
        id.ends_with(PYTHON_EXTENSION)
    }

    /// Transforms one module.
    ///
    /// Returns `Ok(None)` for ids that are not Python files, leaving them to
    /// other plugins.
    ///
    /// # Errors
    ///
    /// Returns error if introspection fails, a function cannot be emitted,
    /// or a requested sibling file cannot be written. Sibling files are
    /// written together: on any error none of them is left behind.
    pub fn transform(&self, code: &str, id: &str) -> Result<Option<TransformOutput>> {
        if !Self::handles(id) {
            return Ok(None);
        }

        let module = self.parser.parse(code)?.into_result()?;
        let module_name = ModuleName::from_id(id);

        let generated = self
            .generator
            .generate(&module_name, code, &module.functions, true)?;
        let type_definitions = generated.type_declarations.unwrap_or_default();

        let mut files = Vec::with_capacity(2);
        if self.options.generate_javascript {
            files.push((sibling_path(id, ".js"), generated.code.as_str()));
        }
        if self.options.generate_type_definitions {
            files.push((sibling_path(id, ".d.ts"), type_definitions.as_str()));
        }
        write_files(&files)?;

        tracing::info!(
            "Transformed {} as module {} ({} functions)",
            id,
            module_name,
            module.functions.len()
        );

        Ok(Some(TransformOutput {
            code: generated.code,
            map: None,
            module_side_effects: false,
            meta: TransformMeta { type_definitions },
        }))
    }
}

impl fmt::Debug for PythonLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PythonLoader")
            .field("parser", &"dyn PythonParser")
            .field("generator", &self.generator)
            .field("options", &self.options)
            .finish()
    }
}
