//! Transform command implementation.
//!
//! Runs the loader over Python files the way a bundler would, writing the
//! generated JavaScript and declarations next to each source.

use super::common::{exit_code_for, load_options, read_source};
use crate::formatters::print_output;
use anyhow::{Context, Result};
use colored::Colorize;
use pyloader_core::cli::{ExitCode, OutputFormat};
use pyloader_core::{Error, LoaderOptions, ModuleName};
use pyloader_plugin::PythonLoader;
use pyloader_plugin::emit::sibling_path;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments of the transform command.
#[derive(Debug, Clone, Default)]
pub struct TransformArgs {
    /// Python files to transform
    pub files: Vec<PathBuf>,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Also write `<file>.js`
    pub generate_javascript: bool,
    /// Do not write `<file>.d.ts`
    pub no_type_definitions: bool,
    /// Python interpreter override
    pub python: Option<PathBuf>,
}

impl TransformArgs {
    /// Applies command-line overrides on top of file options.
    #[must_use]
    pub fn apply(&self, mut options: LoaderOptions) -> LoaderOptions {
        if self.generate_javascript {
            options.generate_javascript = true;
        }
        if self.no_type_definitions {
            options.generate_type_definitions = false;
        }
        if let Some(python) = &self.python {
            options.python = Some(python.clone());
        }
        options
    }
}

/// Outcome of transforming one file.
#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    /// Source file
    pub file: PathBuf,
    /// Module name used on the wire
    pub module: String,
    /// Size of the generated JavaScript in bytes
    pub code_bytes: usize,
    /// Size of the generated declarations in bytes
    pub declaration_bytes: usize,
    /// Files written next to the source
    pub written: Vec<PathBuf>,
}

/// Runs the transform command.
///
/// Every file is attempted. Failures are reported on stderr and the exit
/// code reflects the first failure.
///
/// # Errors
///
/// Returns an error if the options cannot be loaded or no interpreter is
/// available.
pub fn run(args: &TransformArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let options = args.apply(load_options(args.config.as_deref())?);
    let loader = PythonLoader::new(options).context("failed to set up the Python loader")?;

    info!("Transforming {} file(s)", args.files.len());

    let mut reports = Vec::with_capacity(args.files.len());
    let mut exit_code = ExitCode::SUCCESS;

    for file in &args.files {
        match transform_file(&loader, file) {
            Ok(report) => reports.push(report),
            Err(err) => {
                eprintln!("{} {}: {err:#}", "error:".red().bold(), file.display());
                if exit_code.is_success() {
                    exit_code = exit_code_for(&err);
                }
            }
        }
    }

    print_output(&reports, output_format)?;
    Ok(exit_code)
}

/// Transforms a single file with `loader`.
///
/// # Errors
///
/// Returns an error if the file is not a Python module, cannot be read, or
/// fails to transform.
pub fn transform_file(loader: &PythonLoader, file: &Path) -> Result<TransformReport> {
    let id = file.to_string_lossy();
    if !PythonLoader::handles(&id) {
        return Err(Error::InvalidArgument(format!("{id} is not a Python module")).into());
    }

    let code = read_source(file)?;
    let output = loader
        .transform(&code, &id)?
        .ok_or_else(|| Error::InvalidArgument(format!("{id} was not transformed")))?;

    let options = loader.options();
    let mut written = Vec::new();
    if options.generate_javascript {
        written.push(sibling_path(&id, ".js"));
    }
    if options.generate_type_definitions {
        written.push(sibling_path(&id, ".d.ts"));
    }

    Ok(TransformReport {
        file: file.to_path_buf(),
        module: ModuleName::from_id(&id).into_inner(),
        code_bytes: output.code.len(),
        declaration_bytes: output.meta.type_definitions.len(),
        written,
    })
}
