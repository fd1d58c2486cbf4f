//! Introspect command implementation.
//!
//! Shows which functions a Python file exports and their parameters,
//! exactly as the transform would see them.

use super::common::{load_options, read_source};
use crate::formatters::print_output;
use anyhow::Result;
use pyloader_core::cli::{ExitCode, OutputFormat};
use pyloader_introspector::{ParsedModule, PythonParser, SubprocessParser};
use std::path::Path;
use tracing::info;

/// Runs the introspect command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, no interpreter is found, or
/// the parser rejects the source.
pub fn run(
    file: &Path,
    python: Option<&Path>,
    config: Option<&Path>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let options = load_options(config)?;
    let parser = SubprocessParser::from_override(python.or(options.python.as_deref()))?;

    let module = introspect(&parser, file)?;
    info!(
        "{} exports {} function(s)",
        file.display(),
        module.functions.len()
    );

    print_output(&module, output_format)?;
    Ok(ExitCode::SUCCESS)
}

/// Reads `file` and parses it with `parser`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the parser rejects it.
pub fn introspect(parser: &dyn PythonParser, file: &Path) -> Result<ParsedModule> {
    let source = read_source(file)?;
    Ok(parser.parse(&source)?.into_result()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyloader_introspector::FunctionSignature;
    use std::fs;
    use tempfile::TempDir;

    struct Fixed;

    impl PythonParser for Fixed {
        fn parse(&self, source: &str) -> pyloader_core::Result<ParsedModule> {
            if source.contains("def (") {
                return Ok(ParsedModule {
                    functions: vec![],
                    error: Some("invalid syntax".to_string()),
                });
            }
            Ok(ParsedModule::new(vec![FunctionSignature::new("add", ["a", "b"])]))
        }
    }

    #[test]
    fn test_introspect_reads_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("math.py");
        fs::write(&file, "def add(a, b):\n    return a + b\n").unwrap();

        let module = introspect(&Fixed, &file).unwrap();
        assert_eq!(module.function_names().collect::<Vec<_>>(), ["add"]);
    }

    #[test]
    fn test_introspect_error_document() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("broken.py");
        fs::write(&file, "def (").unwrap();

        let err = introspect(&Fixed, &file).unwrap_err();
        assert_eq!(err.to_string(), "Import error: invalid syntax");
    }

    #[test]
    fn test_introspect_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(introspect(&Fixed, &dir.path().join("missing.py")).is_err());
    }
}
