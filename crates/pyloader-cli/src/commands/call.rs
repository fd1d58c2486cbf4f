//! Call command implementation.
//!
//! Registers a Python file with a session and calls one of its exported
//! functions, checking the name and argument count locally first.

use super::common::{load_options, read_source};
use crate::formatters::print_output;
use anyhow::{Context, Result};
use pyloader_client::{RemoteModule, call_script};
use pyloader_core::cli::{ExitCode, OutputFormat};
use pyloader_core::{Error, ModuleName, SessionEndpoint};
use pyloader_introspector::{PythonParser, SubprocessParser};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info};

/// Arguments of the call command.
#[derive(Debug, Clone)]
pub struct CallArgs {
    /// Session endpoint
    pub endpoint: SessionEndpoint,
    /// Python file defining the function
    pub file: PathBuf,
    /// Function to call
    pub function: String,
    /// Arguments as JSON text
    pub args: Vec<String>,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Python interpreter override
    pub python: Option<PathBuf>,
}

/// Parses command-line arguments as JSON values.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] naming the first argument that is not
/// valid JSON.
///
/// # Examples
///
/// ```
/// use pyloader_cli::commands::call::parse_arguments;
/// use serde_json::json;
///
/// let args = vec!["2".to_string(), r#""text""#.to_string(), "[1, null]".to_string()];
/// assert_eq!(parse_arguments(&args).unwrap(), vec![json!(2), json!("text"), json!([1, null])]);
///
/// assert!(parse_arguments(&["text".to_string()]).is_err());
/// ```
pub fn parse_arguments(args: &[String]) -> pyloader_core::Result<Vec<Value>> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| {
            serde_json::from_str(arg).map_err(|e| {
                Error::InvalidArgument(format!("argument {} is not valid JSON ({arg}): {e}", i + 1))
            })
        })
        .collect()
}

/// Runs the call command.
///
/// # Errors
///
/// Returns an error if an argument is not JSON, the function is not
/// exported, the argument count is wrong, or a request fails. Nothing is
/// sent in the first three cases.
pub async fn run(args: CallArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let options = load_options(args.config.as_deref())?;
    let values = parse_arguments(&args.args)?;

    let source = read_source(&args.file)?;
    let parser =
        SubprocessParser::from_override(args.python.as_deref().or(options.python.as_deref()))?;
    let module = parser.parse(&source)?.into_result()?;

    let module_name = ModuleName::from_id(&args.file.to_string_lossy());
    let signature = module
        .function(&args.function)
        .ok_or_else(|| Error::UnknownFunction {
            module: module_name.to_string(),
            function: args.function.clone(),
        })?;
    let script = call_script(&signature.name, &signature.parameters, &values)?;
    debug!("Call script: {}", script);

    info!("Calling {}.{} on {}", module_name, args.function, args.endpoint);

    let mut remote = RemoteModule::connect_with_contract(
        args.endpoint,
        module_name,
        source,
        module.functions,
        options.wire,
    )?;
    remote
        .wait_registered()
        .await
        .context("module registration failed")?;

    let response = remote.call(&args.function, &values).await?;

    print_output(&response, output_format)?;
    Ok(ExitCode::SUCCESS)
}
