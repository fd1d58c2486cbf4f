//! Register command implementation.
//!
//! Uploads a Python file's source to a session under its module name.

use super::common::{load_options, read_source};
use crate::formatters::print_output;
use anyhow::Result;
use pyloader_client::PythonApiClient;
use pyloader_core::cli::{ExitCode, OutputFormat};
use pyloader_core::{ModuleName, SessionEndpoint};
use std::path::Path;
use tracing::info;

/// Runs the register command.
///
/// The module name defaults to the file stem. The source field name is
/// taken from the `[wire]` table of the configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the request fails.
pub async fn run(
    endpoint: SessionEndpoint,
    file: &Path,
    module: Option<String>,
    config: Option<&Path>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let options = load_options(config)?;
    let source = read_source(file)?;
    let module = module.map_or_else(
        || ModuleName::from_id(&file.to_string_lossy()),
        ModuleName::new,
    );

    info!("Registering {} as {} on {}", file.display(), module, endpoint);

    let client = PythonApiClient::with_contract(endpoint, module, source, options.wire)?;
    let response = client.register().await?;

    print_output(&response, output_format)?;
    Ok(ExitCode::SUCCESS)
}
