//! Execute command implementation.
//!
//! Runs an arbitrary script in a module that is already registered with a
//! session.

use crate::formatters::print_output;
use anyhow::Result;
use pyloader_client::PythonApiClient;
use pyloader_core::SessionEndpoint;
use pyloader_core::cli::{ExitCode, OutputFormat};
use tracing::info;

/// Runs the execute command.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn run(
    endpoint: SessionEndpoint,
    module: String,
    script: &str,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!("Executing script in {} on {}", module, endpoint);

    let client = PythonApiClient::new(endpoint, module, String::new())?;
    let response = client.execute_script(script).await?;

    print_output(&response, output_format)?;
    Ok(ExitCode::SUCCESS)
}
