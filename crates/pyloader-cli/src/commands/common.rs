//! Shared helpers for CLI commands.
//!
//! Configuration loading, source reading, and mapping errors to exit codes.

use anyhow::{Context, Result};
use pyloader_core::cli::ExitCode;
use pyloader_core::{Error, LoaderOptions};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "pyloader.toml";

/// Loads loader options.
///
/// An explicit `path` must exist. Without one, [`CONFIG_FILE`] in the
/// working directory is used if present, and defaults otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or
/// fails validation.
///
/// # Examples
///
/// ```
/// use pyloader_cli::commands::common::load_options;
/// use std::io::Write;
///
/// let mut file = tempfile::NamedTempFile::new().unwrap();
/// writeln!(file, "generate_javascript = true").unwrap();
///
/// let options = load_options(Some(file.path())).unwrap();
/// assert!(options.generate_javascript);
/// assert!(options.generate_type_definitions);
/// ```
pub fn load_options(path: Option<&Path>) -> Result<LoaderOptions> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(CONFIG_FILE);
            if !default.is_file() {
                tracing::debug!("No {} found, using default options", CONFIG_FILE);
                return Ok(LoaderOptions::default());
            }
            default
        }
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let options = parse_options(&text)
        .with_context(|| format!("invalid config file {}", path.display()))?;

    tracing::debug!("Loaded options from {}", path.display());
    Ok(options)
}

/// Parses and validates options from TOML text.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the text is not valid TOML for
/// [`LoaderOptions`] or fails validation.
pub fn parse_options(text: &str) -> pyloader_core::Result<LoaderOptions> {
    let options: LoaderOptions = toml::from_str(text).map_err(|e| Error::ConfigError {
        message: e.to_string(),
    })?;
    options.validate()?;
    Ok(options)
}

/// Reads a source file as UTF-8.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn read_source(path: &Path) -> pyloader_core::Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Picks the exit code for a failed command.
///
/// Looks through the whole error chain for a [`pyloader_core::Error`].
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<Error>())
        .map_or(ExitCode::ERROR, |err| match err {
            Error::Introspection { .. } | Error::ParserProcess { .. } => {
                ExitCode::INTROSPECTION_ERROR
            }
            Error::Transport { .. } => ExitCode::SERVER_ERROR,
            Error::ArityMismatch { .. }
            | Error::UnknownFunction { .. }
            | Error::ValidationError { .. }
            | Error::ConfigError { .. }
            | Error::InvalidArgument(_) => ExitCode::INVALID_INPUT,
            _ => ExitCode::ERROR,
        })
}
