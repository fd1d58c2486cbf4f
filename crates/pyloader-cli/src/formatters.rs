//! Output formatters for CLI commands.
//!
//! Every command produces a serializable report and hands it to
//! [`format_output`], so `--format` behaves the same everywhere.

use anyhow::Result;
use colored::Colorize;
use pyloader_core::cli::OutputFormat;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Examples
///
/// ```
/// use pyloader_cli::formatters::format_output;
/// use pyloader_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Report {
///     module: String,
///     functions: usize,
/// }
///
/// let report = Report { module: "math".to_string(), functions: 2 };
///
/// let output = format_output(&report, OutputFormat::Text)?;
/// assert_eq!(output, r#"{"module":"math","functions":2}"#);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Text => Ok(serde_json::to_string(data)?),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// Formats `data` and prints it to stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<()> {
    println!("{}", format_output(data, format)?);
    Ok(())
}

/// Human-readable output.
///
/// Renders values as an indented outline: objects as `key: value` lines,
/// arrays as `- item` lines, and multi-line strings as indented blocks.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    const INDENT: &str = "  ";

    /// Format data as a coloured outline.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();

        match &value {
            Value::Object(_) | Value::Array(_) => write_block(&mut out, &value, 0),
            scalar => out.push_str(&scalar_text(scalar)),
        }

        Ok(out.trim_end_matches('\n').to_string())
    }

    fn write_block(out: &mut String, value: &Value, depth: usize) {
        let pad = INDENT.repeat(depth);

        match value {
            Value::Object(map) if map.is_empty() => out.push_str(&format!("{pad}{{}}\n")),
            Value::Array(items) if items.is_empty() => out.push_str(&format!("{pad}[]\n")),
            Value::Object(map) => {
                for (key, item) in map {
                    let key = key.blue().bold();
                    write_entry(out, &format!("{pad}{key}:"), item, depth);
                }
            }
            Value::Array(items) => {
                for item in items {
                    write_entry(out, &format!("{pad}-"), item, depth);
                }
            }
            scalar => out.push_str(&format!("{pad}{}\n", scalar_text(scalar))),
        }
    }

    fn write_entry(out: &mut String, label: &str, value: &Value, depth: usize) {
        match value {
            Value::Object(map) if !map.is_empty() => {
                out.push_str(label);
                out.push('\n');
                write_block(out, value, depth + 1);
            }
            Value::Array(items) if !items.is_empty() => {
                out.push_str(label);
                out.push('\n');
                write_block(out, value, depth + 1);
            }
            Value::String(s) if s.contains('\n') => {
                out.push_str(label);
                out.push_str(" |\n");
                let pad = INDENT.repeat(depth + 1);
                for line in s.lines() {
                    out.push_str(&format!("{pad}{}\n", line.green()));
                }
            }
            Value::Object(_) => out.push_str(&format!("{label} {{}}\n")),
            Value::Array(_) => out.push_str(&format!("{label} []\n")),
            scalar => out.push_str(&format!("{label} {}\n", scalar_text(scalar))),
        }
    }

    fn scalar_text(value: &Value) -> String {
        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            other => other.to_string(),
        }
    }
}
