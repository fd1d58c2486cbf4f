//! pyloader CLI.
//!
//! Command-line front end for the Python loader: transform Python files
//! into remote-call JavaScript modules, inspect what they export, and talk
//! to a Python session directly.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `transform` - Generate `<file>.js` / `<file>.d.ts` next to Python files
//! - `introspect` - Show the functions a Python file exports
//! - `register` - Upload a module's source to a session
//! - `execute` - Run a script in a registered module
//! - `call` - Register a file and call one of its functions
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Write math.py.js and math.py.d.ts
//! pyloader transform src/math.py --generate-javascript
//!
//! # Call add(2, 3) on a running session
//! pyloader call --endpoint localhost:80 src/math.py add 2 3
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use pyloader_cli::commands::{
    self, call::CallArgs, common::exit_code_for, transform::TransformArgs,
};
use pyloader_core::SessionEndpoint;
use pyloader_core::cli::{ExitCode, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Turn Python modules into JavaScript that calls them on a remote session.
#[derive(Parser, Debug)]
#[command(name = "pyloader")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform Python files as the bundler plugin would.
    ///
    /// Options come from `pyloader.toml` in the working directory (or
    /// `--config`); flags override them.
    Transform {
        /// Python files to transform
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Configuration file (default: ./pyloader.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also write `<file>.js`
        #[arg(long)]
        generate_javascript: bool,

        /// Do not write `<file>.d.ts`
        #[arg(long)]
        no_type_definitions: bool,

        /// Python interpreter used for introspection
        #[arg(long, env = "PYLOADER_PYTHON")]
        python: Option<PathBuf>,
    },

    /// Show the functions a Python file exports.
    Introspect {
        /// Python file to inspect
        file: PathBuf,

        /// Configuration file (default: ./pyloader.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Python interpreter used for introspection
        #[arg(long, env = "PYLOADER_PYTHON")]
        python: Option<PathBuf>,
    },

    /// Register a Python file's source with a session.
    Register {
        /// Session endpoint (`host:port`)
        #[arg(long, env = "PYLOADER_ENDPOINT")]
        endpoint: SessionEndpoint,

        /// Python file to register
        file: PathBuf,

        /// Module name (default: file stem)
        #[arg(long)]
        module: Option<String>,

        /// Configuration file (default: ./pyloader.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Execute a script in a registered module.
    Execute {
        /// Session endpoint (`host:port`)
        #[arg(long, env = "PYLOADER_ENDPOINT")]
        endpoint: SessionEndpoint,

        /// Module to execute in
        #[arg(long)]
        module: String,

        /// Python script, e.g. `return add(2, 3)`
        script: String,
    },

    /// Register a Python file and call one of its functions.
    ///
    /// Arguments are JSON values: `2`, `"text"`, `[1, 2]`.
    Call {
        /// Session endpoint (`host:port`)
        #[arg(long, env = "PYLOADER_ENDPOINT")]
        endpoint: SessionEndpoint,

        /// Python file defining the function
        file: PathBuf,

        /// Function to call
        function: String,

        /// Arguments as JSON values
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,

        /// Configuration file (default: ./pyloader.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Python interpreter used for introspection
        #[arg(long, env = "PYLOADER_PYTHON")]
        python: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let exit_code = match execute_command(cli.command, output_format).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging.
///
/// `--verbose` forces debug level; otherwise `RUST_LOG` is honoured with
/// `info` as the fallback. Logs go to stderr so reports on stdout stay
/// machine-readable.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Routes a parsed command to its handler.
async fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Transform {
            files,
            config,
            generate_javascript,
            no_type_definitions,
            python,
        } => {
            let args = TransformArgs {
                files,
                config,
                generate_javascript,
                no_type_definitions,
                python,
            };
            commands::transform::run(&args, output_format)
        }
        Commands::Introspect {
            file,
            config,
            python,
        } => commands::introspect::run(
            &file,
            python.as_deref(),
            config.as_deref(),
            output_format,
        ),
        Commands::Register {
            endpoint,
            file,
            module,
            config,
        } => {
            commands::register::run(endpoint, &file, module, config.as_deref(), output_format)
                .await
        }
        Commands::Execute {
            endpoint,
            module,
            script,
        } => commands::execute::run(endpoint, module, &script, output_format).await,
        Commands::Call {
            endpoint,
            file,
            function,
            args,
            config,
            python,
        } => {
            let args = CallArgs {
                endpoint,
                file,
                function,
                args,
                config,
                python,
            };
            commands::call::run(args, output_format).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
