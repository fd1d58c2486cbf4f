//! Python parser adapters.
//!
//! [`PythonParser`] is the seam between the transform and whatever knows how
//! to read Python: the default [`SubprocessParser`] shells out to a real
//! interpreter running the bundled `parse.py` helper, but any strategy
//! (embedded parser, RPC, fixed fixtures in tests) can stand in.
//!
//! # Examples
//!
//! ```no_run
//! use pyloader_introspector::{PythonParser, SubprocessParser};
//!
//! # fn example() -> pyloader_core::Result<()> {
//! let parser = SubprocessParser::detect()?;
//! let module = parser.parse("__all__ = ['add']\ndef add(a, b):\n    return a + b\n")?;
//! assert_eq!(module.functions[0].parameters, ["a", "b"]);
//! # Ok(())
//! # }
//! ```

use crate::types::ParsedModule;
use pyloader_core::{Error, Result};
use std::borrow::Cow;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use tracing::debug;

/// Source of the bundled introspection helper.
pub const PARSE_SCRIPT: &str = include_str!("../python_support/parse.py");

/// Interpreters tried, in order, when none is configured.
const INTERPRETER_CANDIDATES: [&str; 2] = ["python3", "python"];

/// Turns Python source text into a [`ParsedModule`].
///
/// Implementations must not keep state between calls; hosts may parse many
/// files concurrently through one parser.
pub trait PythonParser: Send + Sync {
    /// Parses `source` and returns its exported functions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Introspection`] when the source cannot be parsed, or
    /// [`Error::ParserProcess`] when the parser itself could not run.
    fn parse(&self, source: &str) -> Result<ParsedModule>;
}

impl<T: PythonParser + ?Sized> PythonParser for Arc<T> {
    fn parse(&self, source: &str) -> Result<ParsedModule> {
        (**self).parse(source)
    }
}

impl<T: PythonParser + ?Sized> PythonParser for Box<T> {
    fn parse(&self, source: &str) -> Result<ParsedModule> {
        (**self).parse(source)
    }
}

/// Parser that runs an external interpreter.
///
/// The interpreter is invoked as `<interpreter> [args...] -c <script>` with
/// the source on stdin, and must print one JSON document to stdout.
///
/// # Examples
///
/// ```
/// use pyloader_introspector::SubprocessParser;
///
/// let parser = SubprocessParser::new("/usr/bin/python3").with_arg("-I");
/// assert_eq!(parser.interpreter().to_str(), Some("/usr/bin/python3"));
/// ```
#[derive(Debug, Clone)]
pub struct SubprocessParser {
    interpreter: PathBuf,
    args: Vec<String>,
    script: Cow<'static, str>,
}

impl SubprocessParser {
    /// Creates a parser for the given interpreter using the bundled helper.
    #[must_use]
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            args: Vec::new(),
            script: Cow::Borrowed(PARSE_SCRIPT),
        }
    }

    /// Locates `python3` (then `python`) on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if no interpreter is found.
    pub fn detect() -> Result<Self> {
        INTERPRETER_CANDIDATES
            .iter()
            .find_map(|name| which::which(name).ok())
            .map(Self::new)
            .ok_or_else(|| Error::ConfigError {
                message: format!(
                    "no Python interpreter found on PATH (tried {})",
                    INTERPRETER_CANDIDATES.join(", ")
                ),
            })
    }

    /// Uses `interpreter` if given, otherwise falls back to [`Self::detect`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if no interpreter is configured and
    /// none is found on `PATH`.
    pub fn from_override(interpreter: Option<&Path>) -> Result<Self> {
        interpreter.map_or_else(Self::detect, |path| Ok(Self::new(path)))
    }

    /// Adds an interpreter argument placed before `-c`.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Replaces the helper script passed to `-c`.
    #[must_use]
    pub fn with_script(mut self, script: impl Into<Cow<'static, str>>) -> Self {
        self.script = script.into();
        self
    }

    /// Returns the interpreter path.
    #[must_use]
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    fn process_error(&self, message: impl std::fmt::Display, source: Option<std::io::Error>) -> Error {
        Error::ParserProcess {
            message: format!("{}: {message}", self.interpreter.display()),
            source,
        }
    }
}

impl PythonParser for SubprocessParser {
    fn parse(&self, source: &str) -> Result<ParsedModule> {
        debug!(
            "Introspecting {} bytes of Python source with {}",
            source.len(),
            self.interpreter.display()
        );

        let mut child = Command::new(&self.interpreter)
            .args(&self.args)
            .arg("-c")
            .arg(self.script.as_ref())
            .env("PYTHONIOENCODING", "utf-8")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.process_error("failed to start interpreter", Some(e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.process_error("stdin was not captured", None))?;

        // Feed stdin from a second thread so a chatty child cannot fill its
        // stdout pipe while we are still writing.
        let (written, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(source.as_bytes()));
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(self.process_error("failed to write source", Some(e))),
            Err(_) => return Err(self.process_error("stdin writer panicked", None)),
        }

        let output = output.map_err(|e| self.process_error("failed to wait for interpreter", Some(e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.process_error(
                format!("exited with {}: {}", output.status, stderr.trim()),
                None,
            ));
        }

        let module: ParsedModule = serde_json::from_slice(&output.stdout)
            .map_err(|e| self.process_error(format!("unreadable parser output: {e}"), None))?;

        let module = module.into_result()?;
        debug!("Parser reported {} exported functions", module.functions.len());

        Ok(module)
    }
}
