//! Source formatting for generated files.
//! Formatting is delegated to an external executable (prettier by default).

use crate::error::{Error, Result};
use log::debug;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Formats generated source text before it is written.
pub trait SourceFormatter {
    /// Formats `source` as if it were the contents of `file`.
    ///
    /// The file does not need to exist; its extension selects the parser.
    fn format(&self, source: &str, file: &Path) -> Result<String>;
}

/// Pipes sources through `prettier --stdin-filepath`.
pub struct PrettierFormatter {
    command: String,
}

impl PrettierFormatter {
    pub fn new<S: Into<String>>(command: S) -> Self {
        Self { command: command.into() }
    }

    fn format_error(file: &Path, message: impl Into<String>) -> Error {
        Error::FormatError { file: file.display().to_string(), message: message.into() }
    }
}

impl SourceFormatter for PrettierFormatter {
    fn format(&self, source: &str, file: &Path) -> Result<String> {
        debug!("Formatting {} with {}", file.display(), self.command);

        let mut child = Command::new(&self.command)
            .arg("--stdin-filepath")
            .arg(file)
            .args(["--single-quote", "--trailing-comma", "all"])
            .args(["--print-width", "100", "--tab-width", "2"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Self::format_error(file, format!("cannot run {}: {}", self.command, e)))?;

        // stdin is dropped at the end of this block so the formatter sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes()).map_err(Error::IoError)?;
        }

        let output = child.wait_with_output().map_err(Error::IoError)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Self::format_error(file, stderr.trim()));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Self::format_error(file, format!("formatter returned invalid UTF-8: {e}")))
    }
}

/// Leaves sources untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFormatter;

impl SourceFormatter for NoopFormatter {
    fn format(&self, source: &str, _file: &Path) -> Result<String> {
        Ok(source.to_string())
    }
}
