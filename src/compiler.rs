//! Type declaration build for the generated barrels.
//!
//! The TypeScript compiler is an external collaborator: its diagnostics are
//! reported to the user but never fail the run.

use crate::error::Result;
use log::{debug, warn};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Prefix `tsc --listEmittedFiles` puts in front of every emitted file.
const EMITTED_FILE_PREFIX: &str = "TSFILE: ";

pub trait DeclarationCompiler {
    /// Compiles all barrel files as one program.
    ///
    /// # Returns
    /// * `Result<Vec<String>>` - Diagnostic lines to show to the user
    fn compile(&self, index_files: &[PathBuf]) -> Result<Vec<String>>;
}

/// Runs `tsc` once over every barrel.
pub struct TscCompiler {
    command: String,
    clean_sources: bool,
}

impl TscCompiler {
    pub fn new<S: Into<String>>(command: S, clean_sources: bool) -> Self {
        Self { command: command.into(), clean_sources }
    }
}

impl DeclarationCompiler for TscCompiler {
    fn compile(&self, index_files: &[PathBuf]) -> Result<Vec<String>> {
        if index_files.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Compiling {} index files with {}", index_files.len(), self.command);

        let output = match Command::new(&self.command)
            .args(["--declaration", "--allowSyntheticDefaultImports"])
            .args(["--jsx", "react-jsx", "--module", "commonjs", "--target", "es5"])
            .arg("--listEmittedFiles")
            .args(index_files)
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                warn!("Skipping type declarations, cannot run {}: {}", self.command, e);
                return Ok(vec![format!("{}: {}", self.command, e)]);
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let mut emitted = Vec::new();
        let mut diagnostics = Vec::new();
        for line in stdout.lines().chain(stderr.lines()) {
            match line.strip_prefix(EMITTED_FILE_PREFIX) {
                Some(file) => emitted.push(PathBuf::from(file.trim())),
                None if !line.trim().is_empty() => diagnostics.push(line.to_string()),
                None => {}
            }
        }
        debug!("{} emitted {} files", self.command, emitted.len());

        if self.clean_sources && output.status.success() {
            remove_compiled_sources(&emitted)?;
        }
        Ok(diagnostics)
    }
}

/// Removes the `.ts`/`.tsx` source next to every emitted `.js` file.
fn remove_compiled_sources(emitted: &[PathBuf]) -> Result<()> {
    let compiled = emitted
        .iter()
        .filter(|file| file.extension().is_some_and(|ext| ext == "js"));

    for js_file in compiled {
        for extension in ["ts", "tsx"] {
            let source = js_file.with_extension(extension);
            if !source.exists() {
                continue;
            }
            debug!("Removing compiled source {}", source.display());
            fs::remove_file(&source)?;
        }
    }
    Ok(())
}

/// Skips the declaration build.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCompiler;

impl DeclarationCompiler for NoopCompiler {
    fn compile(&self, _index_files: &[PathBuf]) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}
