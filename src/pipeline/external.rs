//! External converter invocation (`docetl`).
//!
//! The tool is run to completion with stdout/stderr captured; its exit
//! status is the only success signal. Nothing is streamed.

use crate::error::ViajesError;
use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Executable name looked up on `PATH` by default.
pub const DEFAULT_PROGRAM: &str = "docetl";

/// Install hint printed when the executable cannot be found.
pub const INSTALL_HINT: &str = "pip install docetl";

/// A command-line PDF converter invoked as
/// `<program> convert --input <pdf> --output <md> --format markdown`.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: OsString,
}

impl Default for ExternalTool {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl ExternalTool {
    /// Use `program`, either a bare name resolved through `PATH` or a path.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Display name used in messages.
    pub fn display_name(&self) -> String {
        Path::new(&self.program)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
    }

    /// Argument list passed after the program name.
    pub fn args(pdf_path: &Path, output_path: &Path) -> Vec<OsString> {
        vec![
            "convert".into(),
            "--input".into(),
            pdf_path.as_os_str().to_owned(),
            "--output".into(),
            output_path.as_os_str().to_owned(),
            "--format".into(),
            "markdown".into(),
        ]
    }

    /// Run the conversion and wait for the tool to exit.
    ///
    /// On a non-zero exit a file the tool left at `output_path` is removed,
    /// unless that file was already there before the run.
    pub async fn run(&self, pdf_path: &Path, output_path: &Path) -> Result<(), ViajesError> {
        let name = self.display_name();
        let args = Self::args(pdf_path, output_path);
        let existed_before = tokio::fs::try_exists(output_path).await.unwrap_or(false);
        debug!("Running {:?} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ViajesError::ToolNotInstalled {
                        program: name.clone(),
                        hint: INSTALL_HINT.to_string(),
                    }
                } else {
                    ViajesError::ToolSpawnFailed {
                        program: name.clone(),
                        source: e,
                    }
                }
            })?;

        if !output.status.success() {
            if !existed_before && tokio::fs::remove_file(output_path).await.is_ok() {
                warn!("Removed partial output {}", output_path.display());
            }
            return Err(ViajesError::ToolFailed {
                program: name,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        info!("{} finished: {}", name, output_path.display());
        Ok(())
    }
}
