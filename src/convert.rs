//! Conversion entry points.
//!
//! Every conversion runs the same linear pipeline:
//!
//! 1. validate the input path (nothing is created if this fails)
//! 2. resolve the output directory, creating it if needed
//! 3. name the output file after the input stem and the backend
//! 4. let the backend write the Markdown
//!
//! The path of the written file is returned.

use crate::backend::{ExternalBackend, MarkdownBackend, NativeBackend};
use crate::error::ViajesError;
use crate::pipeline::external::ExternalTool;
use crate::pipeline::extract::PageExtractor;
use crate::pipeline::input::{file_stem_os, validate_pdf_path};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of the temporary directories created when no output directory is given.
pub const TEMP_DIR_PREFIX: &str = "viajes-";

/// Convert `pdf_path` with `backend`, writing into `output_dir` or a fresh
/// temporary directory.
pub async fn convert_with<B: MarkdownBackend>(
    backend: &B,
    pdf_path: impl AsRef<Path>,
    output_dir: Option<&Path>,
) -> Result<PathBuf, ViajesError> {
    let pdf_path = validate_pdf_path(pdf_path)?;
    info!(
        "Starting {} conversion: {}",
        backend.name(),
        pdf_path.display()
    );

    let dir = resolve_output_dir(output_dir)?;
    let output_path = dir.join(backend.output_file_name(&file_stem_os(&pdf_path)));
    debug!("Output path: {}", output_path.display());

    backend.write_markdown(&pdf_path, &output_path).await?;

    info!("Conversion complete: {}", output_path.display());
    Ok(output_path)
}

/// Native conversion through the given page extractor; writes `<stem>.md`.
pub async fn convert_native<E: PageExtractor>(
    extractor: E,
    pdf_path: impl AsRef<Path>,
    output_dir: Option<&Path>,
) -> Result<PathBuf, ViajesError> {
    convert_with(&NativeBackend::new(extractor), pdf_path, output_dir).await
}

/// Conversion through the external tool; writes `<stem>_docetl.md`.
pub async fn convert_external(
    tool: ExternalTool,
    pdf_path: impl AsRef<Path>,
    output_dir: Option<&Path>,
) -> Result<PathBuf, ViajesError> {
    convert_with(&ExternalBackend::new(tool), pdf_path, output_dir).await
}

/// Create `dir` (recursively) or, when `None`, a new uniquely named
/// temporary directory that outlives this process.
pub fn resolve_output_dir(dir: Option<&Path>) -> Result<PathBuf, ViajesError> {
    match dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| ViajesError::OutputDirFailed {
                path: dir.to_path_buf(),
                source: e,
            })?;
            Ok(dir.to_path_buf())
        }
        None => {
            let temp = tempfile::Builder::new()
                .prefix(TEMP_DIR_PREFIX)
                .tempdir()
                .map_err(|e| ViajesError::OutputDirFailed {
                    path: std::env::temp_dir(),
                    source: e,
                })?;
            let path = temp.keep();
            debug!("Created output directory {}", path.display());
            Ok(path)
        }
    }
}
