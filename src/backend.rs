//! Conversion backends behind one capability interface.
//!
//! Both CLI conversion commands run the same pipeline
//! ([`crate::convert::convert_with`]) and differ only in the
//! [`MarkdownBackend`] they pass:
//!
//! | Backend | Output name | Engine |
//! |---------|-------------|--------|
//! | [`NativeBackend`]   | `<stem>.md`        | in-process page extraction |
//! | [`ExternalBackend`] | `<stem>_docetl.md` | `docetl` subprocess |

use crate::error::ViajesError;
use crate::pipeline::assemble::assemble_document;
use crate::pipeline::external::ExternalTool;
use crate::pipeline::extract::{PageExtractor, PdfiumExtractor};
use crate::pipeline::input::file_stem;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Something that can turn a PDF into a Markdown file.
#[allow(async_fn_in_trait)]
pub trait MarkdownBackend {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Output file name (not path) for an input with the given stem.
    fn output_file_name(&self, stem: &OsStr) -> OsString;

    /// Convert `pdf_path` and write the result to `output_path`.
    async fn write_markdown(&self, pdf_path: &Path, output_path: &Path)
        -> Result<(), ViajesError>;
}

/// In-process conversion: extract page texts, assemble, write.
#[derive(Debug, Clone)]
pub struct NativeBackend<E = PdfiumExtractor> {
    extractor: Arc<E>,
}

impl Default for NativeBackend<PdfiumExtractor> {
    fn default() -> Self {
        Self::new(PdfiumExtractor::new())
    }
}

impl<E: PageExtractor> NativeBackend<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }
}

impl<E: PageExtractor> MarkdownBackend for NativeBackend<E> {
    fn name(&self) -> &'static str {
        "native"
    }

    fn output_file_name(&self, stem: &OsStr) -> OsString {
        let mut name = stem.to_os_string();
        name.push(".md");
        name
    }

    async fn write_markdown(
        &self,
        pdf_path: &Path,
        output_path: &Path,
    ) -> Result<(), ViajesError> {
        let extractor = Arc::clone(&self.extractor);
        let path = pdf_path.to_path_buf();
        let pages = tokio::task::spawn_blocking(move || extractor.extract_pages(&path))
            .await
            .map_err(|e| ViajesError::Internal(format!("Extraction task panicked: {}", e)))??;

        let blank = pages.iter().filter(|p| p.is_blank()).count();
        debug!("{} pages extracted, {} blank", pages.len(), blank);

        let markdown = assemble_document(&file_stem(pdf_path), &pages);

        // Atomic write: write to temp, then rename
        let tmp_path = output_path.with_extension("md.tmp");
        tokio::fs::write(&tmp_path, markdown.as_bytes())
            .await
            .map_err(|e| ViajesError::OutputWriteFailed {
                path: output_path.to_path_buf(),
                source: e,
            })?;
        tokio::fs::rename(&tmp_path, output_path)
            .await
            .map_err(|e| ViajesError::OutputWriteFailed {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        info!(
            "Wrote {} pages ({} bytes) to {}",
            pages.len() - blank,
            markdown.len(),
            output_path.display()
        );
        Ok(())
    }
}

/// Conversion delegated to the external `docetl` executable.
#[derive(Debug, Clone, Default)]
pub struct ExternalBackend {
    tool: ExternalTool,
}

impl ExternalBackend {
    pub fn new(tool: ExternalTool) -> Self {
        Self { tool }
    }
}

impl MarkdownBackend for ExternalBackend {
    fn name(&self) -> &'static str {
        "docetl"
    }

    fn output_file_name(&self, stem: &OsStr) -> OsString {
        let mut name = stem.to_os_string();
        name.push("_docetl.md");
        name
    }

    async fn write_markdown(
        &self,
        pdf_path: &Path,
        output_path: &Path,
    ) -> Result<(), ViajesError> {
        self.tool.run(pdf_path, output_path).await
    }
}
