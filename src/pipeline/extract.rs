//! Page-aware text extraction.
//!
//! [`PageExtractor`] is the seam between the native conversion command and
//! the PDF library. [`PdfiumExtractor`] is the production implementation;
//! tests substitute an in-memory extractor.
//!
//! ## Why blocking?
//!
//! `pdfium-render` wraps the pdfium C++ library, which keeps thread-local
//! state and is not async-safe. Callers run [`PageExtractor::extract_pages`]
//! inside `tokio::task::spawn_blocking`.

use crate::error::ViajesError;
use crate::pipeline::assemble::PageRecord;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Produces the ordered text of every page of a PDF.
pub trait PageExtractor: Send + Sync + 'static {
    /// One record per page, in document order. Text only; no images.
    fn extract_pages(&self, pdf_path: &Path) -> Result<Vec<PageRecord>, ViajesError>;
}

/// Text extraction through pdfium.
///
/// Binds to `library_path` when given, otherwise to the system libpdfium.
#[derive(Debug, Clone, Default)]
pub struct PdfiumExtractor {
    library_path: Option<PathBuf>,
}

impl PdfiumExtractor {
    /// Use the pdfium library found on the system loader path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific libpdfium file.
    pub fn with_library(path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: Some(path.into()),
        }
    }

    fn bind(&self) -> Result<Pdfium, ViajesError> {
        let bindings = match &self.library_path {
            Some(path) => Pdfium::bind_to_library(path.to_string_lossy().to_string()),
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| ViajesError::PdfiumBindingFailed(format!("{:?}", e)))?;
        Ok(Pdfium::new(bindings))
    }
}

impl PageExtractor for PdfiumExtractor {
    fn extract_pages(&self, pdf_path: &Path) -> Result<Vec<PageRecord>, ViajesError> {
        let pdfium = self.bind()?;

        let document = pdfium.load_pdf_from_file(pdf_path, None).map_err(|e| {
            let err_str = format!("{:?}", e);
            if err_str.contains("Password") || err_str.contains("password") {
                ViajesError::PasswordRequired {
                    path: pdf_path.to_path_buf(),
                }
            } else {
                ViajesError::CorruptPdf {
                    path: pdf_path.to_path_buf(),
                    detail: err_str,
                }
            }
        })?;

        let pages = document.pages();
        info!("PDF loaded: {} pages", pages.len());

        let mut records = Vec::with_capacity(pages.len() as usize);
        for (idx, page) in pages.iter().enumerate() {
            let text = page
                .text()
                .map_err(|e| ViajesError::ExtractionFailed {
                    page: idx + 1,
                    detail: format!("{:?}", e),
                })?
                .all();
            let text = normalize_line_breaks(&text);
            debug!("Extracted page {} → {} chars", idx + 1, text.len());
            records.push(PageRecord { text });
        }

        Ok(records)
    }
}

/// pdfium separates lines with `\r\n` (and occasionally bare `\r`).
fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
