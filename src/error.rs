//! Error types for the viajes library.
//!
//! Two error types reflect the two points where things can go wrong:
//!
//! * [`ConfigError`] (**startup**): a required environment variable group is
//!   missing. Returned by [`crate::config::AppConfig::from_env`]; the binary
//!   exits before dispatching any command.
//!
//! * [`ViajesError`] (**command**): a conversion could not complete (bad
//!   input path, unreadable PDF, output not writable, external tool missing
//!   or failing). Returned from the `convert*` entry points.

use std::path::PathBuf;
use thiserror::Error;

/// A required configuration group is absent from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// At least one variable of `group` is unset or empty.
    #[error("{} must be set in .env file", .vars.join(" and "))]
    MissingGroup {
        /// Group name: `openai`, `supabase` or `langfuse`.
        group: &'static str,
        /// Every variable that belongs to the group.
        vars: Vec<&'static str>,
    },
}

impl ConfigError {
    /// Name of the configuration group that failed validation.
    pub fn group(&self) -> &'static str {
        match self {
            ConfigError::MissingGroup { group, .. } => group,
        }
    }
}

/// All fatal errors returned by the conversion commands.
#[derive(Debug, Error)]
pub enum ViajesError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// The path exists but is a directory or other non-regular file.
    #[error("'{path}' is not a regular file")]
    NotAFile { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The output directory could not be created.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
Install libpdfium system-wide or set PDFIUM_LIB_PATH=/path/to/libpdfium."
    )]
    PdfiumBindingFailed(String),

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password; encrypted documents are not supported.
    #[error("PDF '{path}' is encrypted and requires a password.")]
    PasswordRequired { path: PathBuf },

    /// Text extraction failed for a specific page.
    #[error("Text extraction failed for page {page}: {detail}")]
    ExtractionFailed { page: usize, detail: String },

    // ── External tool errors ──────────────────────────────────────────────
    /// The external converter is not on PATH (or the configured path is wrong).
    #[error("{program} is not installed or not found in PATH. Install it with: {hint}")]
    ToolNotInstalled { program: String, hint: String },

    /// The external converter ran and exited with a non-zero status.
    #[error("{program} error: {stderr}")]
    ToolFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The external converter could not be started for a reason other than
    /// being absent.
    #[error("Failed to run {program}: {source}")]
    ToolSpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ViajesError {
    /// True for failures reported by (or about) the external converter itself,
    /// whose message is already complete and user-facing.
    pub fn is_tool_error(&self) -> bool {
        matches!(
            self,
            ViajesError::ToolNotInstalled { .. } | ViajesError::ToolFailed { .. }
        )
    }
}
