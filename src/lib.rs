//! # viajes
//!
//! Command-line front end for the viajes retrieval-augmented chat assistant.
//!
//! The crate currently provides:
//!
//! * validated configuration for the assistant's services
//!   ([`AppConfig::from_env`]), checked once at process start;
//! * a diagnostic greeting that reports which services are configured;
//! * PDF-to-Markdown conversion through two interchangeable backends.
//!
//! ## Conversion Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     validate the path is a readable regular file
//!  ├─ 2. Output    create --output-dir, or a fresh temporary directory
//!  ├─ 3a. Native   pdfium page text → drop blank pages → page markers → <stem>.md
//!  └─ 3b. External docetl convert --format markdown            → <stem>_docetl.md
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use viajes::{convert_native, AppConfig, PdfiumExtractor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let _config = AppConfig::from_env()?;
//!     let out = convert_native(PdfiumExtractor::new(), "trip.pdf", None).await?;
//!     println!("{}", out.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `viajes` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod config;
pub mod convert;
pub mod diagnostic;
pub mod error;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use backend::{ExternalBackend, MarkdownBackend, NativeBackend};
pub use config::{AppConfig, DEFAULT_LANGFUSE_HOST};
pub use convert::{convert_external, convert_native, convert_with, resolve_output_dir};
pub use diagnostic::greeting;
pub use error::{ConfigError, ViajesError};
pub use pipeline::assemble::{assemble_document, PageRecord};
pub use pipeline::external::ExternalTool;
pub use pipeline::extract::{PageExtractor, PdfiumExtractor};
