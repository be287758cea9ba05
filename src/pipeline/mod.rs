//! Pipeline stages for PDF-to-Markdown conversion.
//!
//! Each submodule implements exactly one step, so either conversion backend
//! can be tested or replaced without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! native:   input ──▶ extract ──▶ assemble ──▶ <stem>.md
//!           (path)    (pdfium)    (markers)
//!
//! external: input ──▶ external ──────────────▶ <stem>_docetl.md
//!           (path)    (docetl subprocess)
//! ```
//!
//! 1. [`input`]: validate the user-supplied path; derive the file stem
//! 2. [`extract`]: per-page text through pdfium; blocking, so callers use
//!    `spawn_blocking`
//! 3. [`assemble`]: drop blank pages, wrap the rest in page markers, prepend
//!    the title
//! 4. [`external`]: run the external converter and interpret its exit status

pub mod assemble;
pub mod external;
pub mod extract;
pub mod input;
