//! Document assembly: turn extracted page records into the final Markdown.
//!
//! ```text
//! # <stem>
//!
//! <!-- PAGE 1 START -->
//!
//! <page 1 text>
//!
//! <!-- PAGE 1 END -->
//! <!-- PAGE 3 START -->
//! ...
//! ```
//!
//! Blank pages are dropped, but surviving pages keep their original
//! 1-based index in the markers.

use tracing::debug;

/// Text extracted from one PDF page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRecord {
    pub text: String,
}

impl PageRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// True when the page carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Wrap one page's text in start/end markers carrying `page_num`.
pub fn wrap_page(page_num: usize, text: &str) -> String {
    format!("<!-- PAGE {page_num} START -->\n\n{text}\n\n<!-- PAGE {page_num} END -->\n")
}

/// Assemble the title line and all non-blank pages into one document.
pub fn assemble_document(stem: &str, pages: &[PageRecord]) -> String {
    let title = format!("# {stem}\n\n");

    let blocks: Vec<String> = pages
        .iter()
        .enumerate()
        .filter_map(|(idx, page)| {
            let page_num = idx + 1;
            if page.is_blank() {
                debug!("Skipping blank page {}", page_num);
                None
            } else {
                Some(wrap_page(page_num, &page.text))
            }
        })
        .collect();

    title + &blocks.join("\n")
}
