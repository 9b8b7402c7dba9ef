//! Text extraction: job card documents → one ordered text stream.

use anyhow::{Context, Result};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// Extract the text of a job card.
///
/// PDFs are extracted page by page in page order; any other file is read as
/// already-extracted UTF-8 text.
pub fn extract_text(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension == "pdf" {
        extract_pdf_text(path)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read text from {}", path.display()))
    }
}

fn extract_pdf_text(path: &Path) -> Result<String> {
    let document = Document::load(path)
        .with_context(|| format!("Failed to open PDF {}", path.display()))?;

    let pages = document.get_pages();
    debug!("Extracting text from {} page(s)", pages.len());

    let mut text = String::new();
    for &page_number in pages.keys() {
        let page_text = document
            .extract_text(&[page_number])
            .with_context(|| format!("Failed to extract text from page {}", page_number))?;
        text.push_str(&page_text);
        if !text.ends_with('\n') {
            text.push('\n');
        }
    }

    Ok(text)
}
