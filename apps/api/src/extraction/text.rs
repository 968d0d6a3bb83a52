//! Plain-text extraction for PDF, Word and text uploads.
//!
//! Never fails: unreadable or unsupported files produce an empty string and
//! callers treat empty text as "unsupported", not as a processing error.
//! Parsing runs on the blocking pool so a parser panic or hang only costs the
//! one file.

use std::time::Duration;

use bytes::Bytes;
use tracing::warn;

/// Upper bound for parsing a single document.
const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    Docx,
    Text,
    Unsupported,
}

impl DocumentKind {
    fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Self::Pdf
        } else if lower.ends_with(".docx") {
            Self::Docx
        } else if lower.ends_with(".txt") {
            Self::Text
        } else {
            Self::Unsupported
        }
    }
}

/// Extracts text from `bytes`, dispatching on the suffix of `filename`.
///
/// NUL characters are removed; PostgreSQL `TEXT` cannot store them.
pub async fn extract_text(filename: &str, bytes: Bytes) -> String {
    let owned = filename.to_string();
    run_isolated(filename, move || extract_text_blocking(&owned, &bytes)).await
}

/// Runs `parse` on the blocking pool. A panic or timeout yields empty text.
async fn run_isolated<F>(filename: &str, parse: F) -> String
where
    F: FnOnce() -> String + Send + 'static,
{
    match tokio::time::timeout(EXTRACTION_TIMEOUT, tokio::task::spawn_blocking(parse)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Text extraction for {filename} aborted: {e}");
            String::new()
        }
        Err(_) => {
            warn!(
                "Text extraction for {filename} exceeded {}s",
                EXTRACTION_TIMEOUT.as_secs()
            );
            String::new()
        }
    }
}

fn extract_text_blocking(filename: &str, bytes: &[u8]) -> String {
    let text = match DocumentKind::from_filename(filename) {
        DocumentKind::Pdf => extract_pdf(filename, bytes),
        DocumentKind::Docx => extract_docx(filename, bytes),
        DocumentKind::Text => decode_text(bytes),
        DocumentKind::Unsupported => String::new(),
    };
    strip_nul(&text)
}

/// Removes NUL characters from text bound for the database.
pub fn strip_nul(text: &str) -> String {
    text.replace('\0', "")
}

/// Page-by-page extraction in page order, pages separated by newlines.
fn extract_pdf(filename: &str, bytes: &[u8]) -> String {
    match lopdf::Document::load_mem(bytes) {
        Ok(doc) => {
            let pages: Vec<String> = doc
                .get_pages()
                .keys()
                .map(|&page_number| match doc.extract_text(&[page_number]) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Could not read page {page_number} of {filename}: {e}");
                        String::new()
                    }
                })
                .collect();
            pages.join("\n")
        }
        Err(e) => {
            warn!("lopdf could not open {filename} ({e}), falling back to pdf-extract");
            pdf_extract::extract_text_from_mem(bytes).unwrap_or_else(|e| {
                warn!("pdf-extract could not read {filename}: {e}");
                String::new()
            })
        }
    }
}

/// Paragraph texts joined with newlines. Tables and other blocks are skipped.
fn extract_docx(filename: &str, bytes: &[u8]) -> String {
    let doc = match docx_rs::read_docx(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Could not read Word document {filename}: {e}");
            return String::new();
        }
    };

    let paragraphs: Vec<String> = doc
        .document
        .children
        .into_iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(p) => Some(paragraph_text(*p)),
            _ => None,
        })
        .collect();
    paragraphs.join("\n")
}

fn paragraph_text(paragraph: docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for child in run.children {
                if let docx_rs::RunChild::Text(t) = child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

/// UTF-8 decoding that drops invalid sequences instead of failing.
fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace(char::REPLACEMENT_CHARACTER, "")
}
