use pdf_extract::extract_text_from_mem;
use regex::Regex;
use std::fs;
use std::panic;
use std::path::Path;
use std::sync::OnceLock;

/// Length of the extracted-text preview shown before the full text is requested.
pub const PREVIEW_CHARS: usize = 5_000;

/// Readers accept the `%PDF-` header anywhere in the first kilobyte.
const HEADER_SEARCH_BYTES: usize = 1024;
const PDF_MAGIC: &[u8] = b"%PDF-";

static WHITESPACE: OnceLock<Regex> = OnceLock::new();

/// True when the content type says PDF or the `%PDF-` header appears near the start.
pub fn is_pdf(content_type: Option<&str>, head: &[u8]) -> bool {
    let ct = content_type.unwrap_or("").to_ascii_lowercase();
    ct.contains("application/pdf") || has_pdf_header(head)
}

fn has_pdf_header(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(HEADER_SEARCH_BYTES)];
    head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

/// Extracts the text of every page in an in-memory PDF.
///
/// Returns an empty string when the bytes are not a PDF or cannot be parsed.
/// Scanned (image-only) documents also come back empty, so callers must treat
/// an empty result as a failed extraction.
pub fn extract_text_from_bytes(bytes: &[u8]) -> String {
    if !has_pdf_header(bytes) {
        log::warn!("Upload does not look like a PDF ({} bytes), skipping extraction", bytes.len());
        return String::new();
    }

    // pdf-extract panics on some malformed documents instead of returning an error.
    match panic::catch_unwind(|| extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => {
            log::info!("Extracted {} characters from PDF", text.chars().count());
            text
        }
        Ok(Err(e)) => {
            log::warn!("PDF text extraction failed: {}", e);
            String::new()
        }
        Err(_) => {
            log::warn!("PDF parser panicked, treating document as unreadable");
            String::new()
        }
    }
}

/// Same contract as [`extract_text_from_bytes`], reading the PDF from disk first.
pub fn extract_text_from_path(file_path: &Path) -> String {
    log::info!("Processing PDF: {}", file_path.display());

    match fs::read(file_path) {
        Ok(bytes) => extract_text_from_bytes(&bytes),
        Err(e) => {
            log::warn!("Could not read {}: {}", file_path.display(), e);
            String::new()
        }
    }
}

/// Collapses every whitespace run to a single space and trims both ends.
pub fn clean_text(text: &str) -> String {
    let re_whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap());
    re_whitespace.replace_all(text, " ").trim().to_string()
}

/// First `limit` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Preview of `text` for display, with a trailing `...` when anything was cut.
pub fn preview(text: &str, limit: usize) -> String {
    let head = truncate_chars(text, limit);
    if head.len() < text.len() {
        format!("{}...", head)
    } else {
        head.to_string()
    }
}
