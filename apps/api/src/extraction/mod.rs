//! Best-effort text extraction and the heuristics run over the extracted text.

pub mod fields;
pub mod text;

pub use fields::{extract_email, extract_name, UNKNOWN_NAME};
pub use text::{extract_text, strip_nul};
