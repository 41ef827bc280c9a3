//! Text extraction from uploaded documents

mod extractor;
mod lines;

pub use extractor::{PdfTextExtractor, TextExtractor};
pub use lines::{leading_lines, MAX_ARGUMENTS};
