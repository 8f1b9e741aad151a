//! Reading the two sides of a comparison and discovering markup files.
//!
//! - Source documents: `.pdf` through the PDF text extractor, anything else is treated as
//!   already-extracted text.
//! - Converted text: decoded under candidate encodings (see [`TextEncoding`]).

mod discovery;
mod error;
mod pdf;
mod text;


pub use discovery::{SOURCE_EXTENSIONS, find_markup_files, find_source_for, is_markup_file};
pub use error::InputError;
pub use pdf::extract_pdf_text;
pub use text::{TextEncoding, decode_bytes, read_converted};

use std::path::Path;

/// Reads the source document as plain text.
///
/// Fails with [`InputError::NoExtractableText`] when nothing but whitespace comes out.
pub fn read_source(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let text = if discovery::has_extension(path, &["pdf"]) {
        extract_pdf_text(path)?
    } else {
        read_converted(path)?
    };

    if text.trim().is_empty() {
        return Err(InputError::NoExtractableText {
            path: path.to_path_buf(),
        });
    }

    Ok(text)
}
