use std::fs;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use tracing::{debug, info};

use super::InputError;

/// Extracts the text layer of a PDF.
///
/// `pdf_extract` can panic on malformed documents; a panic is reported as
/// [`InputError::Extraction`] rather than unwinding into the caller.
pub fn extract_pdf_text(path: &Path) -> Result<String, InputError> {
    let bytes = fs::read(path).map_err(|e| InputError::io(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "Extracting PDF text");

    let result = catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(&bytes)
    }));

    let text = match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            return Err(InputError::Extraction {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
        Err(_) => {
            return Err(InputError::Extraction {
                path: path.to_path_buf(),
                reason: "extractor panicked (malformed PDF)".to_string(),
            });
        }
    };

    info!(
        path = %path.display(),
        chars = text.chars().count(),
        "Extracted PDF text"
    );

    Ok(text)
}
