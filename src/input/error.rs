use std::path::PathBuf;
use thiserror::Error;

/// Failures reading one side of a comparison, or finding markup files.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PDF could not be parsed.
    #[error("failed to extract text from {path}: {reason}")]
    Extraction { path: PathBuf, reason: String },

    /// The source parsed but contains no text.
    #[error("no extractable text in {path}")]
    NoExtractableText { path: PathBuf },

    /// None of the candidate encodings could decode the file.
    #[error("could not decode {path} with any supported encoding")]
    Undecodable { path: PathBuf },

    #[error("not a markdown file: {path}")]
    NotMarkup { path: PathBuf },
}

impl InputError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            InputError::NotFound { path }
        } else {
            InputError::Io { path, source }
        }
    }
}
