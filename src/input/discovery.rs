use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::constants::MARKUP_EXTENSIONS;

use super::InputError;

/// Source extensions tried, in order, when pairing a markup file with its source.
pub const SOURCE_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

/// `true` for `.md` / `.markdown` (any case).
pub fn is_markup_file(path: &Path) -> bool {
    has_extension(path, &MARKUP_EXTENSIONS)
}

pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Markup files under `input`, sorted by path.
///
/// A file input must itself be markup. A directory is scanned one level deep unless
/// `recursive` is set. An empty result is not an error.
pub fn find_markup_files(input: &Path, recursive: bool) -> Result<Vec<PathBuf>, InputError> {
    if !input.exists() {
        return Err(InputError::NotFound {
            path: input.to_path_buf(),
        });
    }

    if input.is_file() {
        if is_markup_file(input) {
            return Ok(vec![input.to_path_buf()]);
        }
        return Err(InputError::NotMarkup {
            path: input.to_path_buf(),
        });
    }

    let mut walker = WalkDir::new(input).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_markup_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    debug!(input = %input.display(), recursive, found = files.len(), "Discovered markup files");

    Ok(files)
}

/// The source document for `markup`: same stem, `.pdf` then `.txt`, in `source_dir`
/// (default: the markup file's own directory).
pub fn find_source_for(markup: &Path, source_dir: Option<&Path>) -> Option<PathBuf> {
    let stem = markup.file_stem()?;
    let dir = match source_dir {
        Some(dir) => dir.to_path_buf(),
        None => markup.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    SOURCE_EXTENSIONS
        .iter()
        .map(|ext| {
            let mut name = stem.to_os_string();
            name.push(".");
            name.push(ext);
            dir.join(name)
        })
        .find(|candidate| candidate.is_file())
}
