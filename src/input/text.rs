//! Decoding converted text under an ordered list of candidate encodings.

use std::fmt;
use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use tracing::{debug, info};

use super::InputError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Bytes Windows-1252 leaves undefined.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Candidate encodings, tried in [`TextEncoding::CANDIDATES`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 without a byte order mark.
    Utf8,
    /// UTF-8 with a leading byte order mark (stripped).
    Utf8Sig,
    /// ISO-8859-1. Decodes any byte sequence.
    Latin1,
    /// Windows-1252.
    Windows1252,
}

impl TextEncoding {
    pub const CANDIDATES: [TextEncoding; 4] = [
        TextEncoding::Utf8,
        TextEncoding::Utf8Sig,
        TextEncoding::Latin1,
        TextEncoding::Windows1252,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Windows1252 => "windows-1252",
        }
    }

    /// Strict decode; `None` if `bytes` are not valid in this encoding.
    ///
    /// Latin-1 never fails on its own, but yields to Windows-1252 when the input has C1 bytes
    /// and Windows-1252 defines every one of them.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => {
                if bytes.starts_with(UTF8_BOM) {
                    return None;
                }
                std::str::from_utf8(bytes).ok().map(str::to_owned)
            }
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(str::to_owned)
            }
            TextEncoding::Latin1 => {
                if prefers_windows_1252(bytes) {
                    return None;
                }
                Some(bytes.iter().map(|&b| char::from(b)).collect())
            }
            TextEncoding::Windows1252 => {
                if bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
                    return None;
                }
                WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(|text| text.into_owned())
            }
        }
    }
}

/// `true` when `bytes` contain C1 bytes (`0x80..=0x9F`) and all of them are printable in
/// Windows-1252.
fn prefers_windows_1252(bytes: &[u8]) -> bool {
    let mut c1 = bytes
        .iter()
        .filter(|b| (0x80..=0x9F).contains(*b))
        .peekable();
    c1.peek().is_some() && c1.all(|b| !CP1252_UNDEFINED.contains(b))
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decodes with the first candidate encoding that accepts `bytes`. Latin-1 makes this total in
/// practice; `None` is kept for the strict contract of [`TextEncoding::decode`].
pub fn decode_bytes(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    TextEncoding::CANDIDATES.iter().find_map(|encoding| {
        let decoded = encoding.decode(bytes);
        if decoded.is_none() {
            debug!(encoding = %encoding, "Candidate encoding rejected");
        }
        decoded.map(|text| (text, *encoding))
    })
}

/// Reads the converted text file.
pub fn read_converted(path: &Path) -> Result<String, InputError> {
    let bytes = fs::read(path).map_err(|e| InputError::io(path, e))?;

    let (text, encoding) = decode_bytes(&bytes).ok_or_else(|| InputError::Undecodable {
        path: path.to_path_buf(),
    })?;

    info!(
        path = %path.display(),
        encoding = %encoding,
        chars = text.chars().count(),
        "Read converted text"
    );

    Ok(text)
}
