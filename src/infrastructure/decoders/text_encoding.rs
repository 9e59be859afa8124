// ============================================================
// TEXT ENCODING
// ============================================================
// Turn uploaded bytes into text before delimited decoding

use encoding_rs::{UTF_8, WINDOWS_1252};

/// Decode uploaded bytes as text.
///
/// A byte order mark selects the encoding when present. Otherwise UTF-8 is
/// tried first and Windows-1252 is used when the bytes are not valid UTF-8,
/// which is what spreadsheet tools on Windows export by default.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }

    let (text, encoding, _) = WINDOWS_1252.decode(bytes);
    tracing::debug!(encoding = encoding.name(), "Upload is not UTF-8, using fallback encoding");
    text.into_owned()
}
