// ============================================================
// DECODERS INFRASTRUCTURE LAYER
// ============================================================
// Raw upload bytes -> ordered records, one adapter per file kind

mod csv_decoder;
mod line_decoder;
mod spreadsheet_decoder;
mod text_encoding;

pub use csv_decoder::CsvDecoder;
pub use line_decoder::LineDecoder;
pub use spreadsheet_decoder::SpreadsheetDecoder;
pub use text_encoding::decode_text;

use crate::domain::error::Result;
use crate::domain::preview::{FileKind, Record};

/// Decode an upload with the adapter for its kind
pub fn decode(kind: FileKind, bytes: &[u8]) -> Result<Vec<Record>> {
    match kind {
        FileKind::Csv => CsvDecoder::new().decode(bytes),
        FileKind::Spreadsheet => SpreadsheetDecoder::new().decode(bytes),
        FileKind::Lines => Ok(LineDecoder::new().decode(bytes)),
    }
}
