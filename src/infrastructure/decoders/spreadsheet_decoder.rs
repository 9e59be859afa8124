// ============================================================
// SPREADSHEET DECODER
// ============================================================
// First worksheet of an xlsx / xls workbook -> records

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};

use crate::domain::error::AppError;
use crate::domain::preview::{Record, RecordField};

/// Spreadsheet decoder. Only the first sheet is read and its first row is
/// the header row.
#[derive(Default)]
pub struct SpreadsheetDecoder;

impl SpreadsheetDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode raw workbook bytes
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>, AppError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| AppError::ParseError(format!("Failed to open Excel file: {}", e)))?;

        let Some(range) = workbook.worksheet_range_at(0) else {
            tracing::warn!("Workbook has no worksheets");
            return Ok(Vec::new());
        };

        let range = range
            .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {}", e)))?;

        Ok(self.decode_range(&range))
    }

    /// Convert a worksheet range, using its first row as headers
    pub fn decode_range(&self, range: &Range<Data>) -> Vec<Record> {
        let mut rows = range.rows();

        let Some(header_row) = rows.next() else {
            return Vec::new();
        };

        let columns: Vec<Option<RecordField>> = header_row
            .iter()
            .map(|cell| RecordField::from_header(&cell_text(cell)))
            .collect();

        rows.filter(|row| !row.iter().all(|cell| cell_text(cell).trim().is_empty()))
            .map(|row| {
                let mut record = Record::default();
                for (idx, field) in columns.iter().enumerate() {
                    if let Some(field) = field {
                        let value = row.get(idx).map(cell_text).unwrap_or_default();
                        record.set(*field, value);
                    }
                }
                record
            })
            .collect()
    }
}

/// Text shown for a cell: strings as-is, everything else through `Display`
fn cell_text(cell: &Data) -> String {
    if cell.is_empty() {
        return String::new();
    }

    cell.as_string()
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{}", cell))
}
