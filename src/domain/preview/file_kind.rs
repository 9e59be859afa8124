// ============================================================
// FILE KIND
// ============================================================
// Supported upload formats, keyed by filename suffix

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message surfaced when an upload has an unsupported suffix
pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "Formato de arquivo não suportado. Envie um arquivo CSV, Excel ou TXT.";

/// Value for the file input `accept` attribute
pub const ACCEPTED_EXTENSIONS: &str = ".csv, .xlsx, .xls, .txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileKind {
    /// Comma (or otherwise) delimited text with a header row
    Csv,
    /// Excel workbook, `.xlsx` or `.xls`
    Spreadsheet,
    /// Semicolon-separated lines without a header
    Lines,
}

impl FileKind {
    /// Classify a file by the text after its last dot, ignoring case.
    /// A name without a dot is matched as a whole.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = file_name.rsplit('.').next()?;

        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(FileKind::Csv),
            "xlsx" | "xls" => Some(FileKind::Spreadsheet),
            "txt" => Some(FileKind::Lines),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Csv => "CSV",
            FileKind::Spreadsheet => "Excel",
            FileKind::Lines => "TXT",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
