// ============================================================
// CSV DECODER
// ============================================================
// Delimited text with a header row -> records

use csv::{ReaderBuilder, StringRecord, Trim};

use super::text_encoding::decode_text;
use crate::domain::error::AppError;
use crate::domain::preview::{Record, RecordField};

/// Delimited-text decoder
#[derive(Default)]
pub struct CsvDecoder {
    /// Fixed delimiter; `None` detects it from the content
    delimiter: Option<u8>,
}

impl CsvDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed delimiter instead of detecting one
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Decode raw upload bytes
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>, AppError> {
        let content = decode_text(bytes);
        self.decode_content(&content)
    }

    /// Decode CSV content from a string
    pub fn decode_content(&self, content: &str) -> Result<Vec<Record>, AppError> {
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(content));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::Headers)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();
        let columns = Self::map_headers(&headers);

        let mut records = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let row = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            if row.iter().all(|value| value.trim().is_empty()) {
                continue;
            }

            records.push(Self::build_record(&columns, &row));
        }

        Ok(records)
    }

    /// Field for each header position, `None` for unknown headers
    fn map_headers(headers: &StringRecord) -> Vec<Option<RecordField>> {
        headers.iter().map(RecordField::from_header).collect()
    }

    fn build_record(columns: &[Option<RecordField>], row: &StringRecord) -> Record {
        let mut record = Record::default();

        for (idx, field) in columns.iter().enumerate() {
            if let Some(field) = field {
                record.set(*field, row.get(idx).unwrap_or(""));
            }
        }

        record
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(10)
            .collect();

        if sample_lines.is_empty() {
            return b',';
        }

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_header_subset() {
        let records = CsvDecoder::new()
            .decode_content("nome,telefone\nAna,123\n")
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ana");
        assert_eq!(records[0].phone, "123");
        assert_eq!(records[0].address, "");
        assert_eq!(records[0].id, "");
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let content = "nome,cpf\n\nAna,111\n\n,\nBia,222\n";
        let records = CsvDecoder::new().decode_content(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Bia");
        assert_eq!(records[1].national_id, "222");
    }

    #[test]
    fn test_unknown_headers_and_ragged_rows() {
        let content = "id,email,nome,endereço\n1,a@x.com,Ana\n2,b@x.com,Bia,Rua B,extra\n";
        let records = CsvDecoder::new().decode_content(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].name, "Ana");
        assert_eq!(records[0].address, "");
        assert_eq!(records[1].address, "Rua B");
    }

    #[test]
    fn test_quoted_fields_keep_delimiters() {
        let content = "nome,endereço\n\"Silva, Ana\",\"Rua A, 10\"\n";
        let records = CsvDecoder::new().decode_content(content).unwrap();

        assert_eq!(records[0].name, "Silva, Ana");
        assert_eq!(records[0].address, "Rua A, 10");
    }

    #[test]
    fn test_semicolon_csv_is_detected() {
        let content = "Nome;Telefone;CPF\nAna;123;111\nBia;456;222\n";
        let records = CsvDecoder::new().decode_content(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].phone, "456");
        assert_eq!(records[1].national_id, "222");
    }

    #[test]
    fn test_windows_1252_header() {
        let bytes = b"Nome,Endere\xE7o\nJo\xE3o,Rua C\n";
        let records = CsvDecoder::new().decode(bytes).unwrap();

        assert_eq!(records[0].name, "João");
        assert_eq!(records[0].address, "Rua C");
    }

    #[test]
    fn test_empty_content() {
        assert!(CsvDecoder::new().decode_content("").unwrap().is_empty());
        assert!(CsvDecoder::new().decode_content("nome,telefone\n").unwrap().is_empty());
    }

    #[test]
    fn test_fixed_delimiter_skips_detection() {
        // Detection would pick ';' here, the fixed comma keeps one column
        let content = "nome\nAna;Bia;Caio\n";
        let records = CsvDecoder::new()
            .with_delimiter(b',')
            .decode_content(content)
            .unwrap();

        assert_eq!(records[0].name, "Ana;Bia;Caio");
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvDecoder::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvDecoder::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvDecoder::detect_delimiter("a\tb\nc\td"), b'\t');
        assert_eq!(CsvDecoder::detect_delimiter("single"), b',');
    }
}
