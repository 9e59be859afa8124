// ============================================================
// LINE DECODER
// ============================================================
// Headerless `name;phone;address;cpf;id` lines -> records

use super::text_encoding::decode_text;
use crate::domain::preview::{Record, RecordField};

const FIELD_SEPARATOR: char = ';';

#[derive(Default)]
pub struct LineDecoder;

impl LineDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode raw upload bytes. Never fails: any text yields records.
    pub fn decode(&self, bytes: &[u8]) -> Vec<Record> {
        let text = decode_text(bytes);
        self.decode_content(&text)
    }

    pub fn decode_content(&self, content: &str) -> Vec<Record> {
        content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .map(Self::parse_line)
            .collect()
    }

    /// Positional fields; missing ones stay empty, extra ones are ignored
    fn parse_line(line: &str) -> Record {
        let mut record = Record::default();

        for (field, value) in RecordField::ALL.iter().zip(line.split(FIELD_SEPARATOR)) {
            record.set(*field, value.trim());
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_line() {
        let records = LineDecoder::new().decode_content("Ana;123;Rua A;111;1\n");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            Record {
                name: "Ana".to_string(),
                phone: "123".to_string(),
                address: "Rua A".to_string(),
                national_id: "111".to_string(),
                id: "1".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let records = LineDecoder::new().decode_content("Ana;123\nBia");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].phone, "123");
        assert_eq!(records[0].address, "");
        assert_eq!(records[0].id, "");
        assert_eq!(records[1].name, "Bia");
        assert_eq!(records[1].phone, "");
    }

    #[test]
    fn test_blank_and_crlf_lines() {
        let content = "Ana;1;R;9;1\r\n\r\n   \nBia;2;S;8;2\r\n";
        let records = LineDecoder::new().decode_content(content);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[1].id, "2");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let records = LineDecoder::new().decode_content("Ana;1;R;9;1;surplus;more");
        assert_eq!(records[0].id, "1");
    }

    #[test]
    fn test_empty_file() {
        assert!(LineDecoder::new().decode(b"").is_empty());
    }
}
