// ============================================================
// RECORD TYPES
// ============================================================
// The normalized row shape every decoder produces

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_ALPHANUMERIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid header pattern"));

/// One normalized row of contact-like data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "nome", default)]
    pub name: String,

    #[serde(rename = "telefone", default)]
    pub phone: String,

    #[serde(rename = "endereço", default)]
    pub address: String,

    #[serde(rename = "cpf", default)]
    pub national_id: String,

    #[serde(default)]
    pub id: String,
}

impl Record {
    /// Set the value of one field
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Read the value of one field
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::Name => &self.name,
            RecordField::Phone => &self.phone,
            RecordField::Address => &self.address,
            RecordField::NationalId => &self.national_id,
            RecordField::Id => &self.id,
        }
    }

    fn slot_mut(&mut self, field: RecordField) -> &mut String {
        match field {
            RecordField::Name => &mut self.name,
            RecordField::Phone => &mut self.phone,
            RecordField::Address => &mut self.address,
            RecordField::NationalId => &mut self.national_id,
            RecordField::Id => &mut self.id,
        }
    }
}

/// The five fields of a record, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    Name,
    Phone,
    Address,
    NationalId,
    Id,
}

impl RecordField {
    pub const ALL: [RecordField; 5] = [
        RecordField::Name,
        RecordField::Phone,
        RecordField::Address,
        RecordField::NationalId,
        RecordField::Id,
    ];

    /// Column title in the preview table
    pub fn label(&self) -> &'static str {
        match self {
            RecordField::Name => "Nome",
            RecordField::Phone => "Telefone",
            RecordField::Address => "Endereço",
            RecordField::NationalId => "CPF",
            RecordField::Id => "ID",
        }
    }

    /// Resolve a source header to a field.
    /// Case, surrounding whitespace, `ç` and punctuation are ignored.
    pub fn from_header(header: &str) -> Option<Self> {
        let lowered = header.trim().to_lowercase().replace('ç', "c");
        let normalized = NON_ALPHANUMERIC_PATTERN.replace_all(&lowered, "");

        match normalized.as_ref() {
            "nome" | "name" => Some(RecordField::Name),
            "telefone" | "phone" => Some(RecordField::Phone),
            "endereco" | "address" => Some(RecordField::Address),
            "cpf" | "nationalid" => Some(RecordField::NationalId),
            "id" => Some(RecordField::Id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header_variants() {
        assert_eq!(RecordField::from_header("Nome"), Some(RecordField::Name));
        assert_eq!(RecordField::from_header("  TELEFONE "), Some(RecordField::Phone));
        assert_eq!(RecordField::from_header("Endereço"), Some(RecordField::Address));
        assert_eq!(RecordField::from_header("endereco"), Some(RecordField::Address));
        assert_eq!(RecordField::from_header("national_id"), Some(RecordField::NationalId));
        assert_eq!(RecordField::from_header("CPF"), Some(RecordField::NationalId));
        assert_eq!(RecordField::from_header("Id"), Some(RecordField::Id));
        assert_eq!(RecordField::from_header("email"), None);
    }

    #[test]
    fn test_serialized_keys() {
        let mut record = Record::default();
        record.set(RecordField::Name, "Ana");
        record.set(RecordField::Address, "Rua A");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["nome"], "Ana");
        assert_eq!(json["endereço"], "Rua A");
        assert_eq!(json["cpf"], "");
    }
}
