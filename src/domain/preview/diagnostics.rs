// ============================================================
// LOAD DIAGNOSTICS
// ============================================================
// Observational timing and size data for one upload

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::FileKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadDiagnostics {
    pub file_name: String,

    pub file_kind: FileKind,

    /// Bytes actually read from the upload
    pub file_size_bytes: u64,

    /// Upload start until decode completion
    pub upload_duration_seconds: f64,

    /// Time spent rendering the truncated table
    pub render_duration_seconds: f64,

    /// Records produced by the decoder before truncation
    pub total_records: usize,

    /// Records kept for display
    pub displayed_records: usize,
}

impl LoadDiagnostics {
    pub fn new(file_name: impl Into<String>, file_kind: FileKind) -> Self {
        Self {
            file_name: file_name.into(),
            file_kind,
            file_size_bytes: 0,
            upload_duration_seconds: 0.0,
            render_duration_seconds: 0.0,
            total_records: 0,
            displayed_records: 0,
        }
    }

    pub fn with_upload_duration(mut self, elapsed: Duration) -> Self {
        self.upload_duration_seconds = elapsed.as_secs_f64();
        self
    }

    pub fn with_render_duration(mut self, elapsed: Duration) -> Self {
        self.render_duration_seconds = elapsed.as_secs_f64();
        self
    }

    /// One-line summary used in logs
    pub fn summary(&self) -> String {
        format!(
            "{} ({}): {} bytes, {}/{} records, upload {:.3}s, render {:.3}s",
            self.file_name,
            self.file_kind,
            self.file_size_bytes,
            self.displayed_records,
            self.total_records,
            self.upload_duration_seconds,
            self.render_duration_seconds
        )
    }
}
