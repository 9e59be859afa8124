// ============================================================
// PREVIEW STATE
// ============================================================
// Immutable snapshot of what the preview page shows.
// Every transition builds a new value; nothing is merged.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FileKind, LoadDiagnostics, Record};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PreviewState {
    /// Nothing uploaded yet
    #[default]
    Idle,

    #[serde(rename_all = "camelCase")]
    Loading {
        upload_id: Uuid,
        file_name: String,
        file_kind: FileKind,
        elapsed_seconds: u64,
    },

    Ready(PreviewOutcome),
}

/// Result of one finished upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewOutcome {
    pub upload_id: Uuid,
    pub records: Vec<Record>,
    pub diagnostics: LoadDiagnostics,
    /// Set when the content could not be read or decoded
    pub decode_error: Option<String>,
}

impl PreviewState {
    pub fn loading(upload_id: Uuid, file_name: impl Into<String>, file_kind: FileKind) -> Self {
        PreviewState::Loading {
            upload_id,
            file_name: file_name.into(),
            file_kind,
            elapsed_seconds: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PreviewState::Loading { .. })
    }

    /// Records currently on display
    pub fn records(&self) -> &[Record] {
        match self {
            PreviewState::Ready(outcome) => &outcome.records,
            _ => &[],
        }
    }

    /// Same loading state with a new elapsed counter.
    /// Returns `None` when this is not the loading state of `upload_id`.
    pub fn with_elapsed(&self, id: Uuid, seconds: u64) -> Option<Self> {
        match self {
            PreviewState::Loading {
                upload_id,
                file_name,
                file_kind,
                ..
            } if *upload_id == id => Some(PreviewState::Loading {
                upload_id: *upload_id,
                file_name: file_name.clone(),
                file_kind: *file_kind,
                elapsed_seconds: seconds,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_elapsed_only_matches_own_upload() {
        let id = Uuid::new_v4();
        let state = PreviewState::loading(id, "a.csv", FileKind::Csv);

        let ticked = state.with_elapsed(id, 3).unwrap();
        assert!(matches!(ticked, PreviewState::Loading { elapsed_seconds: 3, .. }));

        assert!(state.with_elapsed(Uuid::new_v4(), 3).is_none());
        assert!(PreviewState::Idle.with_elapsed(id, 1).is_none());
    }

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_value(PreviewState::Idle).unwrap();
        assert_eq!(json["status"], "idle");

        let id = Uuid::new_v4();
        let json = serde_json::to_value(PreviewState::loading(id, "a.txt", FileKind::Lines)).unwrap();
        assert_eq!(json["status"], "loading");
        assert_eq!(json["fileName"], "a.txt");
        assert_eq!(json["elapsedSeconds"], 0);
    }
}
