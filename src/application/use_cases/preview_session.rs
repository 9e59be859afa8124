use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::domain::error::AppError;
use crate::domain::preview::{FileKind, LoadDiagnostics, PreviewOutcome, PreviewState};

/// Error text published when an upload is dropped before it finishes
pub const CANCELLED_UPLOAD_MESSAGE: &str = "Upload cancelled before it finished";

/// Holder of the current preview. Each transition swaps in a whole new
/// `PreviewState`; readers get clones.
#[derive(Clone, Default)]
pub struct PreviewSession {
    state: Arc<Mutex<PreviewState>>,
}

impl PreviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> PreviewState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Enter the loading state for a new upload and return its id
    pub fn begin(&self, file_name: &str, file_kind: FileKind) -> Uuid {
        let upload_id = Uuid::new_v4();
        self.replace(PreviewState::loading(upload_id, file_name, file_kind));
        upload_id
    }

    /// Like `begin`, but the returned guard ends the loading state even
    /// when the upload is dropped before `PendingUpload::complete` runs.
    pub fn start(&self, file_name: &str, file_kind: FileKind) -> PendingUpload {
        let upload_id = self.begin(file_name, file_kind);
        PendingUpload {
            session: self.clone(),
            upload_id,
            file_name: file_name.to_string(),
            file_kind,
            finished: false,
        }
    }

    /// Update the elapsed counter if `upload_id` is still loading
    pub fn tick(&self, upload_id: Uuid, elapsed_seconds: u64) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match state.with_elapsed(upload_id, elapsed_seconds) {
            Some(next) => {
                *state = next;
                true
            }
            None => false,
        }
    }

    /// Publish a finished upload. Ignored when a newer upload has started
    /// since, so the most recently started upload always wins.
    pub fn complete(&self, outcome: PreviewOutcome) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let still_current = matches!(
            &*state,
            PreviewState::Loading { upload_id, .. } if *upload_id == outcome.upload_id
        );

        if still_current {
            *state = PreviewState::Ready(outcome);
        }
        still_current
    }

    fn replace(&self, next: PreviewState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

/// An upload that has published `Loading` and still owes a `Ready`.
///
/// Dropping it unfinished publishes an empty preview carrying
/// `CANCELLED_UPLOAD_MESSAGE`, unless a newer upload has taken over.
pub struct PendingUpload {
    session: PreviewSession,
    upload_id: Uuid,
    file_name: String,
    file_kind: FileKind,
    finished: bool,
}

impl PendingUpload {
    pub fn upload_id(&self) -> Uuid {
        self.upload_id
    }

    /// Publish the outcome; `false` when a newer upload started since
    pub fn complete(mut self, outcome: PreviewOutcome) -> bool {
        self.finished = true;
        self.session.complete(outcome)
    }
}

impl Drop for PendingUpload {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        let error = AppError::IoError(CANCELLED_UPLOAD_MESSAGE.to_string());
        let outcome = PreviewOutcome {
            upload_id: self.upload_id,
            records: Vec::new(),
            diagnostics: LoadDiagnostics::new(&self.file_name, self.file_kind),
            decode_error: Some(error.to_string()),
        };

        if self.session.complete(outcome) {
            tracing::warn!(upload_id = %self.upload_id, file = %self.file_name, "Upload cancelled");
        }
    }
}
