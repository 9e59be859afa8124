// ============================================================
// PREVIEW DOMAIN LAYER
// ============================================================
// Core types for the upload / decode / preview cycle
// No I/O, no async

mod diagnostics;
mod file_kind;
mod preview_state;
mod record;

pub use diagnostics::LoadDiagnostics;
pub use file_kind::{FileKind, ACCEPTED_EXTENSIONS, UNSUPPORTED_FORMAT_MESSAGE};
pub use preview_state::{PreviewOutcome, PreviewState};
pub use record::{Record, RecordField};

/// Records shown per upload unless configured otherwise
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;
