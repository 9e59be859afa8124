// ============================================================
// FILE PREVIEW USE CASE
// ============================================================
// Upload -> classify -> read -> decode -> truncate -> render

use std::time::{Duration, Instant};

use crate::application::use_cases::elapsed_ticker::ElapsedTicker;
use crate::application::use_cases::preview_renderer::PreviewRenderer;
use crate::application::use_cases::preview_session::PreviewSession;
use crate::domain::error::{AppError, Result};
use crate::domain::preview::{
    FileKind, LoadDiagnostics, PreviewOutcome, PreviewState, DEFAULT_PREVIEW_LIMIT,
    UNSUPPORTED_FORMAT_MESSAGE,
};
use crate::infrastructure::activity_log::ActivityLog;
use crate::infrastructure::decoders;
use crate::infrastructure::upload_source::UploadSource;

pub struct FilePreviewUseCase {
    session: PreviewSession,
    renderer: PreviewRenderer,
    logs: ActivityLog,
    preview_limit: usize,
    tick_interval: Duration,
}

impl FilePreviewUseCase {
    pub fn new(session: PreviewSession, logs: ActivityLog) -> Self {
        Self {
            session,
            renderer: PreviewRenderer::new(),
            logs,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            tick_interval: Duration::from_secs(1),
        }
    }

    pub fn with_preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = limit.max(1);
        self
    }

    pub fn with_tick_interval(mut self, period: Duration) -> Self {
        self.tick_interval = period;
        self
    }

    pub fn session(&self) -> &PreviewSession {
        &self.session
    }

    pub fn renderer(&self) -> &PreviewRenderer {
        &self.renderer
    }

    /// Preview one upload and return the published state.
    ///
    /// An unsupported suffix is the only error returned; the current preview
    /// is left untouched in that case. Read and decode failures end in an
    /// empty preview that carries the error text, and so does dropping the
    /// future mid-upload.
    pub async fn preview_upload<S: UploadSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<PreviewState> {
        let file_name = source.file_name().to_string();

        let Some(file_kind) = FileKind::from_file_name(&file_name) else {
            self.logs
                .warn("Upload", &format!("Rejected unsupported file: {}", file_name));
            return Err(AppError::UnsupportedFormat(
                UNSUPPORTED_FORMAT_MESSAGE.to_string(),
            ));
        };

        let pending = self.session.start(&file_name, file_kind);
        let upload_id = pending.upload_id();
        self.logs.info(
            "Upload",
            &format!("Loading {} as {} ({})", file_name, file_kind, upload_id),
        );

        let started = Instant::now();
        let ticker = {
            let session = self.session.clone();
            ElapsedTicker::start(self.tick_interval, move |elapsed| {
                session.tick(upload_id, elapsed);
            })
        };

        let mut diagnostics = LoadDiagnostics::new(&file_name, file_kind);
        let decoded = match source.read_bytes().await {
            Ok(bytes) => {
                diagnostics.file_size_bytes = bytes.len() as u64;
                decoders::decode(file_kind, &bytes)
            }
            Err(err) => Err(err),
        };

        let elapsed_ticks = ticker.stop();
        let mut diagnostics = diagnostics.with_upload_duration(started.elapsed());

        let (mut records, decode_error) = match decoded {
            Ok(records) => (records, None),
            Err(err) => {
                self.logs.add(
                    "ERROR",
                    "Decode",
                    &format!("Failed to decode {}: {}", file_name, err),
                );
                (Vec::new(), Some(err.to_string()))
            }
        };

        diagnostics.total_records = records.len();
        records.truncate(self.preview_limit);
        diagnostics.displayed_records = records.len();

        let render_started = Instant::now();
        let table = self.renderer.render_table(&records);
        let diagnostics = diagnostics.with_render_duration(render_started.elapsed());

        tracing::debug!(
            %upload_id,
            elapsed_ticks,
            table_bytes = table.len(),
            "Upload timer stopped"
        );
        self.logs.info("Preview", &diagnostics.summary());

        let outcome = PreviewOutcome {
            upload_id,
            records,
            diagnostics,
            decode_error,
        };

        if !pending.complete(outcome) {
            self.logs.warn(
                "Preview",
                &format!("Discarded result of {}: a newer upload started", upload_id),
            );
        }

        Ok(self.session.current())
    }
}
