use actix_web::web;
use tracing::{info, warn};

use crate::application::use_cases::preview_session::PreviewSession;
use crate::application::FilePreviewUseCase;
use crate::infrastructure::activity_log::ActivityLog;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::upload_source::LocalFileUpload;
use crate::interfaces::http::HttpState;

/// Wire the session, use case and activity log, then preview the configured
/// startup file if there is one.
pub async fn setup(config: &AppConfig) -> web::Data<HttpState> {
    let logs = ActivityLog::new(config.log_buffer_size);

    let file_preview = FilePreviewUseCase::new(PreviewSession::new(), logs.clone())
        .with_preview_limit(config.preview_limit)
        .with_tick_interval(config.tick_interval());

    let state = web::Data::new(HttpState {
        file_preview,
        logs: logs.clone(),
        max_upload_bytes: config.max_upload_bytes,
    });

    if let Some(path) = &config.preload_file {
        preload(&state, path).await;
    }

    logs.info(
        "System",
        &format!(
            "Preview limit {} records, upload limit {} bytes",
            config.preview_limit, config.max_upload_bytes
        ),
    );

    state
}

async fn preload(state: &web::Data<HttpState>, path: &std::path::Path) {
    info!(path = %path.display(), "Previewing startup file");

    let mut source = LocalFileUpload::new(path);
    if let Err(err) = state.file_preview.preview_upload(&mut source).await {
        warn!(path = %path.display(), error = %err, "Startup file was not previewed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preview::PreviewState;

    #[tokio::test]
    async fn test_setup_without_preload_is_idle() {
        let state = setup(&AppConfig::default()).await;
        assert_eq!(state.file_preview.session().current(), PreviewState::Idle);
        assert!(!state.logs.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_setup_previews_startup_file() {
        let path = std::env::temp_dir().join(format!("tablepeek-{}.csv", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, "nome,id\nAna,1\nBia,2\n").await.unwrap();

        let config = AppConfig {
            preload_file: Some(path.clone()),
            preview_limit: 1,
            ..AppConfig::default()
        };
        let state = setup(&config).await;

        let current = state.file_preview.session().current();
        assert_eq!(current.records().len(), 1);
        assert_eq!(current.records()[0].name, "Ana");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_unsupported_startup_file_keeps_idle() {
        let config = AppConfig {
            preload_file: Some("notes.md".into()),
            ..AppConfig::default()
        };
        let state = setup(&config).await;
        assert_eq!(state.file_preview.session().current(), PreviewState::Idle);
    }
}
