pub mod use_cases;

pub use use_cases::file_preview::FilePreviewUseCase;
pub use use_cases::preview_renderer::PreviewRenderer;
pub use use_cases::preview_session::PreviewSession;
