pub mod elapsed_ticker;
pub mod file_preview;
pub mod preview_renderer;
pub mod preview_session;
