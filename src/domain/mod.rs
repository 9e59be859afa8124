pub mod error;

// Upload / decode / preview types
pub mod preview;
