pub mod activity_log;
pub mod bootstrap;
pub mod config;
pub mod decoders;
pub mod upload_source;
