use tracing_subscriber::EnvFilter;

use crate::infrastructure::bootstrap;
use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::start_server;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.log_filter);

    let state = bootstrap::setup(&config).await;

    let server = start_server(state.clone(), &config.host, config.port)?;
    state.logs.info(
        "System",
        &format!("Preview page available at http://{}:{}/", config.host, config.port),
    );

    server.await?;
    Ok(())
}

/// `RUST_LOG` wins over the configured filter
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
