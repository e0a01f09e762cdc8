use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use practica_api::config;
use practica_api::state::{self, AppState};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var_os("PRACTICA_LOG_JSON").is_some() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = config::resolve_config()?;
    let store = state::open_store(&config.backend).await?;
    let state = AppState::new(store);

    if config.seed_demo_data {
        state.service.seed_sample_professionals().await?;
    }

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        backend = config.backend.kind(),
        "practica listening"
    );

    axum::serve(listener, practica_api::router(state)).await?;
    Ok(())
}
