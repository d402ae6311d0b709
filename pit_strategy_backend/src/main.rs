use anyhow::Context;
use pit_strategy_backend::{api, config::ServerConfig, ReferenceData};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pit_strategy_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ServerConfig::from_env();

    let reference = match cfg.reference_path.as_deref() {
        Some(path) => {
            tracing::info!("loading reference data from {}", path);
            ReferenceData::load(path)?
        }
        None => ReferenceData::builtin(),
    };

    let app = api::router(api::AppState {
        reference: Arc::new(reference),
    });

    let addr = cfg.socket_addr();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
