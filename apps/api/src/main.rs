mod config;
mod errors;
mod routes;
mod salary;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::salary::report::SalaryEstimator;
use crate::salary::wage_source::BlsWageSource;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Underpaid API v{}", env!("CARGO_PKG_VERSION"));

    // External wage source is best-effort; without it every profile is table-derived.
    let estimator = match BlsWageSource::from_config(&config)? {
        Some(bls) => {
            info!("BLS wage source enabled ({})", config.bls_base_url);
            SalaryEstimator::new(Some(Arc::new(bls)))
        }
        None => {
            info!("Using synthetic wage tables (mock data mode)");
            SalaryEstimator::synthetic()
        }
    };

    let state = AppState {
        estimator,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
