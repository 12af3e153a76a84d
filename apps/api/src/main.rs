mod config;
mod errors;
mod layout;
mod models;
mod render;
mod routes;
mod state;
mod templates;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::render::pdf::{PdfBackend, PdfToolchain};
use crate::routes::build_app;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Defaults: template={} font_size={} dial_code={}",
        config.default_template, config.default_font_size, config.default_dial_code
    );

    // PDF toolchain loads lazily unless PDF_PRELOAD is set
    let pdf = Arc::new(PdfToolchain::new(config.default_dial_code.clone()));
    if config.pdf_preload {
        match pdf.prepare().await {
            Ok(status) => info!("PDF toolchain preloaded ({:?})", status.state),
            Err(e) => warn!("PDF preload failed, will retry on first download: {e}"),
        }
    }

    let state = AppState::new(config.clone(), pdf);
    let app = build_app(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
