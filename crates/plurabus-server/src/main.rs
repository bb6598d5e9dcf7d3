//! Plurabus Server
//!
//! Axum server for the plurabus lobby: validates launch forms, renders the
//! lobby, private lobby and play pages from embedded templates, and serves the
//! client bundle and game module from the asset directory.

use anyhow::Context;
use clap::Parser;
use plurabus_core::PairStringRule;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{config::Config, state::AppState};

mod config;
mod error;
mod handler;
mod pages;
mod router;
mod state;
mod util;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    let addr = config.listen;
    let state = AppState::new(config);

    if state.pair_string_rule() == PairStringRule::Legacy {
        tracing::warn!("legacy pair string check enabled: any value containing a letter or digit is accepted");
    }
    if !state.config().asset_dir.is_dir() {
        tracing::warn!(
            asset_dir = %state.config().asset_dir.display(),
            "asset directory not found; only embedded files are served under /d/"
        );
    }

    let revision = state.revision();
    let app = router::build(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Server listening on {addr}");
    tracing::info!("  - Lobby: http://{addr}/");
    tracing::info!("  - Launch form: POST http://{addr}/submit");
    tracing::info!("  - Assets: http://{addr}/d/ (game module {})", revision.script_name());

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
