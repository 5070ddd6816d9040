// Household Ledger - Web Server
// REST API with Axum over the same SQLite ledger the CLI uses

use anyhow::{Context, Result};
use clap::Parser;
use household_ledger::api::{router, AppState};
use household_ledger::{LedgerStore, ServerConfig};
use log::info;
use tower_http::cors::CorsLayer;

#[derive(Parser)]
#[command(name = "ledger-server", version, about = "JSON API for the household ledger")]
struct Cli {
    #[command(flatten)]
    server: ServerConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let db_path = &cli.server.ledger.db_path;

    let store = LedgerStore::open(db_path)
        .with_context(|| format!("Failed to open ledger at {}", db_path.display()))?;

    let app = router(AppState::new(store)).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&cli.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", cli.server.bind_addr))?;

    info!("🚀 Ledger API listening on http://{}", cli.server.bind_addr);
    info!("   Database: {}", db_path.display());

    axum::serve(listener, app).await.context("Failed to start server")?;

    Ok(())
}
