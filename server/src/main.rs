//! Gazette blog platform API server.
//!
//! Serves the public post/comment/search routes and the authenticated
//! admin moderation routes over one SQLite database.
//!
//! Usage:
//!   gazette-server --port 8788 --database gazette.db
//!
//! Admin credentials come from the GAZETTE_ADMIN_USERNAME and
//! GAZETTE_ADMIN_PASSWORD environment variables; when either is unset,
//! admin routes stay disabled and every other route works normally.

use anyhow::{Context, Result};
use clap::Parser;
use gazette_moderation::AdminCredentials;
use gazette_server::{build_router, AppState};
use gazette_store::BlogStore;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "gazette-server")]
#[command(about = "Gazette blog platform API server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8788")]
    port: u16,

    /// Path to the SQLite database file
    #[arg(short, long, default_value = "gazette.db")]
    database: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("Gazette server starting...");

    let credentials = admin_credentials_from_env();
    let store = BlogStore::open(&args.database)
        .with_context(|| format!("failed to open database at {}", args.database.display()))?;
    let app = build_router(AppState::new(store, credentials));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port))
        .await
        .with_context(|| format!("failed to bind port {}", args.port))?;
    info!("listening on port {}", args.port);
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}

/// Reads the admin pair from the environment. Unset variables become
/// empty strings, which [`AdminCredentials`] treats as unconfigured.
fn admin_credentials_from_env() -> AdminCredentials {
    let username = std::env::var("GAZETTE_ADMIN_USERNAME").unwrap_or_default();
    let password = std::env::var("GAZETTE_ADMIN_PASSWORD").unwrap_or_default();
    AdminCredentials::new(username, password)
}
