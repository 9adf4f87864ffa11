mod error;
mod server;
mod source;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use shared::Config;

#[derive(Parser)]
#[command(name = "briefing-server")]
#[command(about = "Aggregation server backing the daily briefing view")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8787")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let state = server::AppState::new(&config)?;
    let app = server::router(state);

    let addr = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Briefing server listening on {}", addr);
    info!("Endpoints: POST /api/briefing, POST /api/calendar");

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
