use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use clickstream_core::{ClickstreamConfig, Dataset};
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding default_config.toml and an optional config.toml
    #[arg(short, long, default_value = ".")]
    config_dir: PathBuf,

    /// Load the dataset, report its size and exit without serving
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience — production uses real env vars)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config
    let config = match ClickstreamConfig::load(&args.config_dir) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "Failed to load config from {}: {}",
                args.config_dir.display(),
                e
            );
            std::process::exit(1);
        }
    };

    // Init logging; RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.service.log_level));
    fmt().with_env_filter(filter).init();

    // Load dataset before binding anything
    let start = Instant::now();
    let dataset = match Dataset::load(&config.dataset) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!("Failed to load clickstream dataset: {}", e);
            eprintln!("Failed to load clickstream dataset: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        took_ms = start.elapsed().as_millis() as u64,
        "Clickstream dataset ready"
    );

    if args.check {
        println!(
            "✅ sources: {} titles, {} entries",
            dataset.sources.len(),
            dataset.sources.total_entries()
        );
        println!(
            "✅ targets: {} titles, {} entries",
            dataset.targets.len(),
            dataset.targets.total_entries()
        );
        println!("✅ Clickstream dataset check passed");
        return Ok(());
    }

    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    clickstream_server::http::start_http_server(dataset, config, tx.subscribe()).await?;

    Ok(())
}
