//! splitd - bill splitting daemon
//!
//! Serves receipt scanning and split calculation over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use split_common::extraction::{GeminiExtractor, ReceiptExtractor};
use split_common::SplitConfig;
use splitd::server::{self, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "splitd")]
#[command(about = "Receipt bill splitting daemon", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Config file (overrides $SPLIT_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address (overrides [server] bind)
    #[arg(long)]
    bind: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = SplitConfig::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("splitd v{} starting", env!("CARGO_PKG_VERSION"));

    // The blocking HTTP client owns its own runtime, so it is built and
    // dropped outside of tokio.
    let extractor: Option<Arc<dyn ReceiptExtractor>> =
        match GeminiExtractor::new(config.extraction.clone()) {
            Ok(client) => {
                info!("  Extraction: {} via {}", config.extraction.model, client.url());
                Some(Arc::new(client))
            }
            Err(e) => {
                warn!("  Extraction unavailable: {}", e);
                None
            }
        };

    let state = AppState::new(config, extractor.clone());

    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    let result = runtime.block_on(server::run(state));
    drop(runtime);
    drop(extractor);

    result
}
