use clap::Parser;
use std::sync::Arc;

use newshound::api::{self, AppState};
use newshound::chat::ChatResponder;
use newshound::config::CONFIG;
use newshound::fetcher::HttpPageFetcher;
use newshound::llm::{ModelInvoker, ProcessModelInvoker};
use newshound::search::NewsSearcher;

#[derive(Parser, Debug)]
#[command(name = "newshound", about = "News search + rating API over a local model")]
struct Args {
    /// Override the configured bind address (host:port)
    #[arg(long)]
    bind: Option<String>,

    /// Log level (info, debug, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber (handles both tracing and log crate)
    let level: tracing::Level = args.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .init();

    // Bridge log crate -> tracing (so log::info! etc. work)
    // tracing_log::LogTracer::init()?;

    let invoker: Arc<dyn ModelInvoker> = Arc::new(ProcessModelInvoker::from_config());
    let fetcher = Arc::new(HttpPageFetcher::from_config());

    let state = Arc::new(AppState {
        searcher: NewsSearcher::new(fetcher, invoker.clone()),
        chat: ChatResponder::new(invoker.clone()),
        invoker,
    });

    let router = api::create_router(state);

    let bind_addr = args.bind.as_deref().unwrap_or(&CONFIG.bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "newshound listening");
    axum::serve(listener, router).await?;

    Ok(())
}
