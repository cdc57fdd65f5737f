use anyhow::{Context, Result};
use fantoccini::ClientBuilder;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use uniscraper::{discover, pipeline, source::LiveSource};

/// WebDriver endpoint the browser session is acquired from (chromedriver's
/// default port).
const WEBDRIVER_URL: &str = "http://localhost:9515";

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) discover university ids ──────────────────────────────────
    let http = reqwest::Client::new();
    let ids = discover::discover_university_ids(&http)
        .await
        .context("discovering university ids")?;
    info!(count = ids.len(), "discovered universities");

    // ─── 3) acquire the shared browser session ───────────────────────
    let mut caps = serde_json::Map::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({ "args": ["--headless=new", "--disable-gpu"] }),
    );
    let browser = ClientBuilder::native()
        .capabilities(caps)
        .connect(WEBDRIVER_URL)
        .await
        .with_context(|| format!("connecting to webdriver at {WEBDRIVER_URL}"))?;

    // ─── 4) process each university sequentially ─────────────────────
    let mut source = LiveSource::new(http, browser);
    let output = pipeline::run(&mut source, ids, pipeline::PACING).await;

    // ─── 5) release the session before judging the run ───────────────
    if let Err(err) = source.into_browser().close().await {
        warn!(%err, "browser session did not close cleanly");
    }

    // ─── 6) write combined tables ────────────────────────────────────
    pipeline::write_outputs(&output)?;
    Ok(())
}
