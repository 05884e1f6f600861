use anyhow::{Context, Result};
use chrono::Local;
use farescraper::{
    config::Settings,
    fetch::{agents::RandomDesktopAgent, transport::HttpTransport, FareWindowFetcher},
    run,
};
use std::env;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) settings ─────────────────────────────────────────────────
    let settings = Settings::from_env()?;
    let run_date = Local::now().date_naive();
    info!(
        routes = settings.from_airport.len(),
        data_dir = %settings.data_dir.display(),
        %run_date,
        "startup"
    );

    // ─── 3) crawl ────────────────────────────────────────────────────
    let transport = HttpTransport::new().context("building HTTP client")?;
    let fetcher = FareWindowFetcher::new(transport, RandomDesktopAgent, settings.api.clone());
    let summary = run::run(&settings, &fetcher, run_date)?;

    info!(
        written = summary.written.len(),
        failed = summary.failed.len(),
        "all done"
    );
    Ok(())
}
