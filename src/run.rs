// src/run.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::StatusCode;
use std::path::PathBuf;
use tracing::{error, info};

use crate::{
    config::Settings,
    fares::RouteRequest,
    fetch::{agents::UserAgentSource, transport::CalendarTransport, FareWindowFetcher, FetchError},
    output,
};

/// What happened to each configured route.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(RouteRequest, StatusCode)>,
}

/// Crawl every configured route in order, writing one file per route.
///
/// A route rejected by the API is reported and skipped. Any other error
/// (network failure, malformed response, I/O) ends the run.
pub fn run<T, A>(
    settings: &Settings,
    fetcher: &FareWindowFetcher<T, A>,
    run_date: NaiveDate,
) -> Result<RunSummary>
where
    T: CalendarTransport,
    A: UserAgentSource,
{
    let mut summary = RunSummary::default();

    for route in settings.routes() {
        let label = format!("{}-{}", route.from_airport, route.to_airport);
        match fetcher.fetch(&route, run_date) {
            Ok(table) => {
                let path = output::write_table(&settings.data_dir, &route, run_date, &table)
                    .with_context(|| format!("writing fares for {label}"))?;
                let name = output::file_name(&route, run_date);
                println!("successfully wrote file {name}");
                info!(route = %label, rows = table.len(), path = %path.display(), "route done");
                summary.written.push(path);
            }
            Err(FetchError::Status { offset, status, .. }) => {
                println!("status code {}", status.as_u16());
                error!(route = %label, offset, %status, "route skipped");
                summary.failed.push((route, status));
            }
            Err(e) => return Err(e).with_context(|| format!("fetching fares for {label}")),
        }
    }

    Ok(summary)
}
