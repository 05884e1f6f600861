// src/fetch/mod.rs

use chrono::NaiveDate;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::fares::{anchor_date, parse_calendar, retain_month, CalendarError, FareTable, RouteRequest};

pub mod agents;
pub mod query;
pub mod transport;

use agents::UserAgentSource;
use query::ApiParams;
use transport::CalendarTransport;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success status. Only this variant
    /// leaves the rest of the run unaffected.
    #[error("status code {status} at month offset {offset}")]
    Status {
        offset: u32,
        status: StatusCode,
        body: String,
    },

    #[error("calendar request at month offset {offset} failed")]
    Transport {
        offset: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed calendar response at month offset {offset}")]
    Malformed {
        offset: u32,
        #[source]
        source: CalendarError,
    },

    #[error("{today} plus {offset} months is out of range")]
    DateOverflow { offset: u32, today: NaiveDate },

    #[error("invalid calendar url")]
    Url(#[from] url::ParseError),
}

impl FetchError {
    /// True when the route should be reported and skipped rather than ending the run.
    pub fn is_route_failure(&self) -> bool {
        matches!(self, FetchError::Status { .. })
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

const BODY_EXCERPT_CHARS: usize = 200;

/// Leading part of a response body for log lines.
fn excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((end, _)) => format!("{}…", &body[..end]),
        None => body.to_string(),
    }
}

/// Walks the monthly fare calendar for a route, one request per month offset.
pub struct FareWindowFetcher<T, A> {
    transport: T,
    agents: A,
    params: ApiParams,
}

impl<T: CalendarTransport, A: UserAgentSource> FareWindowFetcher<T, A> {
    pub fn new(transport: T, agents: A, params: ApiParams) -> Self {
        Self {
            transport,
            agents,
            params,
        }
    }

    /// Fetch offsets `0..=route.num_months` starting from `today`.
    ///
    /// Offset 0 is trimmed to `today`'s month because its window runs into the
    /// next month; later windows are kept whole. The first non-success status
    /// aborts the route with no rows.
    #[instrument(
        level = "info",
        skip(self, route),
        fields(from = %route.from_airport, to = %route.to_airport, months = route.num_months)
    )]
    pub fn fetch(&self, route: &RouteRequest, today: NaiveDate) -> Result<FareTable, FetchError> {
        let mut entries = Vec::new();

        for offset in 0..=route.num_months {
            let anchor = anchor_date(today, offset).ok_or(FetchError::DateOverflow { offset, today })?;
            let url = query::calendar_url(&self.params, &route.from_airport, &route.to_airport, anchor)?;
            debug!(%url, offset, "requesting calendar");

            let reply = self
                .transport
                .get(&url, &self.agents.user_agent())
                .map_err(|source| FetchError::Transport { offset, source })?;

            if !reply.status.is_success() {
                let body = excerpt(&reply.body);
                warn!(offset, status = %reply.status, %body, "calendar request rejected");
                return Err(FetchError::Status {
                    offset,
                    status: reply.status,
                    body: reply.body,
                });
            }

            let mut month =
                parse_calendar(&reply.body).map_err(|source| FetchError::Malformed { offset, source })?;
            let returned = month.len();
            if offset == 0 {
                month = retain_month(month, today);
            }
            debug!(offset, returned, kept = month.len(), "calendar window");
            entries.extend(month);
        }

        let table = FareTable::from_entries(entries, route, today);
        info!(rows = table.len(), "route fetched");
        Ok(table)
    }
}
