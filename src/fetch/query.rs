// src/fetch/query.rs
use chrono::NaiveDate;
use serde::Deserialize;
use url::Url;

static DEFAULT_BASE_URL: &str = "https://api.flysas.com/offers/flights";

/// `outDate` / `inDate` format expected by the calendar endpoint.
pub const QUERY_DATE_FORMAT: &str = "%Y%m%d";

/// Fixed query parameters of the fare-calendar endpoint. Every field can be
/// overridden from the `api` section of the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiParams {
    pub base_url: String,
    pub display_type: String,
    pub channel: String,
    pub booking_flow: String,
    /// Adult passenger count.
    pub adults: u32,
    /// Point of sale.
    pub pos: String,
}

impl Default for ApiParams {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            display_type: "CALENDAR".to_string(),
            channel: "web".to_string(),
            booking_flow: "REVENUE".to_string(),
            adults: 1,
            pos: "lu".to_string(),
        }
    }
}

/// Build the calendar URL for one month window. `date` is sent as both the
/// outbound and inbound date; the API only looks at which month it falls in.
pub fn calendar_url(
    params: &ApiParams,
    from_airport: &str,
    to_airport: &str,
    date: NaiveDate,
) -> Result<Url, url::ParseError> {
    let date = date.format(QUERY_DATE_FORMAT).to_string();
    let adults = params.adults.to_string();
    Url::parse_with_params(
        &params.base_url,
        &[
            ("displayType", params.display_type.as_str()),
            ("channel", params.channel.as_str()),
            ("bookingFlow", params.booking_flow.as_str()),
            ("adt", adults.as_str()),
            ("outDate", date.as_str()),
            ("inDate", date.as_str()),
            ("from", from_airport),
            ("to", to_airport),
            ("pos", params.pos.as_str()),
        ],
    )
}
