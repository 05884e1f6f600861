// src/fetch/transport.rs
use reqwest::{blocking::Client, header::USER_AGENT, StatusCode};
use url::Url;

/// Status and body of one calendar request, whatever the status.
#[derive(Debug, Clone)]
pub struct CalendarReply {
    pub status: StatusCode,
    pub body: String,
}

/// One blocking GET against the calendar endpoint.
///
/// An `Err` means no response was received at all; non-success statuses come
/// back as `Ok` and are judged by the caller.
pub trait CalendarTransport {
    fn get(&self, url: &Url, user_agent: &str) -> Result<CalendarReply, reqwest::Error>;
}

impl<T: CalendarTransport + ?Sized> CalendarTransport for &T {
    fn get(&self, url: &Url, user_agent: &str) -> Result<CalendarReply, reqwest::Error> {
        (**self).get(url, user_agent)
    }
}

/// `reqwest` blocking client with its default settings.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().gzip(true).build()?,
        })
    }
}

impl CalendarTransport for HttpTransport {
    fn get(&self, url: &Url, user_agent: &str) -> Result<CalendarReply, reqwest::Error> {
        let resp = self
            .client
            .get(url.clone())
            .header(USER_AGENT, user_agent)
            .send()?;
        let status = resp.status();
        // a truncated error body must not hide the status
        let body = if status.is_success() {
            resp.text()?
        } else {
            resp.text().unwrap_or_default()
        };
        Ok(CalendarReply { status, body })
    }
}
