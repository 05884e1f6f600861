pub mod types;
pub mod window;

pub use types::{FareRecord, FareTable, RawFareEntry, RouteRequest};
pub use window::{anchor_date, parse_calendar, retain_month, CalendarError};
