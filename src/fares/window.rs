// src/fares/window.rs

use chrono::{Datelike, Months, NaiveDate};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::types::RawFareEntry;

/// Date format of the keys under `outboundLowestFares`.
pub const FARE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("unexpected calendar response shape")]
    Shape(#[from] serde_json::Error),

    #[error("unparsable fare date {date:?}")]
    Date {
        date: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Top level of a calendar response. Only the outbound lowest fares are read.
///
/// `serde_json` is built with `preserve_order`, so the map iterates in the
/// order the API sent the dates.
#[derive(Debug, Deserialize)]
pub struct CalendarBody {
    #[serde(rename = "outboundLowestFares")]
    pub outbound_lowest_fares: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct LowestFare {
    #[serde(rename = "totalPrice")]
    total_price: f64,
}

/// The date to request for month `offset`: `today` plus `offset` calendar months,
/// with the day clamped to the end of a shorter month (Jan 31 + 1 → Feb 28/29).
///
/// Returns `None` only when the result falls outside chrono's date range.
pub fn anchor_date(today: NaiveDate, offset: u32) -> Option<NaiveDate> {
    today.checked_add_months(Months::new(offset))
}

/// Parse a calendar response body into `(date, lowest total price)` entries.
pub fn parse_calendar(body: &str) -> Result<Vec<RawFareEntry>, CalendarError> {
    let calendar: CalendarBody = serde_json::from_str(body)?;
    calendar
        .outbound_lowest_fares
        .into_iter()
        .map(|(date, fare)| -> Result<RawFareEntry, CalendarError> {
            let fare: LowestFare = serde_json::from_value(fare)?;
            let parsed = NaiveDate::parse_from_str(&date, FARE_DATE_FORMAT)
                .map_err(|source| CalendarError::Date { date, source })?;
            Ok(RawFareEntry {
                date: parsed,
                price: fare.total_price,
            })
        })
        .collect()
}

/// Keep only entries in the same calendar month (and year) as `today`.
///
/// The API answers with a month-long window starting at the requested date, so
/// the window for the current month runs into the next one.
pub fn retain_month(entries: Vec<RawFareEntry>, today: NaiveDate) -> Vec<RawFareEntry> {
    entries
        .into_iter()
        .filter(|e| e.date.year() == today.year() && e.date.month() == today.month())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_anchor_date_rolls_year() {
        assert_eq!(anchor_date(d(2023, 9, 15), 0), Some(d(2023, 9, 15)));
        assert_eq!(anchor_date(d(2023, 9, 15), 1), Some(d(2023, 10, 15)));
        assert_eq!(anchor_date(d(2023, 11, 2), 3), Some(d(2024, 2, 2)));
        assert_eq!(anchor_date(d(2023, 12, 31), 13), Some(d(2025, 1, 31)));
    }

    #[test]
    fn test_anchor_date_clamps_day() {
        assert_eq!(anchor_date(d(2023, 1, 31), 1), Some(d(2023, 2, 28)));
        assert_eq!(anchor_date(d(2024, 1, 31), 1), Some(d(2024, 2, 29)));
        assert_eq!(anchor_date(d(2023, 8, 31), 1), Some(d(2023, 9, 30)));
        // clamping does not carry over to later offsets
        assert_eq!(anchor_date(d(2023, 1, 31), 2), Some(d(2023, 3, 31)));
    }

    #[test]
    fn test_parse_calendar_keeps_response_order() {
        let body = r#"{
            "outboundLowestFares": {
                "2023-09-30": {"totalPrice": 799.0, "currency": "SEK"},
                "2023-09-16": {"totalPrice": 512.5},
                "2023-10-01": {"totalPrice": 640}
            },
            "inboundLowestFares": {}
        }"#;

        let entries = parse_calendar(body).unwrap();
        let dates: Vec<_> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![d(2023, 9, 30), d(2023, 9, 16), d(2023, 10, 1)]);
        assert_eq!(entries[1].price, 512.5);
        assert_eq!(entries[2].price, 640.0);
    }

    #[test]
    fn test_parse_calendar_empty_window() {
        let entries = parse_calendar(r#"{"outboundLowestFares": {}}"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_calendar_missing_key() {
        let err = parse_calendar(r#"{"errors": [{"code": "225"}]}"#).unwrap_err();
        assert!(matches!(err, CalendarError::Shape(_)));
    }

    #[test]
    fn test_parse_calendar_missing_price() {
        let err = parse_calendar(r#"{"outboundLowestFares": {"2023-09-16": {"points": 10}}}"#)
            .unwrap_err();
        assert!(matches!(err, CalendarError::Shape(_)));
    }

    #[test]
    fn test_parse_calendar_bad_date() {
        let err = parse_calendar(r#"{"outboundLowestFares": {"16/09/2023": {"totalPrice": 1}}}"#)
            .unwrap_err();
        match err {
            CalendarError::Date { ref date, .. } => assert_eq!(date, "16/09/2023"),
            ref other => panic!("expected date error, got {other:?}"),
        }
        // the chrono cause is reachable through `source`, not repeated in the message
        assert_eq!(err.to_string(), r#"unparsable fare date "16/09/2023""#);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_retain_month_drops_other_months() {
        let today = d(2023, 9, 15);
        let entries = vec![
            RawFareEntry { date: d(2023, 9, 15), price: 1.0 },
            RawFareEntry { date: d(2023, 10, 14), price: 2.0 },
            RawFareEntry { date: d(2023, 9, 30), price: 3.0 },
            RawFareEntry { date: d(2022, 9, 20), price: 4.0 },
        ];

        let kept = retain_month(entries, today);
        assert_eq!(kept.len(), 2);
        assert!(kept
            .iter()
            .all(|e| e.date.year() == today.year() && e.date.month() == today.month()));
        assert_eq!(kept[0].price, 1.0);
        assert_eq!(kept[1].price, 3.0);
    }
}
