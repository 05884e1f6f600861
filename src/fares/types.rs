// src/fares/types.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single origin → destination pair and how many months past the current one to query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteRequest {
    pub from_airport: String,
    pub to_airport: String,
    pub num_months: u32,
}

impl RouteRequest {
    pub fn new(from_airport: impl Into<String>, to_airport: impl Into<String>, num_months: u32) -> Self {
        Self {
            from_airport: from_airport.into(),
            to_airport: to_airport.into(),
            num_months,
        }
    }
}

/// One day of a calendar window as the API reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFareEntry {
    pub date: NaiveDate,
    pub price: f64,
}

/// Output row; field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareRecord {
    pub flight_date: NaiveDate,
    pub price: f64,
    pub crawl_date: NaiveDate,
    pub from_airport: String,
    pub to_airport: String,
}

/// All fares collected for one route in one run, in month-offset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FareTable {
    pub records: Vec<FareRecord>,
}

impl FareTable {
    /// Stamp `entries` with the crawl date and route.
    pub fn from_entries(entries: Vec<RawFareEntry>, route: &RouteRequest, crawl_date: NaiveDate) -> Self {
        let records = entries
            .into_iter()
            .map(|e| FareRecord {
                flight_date: e.date,
                price: e.price,
                crawl_date,
                from_airport: route.from_airport.clone(),
                to_airport: route.to_airport.clone(),
            })
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FareRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_stamps_route_and_crawl_date() {
        let route = RouteRequest::new("CPH", "ARN", 0);
        let crawl = NaiveDate::from_ymd_opt(2023, 9, 15).unwrap();
        let entries = vec![
            RawFareEntry {
                date: NaiveDate::from_ymd_opt(2023, 9, 20).unwrap(),
                price: 512.0,
            },
            RawFareEntry {
                date: NaiveDate::from_ymd_opt(2023, 9, 18).unwrap(),
                price: 498.5,
            },
        ];

        let table = FareTable::from_entries(entries, &route, crawl);

        assert_eq!(table.len(), 2);
        // order is kept as given, not sorted by date
        assert_eq!(table.records[0].flight_date, NaiveDate::from_ymd_opt(2023, 9, 20).unwrap());
        assert_eq!(table.records[1].price, 498.5);
        for r in table.iter() {
            assert_eq!(r.crawl_date, crawl);
            assert_eq!(r.from_airport, "CPH");
            assert_eq!(r.to_airport, "ARN");
        }
    }

    #[test]
    fn test_empty_entries_give_empty_table() {
        let route = RouteRequest::new("OSL", "BGO", 2);
        let crawl = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let table = FareTable::from_entries(Vec::new(), &route, crawl);
        assert!(table.is_empty());
    }
}
