// src/output/mod.rs

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::fares::{FareRecord, FareTable, RouteRequest};

/// Header of every fare file, in column order.
pub const COLUMNS: [&str; 5] = [
    "flight_date",
    "price",
    "crawl_date",
    "from_airport",
    "to_airport",
];

/// `<from>-<to>-<YYYYMMDD>.csv`
pub fn file_name(route: &RouteRequest, run_date: NaiveDate) -> String {
    format!(
        "{}-{}-{}.csv",
        route.from_airport,
        route.to_airport,
        run_date.format("%Y%m%d")
    )
}

/// Write `table` to `dir/<file_name>`, creating `dir` if needed.
/// The header is written even when the table is empty.
pub fn write_table(
    dir: impl AsRef<Path>,
    route: &RouteRequest,
    run_date: NaiveDate,
    table: &FareTable,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating output directory {}", dir.display()))?;
    let path = dir.join(file_name(route, run_date));

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(COLUMNS)?;
    for record in table.iter() {
        wtr.serialize(record)
            .with_context(|| format!("writing row to {}", path.display()))?;
    }
    wtr.flush()?;

    debug!(path = %path.display(), rows = table.len(), "wrote fare table");
    Ok(path)
}

/// Read a file produced by [`write_table`].
pub fn read_table(path: impl AsRef<Path>) -> Result<FareTable> {
    let path = path.as_ref();
    let mut rdr = csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.clone();
    if headers.iter().ne(COLUMNS.iter().copied()) {
        bail!("unexpected columns in {}: {:?}", path.display(), headers);
    }

    let records = rdr
        .deserialize::<FareRecord>()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("reading rows from {}", path.display()))?;
    Ok(FareTable { records })
}
