//! Parallel CSV conversion of coordinate text

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::coordinate::{self, Coordinate, CoordinateSystem};
use crate::error::{Error, Result};

/// Placeholder written for rows that did not parse
pub const UNRECOGNIZED: &str = "UNRECOGNIZED";

/// One input row
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRow {
    pub text: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Outcome for one row
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub text: String,
    pub name: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub formatted: Option<String>,
    pub error: Option<String>,
}

impl BatchResult {
    fn convert(row: BatchRow, system: CoordinateSystem) -> Self {
        let converted = coordinate::parse_any(&row.text)
            .and_then(|coordinate| Ok((system.format(&coordinate)?, coordinate)));

        match converted {
            Ok((formatted, coordinate)) => Self {
                formatted: Some(formatted),
                coordinate: Some(coordinate),
                error: None,
                text: row.text,
                name: row.name,
            },
            Err(e) => {
                debug!(text = %row.text, error = %e, "row rejected");
                Self {
                    coordinate: None,
                    formatted: None,
                    error: Some(e.to_string()),
                    text: row.text,
                    name: row.name,
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.coordinate.is_some()
    }
}

/// Results of a batch in input order
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub system: CoordinateSystem,
    pub results: Vec<BatchResult>,
    pub elapsed_ms: f64,
}

#[derive(Serialize)]
struct CsvRecord<'a> {
    text: &'a str,
    name: &'a str,
    latitude: String,
    longitude: String,
    formatted: &'a str,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn successful(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.successful()
    }

    /// Renders the report as CSV preceded by `#` statistics lines
    pub fn to_csv(&self) -> Result<String> {
        let mut buffer = Vec::with_capacity(self.results.len() * 64 + 256);

        writeln!(buffer, "# Statistics")?;
        writeln!(buffer, "# System: {}", self.system)?;
        writeln!(buffer, "# Total rows: {}", self.total())?;
        writeln!(buffer, "# Successful: {}", self.successful())?;
        writeln!(buffer, "# Failed: {}", self.failed())?;
        writeln!(buffer, "# Execution time: {:.2} ms", self.elapsed_ms)?;

        let mut writer = csv::Writer::from_writer(buffer);
        for result in &self.results {
            let (latitude, longitude) = match &result.coordinate {
                Some(c) => (c.latitude().to_string(), c.longitude().to_string()),
                None => (String::new(), String::new()),
            };

            writer.serialize(CsvRecord {
                text: &result.text,
                name: result.name.as_deref().unwrap_or(""),
                latitude,
                longitude,
                formatted: result.formatted.as_deref().unwrap_or(UNRECOGNIZED),
            })?;
        }

        let buffer = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        String::from_utf8(buffer).map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Parses every row in parallel and formats the successes in `system`
pub fn convert_rows(rows: Vec<BatchRow>, system: CoordinateSystem) -> BatchReport {
    let start = Instant::now();

    let results: Vec<BatchResult> = rows
        .into_par_iter()
        .map(|row| BatchResult::convert(row, system))
        .collect();

    BatchReport {
        system,
        results,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    }
}

/// Reads CSV with a `text` column and optional `name` column
///
/// Rows that cannot be deserialized are logged and skipped; rows whose text
/// does not parse are kept and reported as failures.
pub fn convert_csv<R: Read>(reader: R, system: CoordinateSystem) -> Result<BatchReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    if !csv_reader.headers()?.iter().any(|header| header == "text") {
        return Err(Error::MalformedInput("CSV input has no \"text\" column".to_string()));
    }

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<BatchRow>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => warn!(row = index + 1, error = %e, "skipping unreadable CSV row"),
        }
    }

    Ok(convert_rows(rows, system))
}

pub fn convert_csv_file<P: AsRef<Path>>(path: P, system: CoordinateSystem) -> Result<BatchReport> {
    let file = File::open(path.as_ref())?;
    convert_csv(file, system)
}
