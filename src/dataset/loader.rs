use std::{fs::File, io::Read, path::Path};

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use serde::{de, Deserialize, Deserializer};

use super::Dataset;
use crate::error::{DashboardError, DashboardResult};
use crate::models::Record;
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "date",
    "location",
    "continent",
    "population",
    "people_vaccinated",
    "people_fully_vaccinated",
];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Cell contents that mean "no value" in exported tables (pandas' default
/// `na_values`).
const MISSING_TOKENS: [&str; 18] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan",
];

/// Row as it appears in the file; dates stay raw until validated.
#[derive(Debug, Deserialize)]
struct RawRow {
    date: String,
    location: String,
    continent: Option<String>,
    #[serde(deserialize_with = "optional_number")]
    population: Option<f64>,
    #[serde(deserialize_with = "optional_number")]
    people_vaccinated: Option<f64>,
    #[serde(deserialize_with = "optional_number")]
    people_fully_vaccinated: Option<f64>,
}

/// Numeric cell: missing-value tokens and non-finite numbers become `None`,
/// anything else unparseable is an error.
fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if MISSING_TOKENS.contains(&raw) || raw.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| de::Error::custom(format!("invalid number '{raw}'")))?;
    Ok(Some(value).filter(|v| v.is_finite()))
}

impl Dataset {
    pub fn load(path: &Path) -> DashboardResult<Self> {
        let file = File::open(path)
            .map_err(|err| DashboardError::load(path, format!("cannot open file: {err}")))?;
        let dataset = Self::from_reader_named(file, path)?;
        log_info!(
            "Loaded {} rows from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse CSV from any reader. Used for in-memory sources; errors report
    /// the source as `<reader>`.
    pub fn from_reader<R: Read>(reader: R) -> DashboardResult<Self> {
        Self::from_reader_named(reader, Path::new("<reader>"))
    }

    fn from_reader_named<R: Read>(reader: R, source: &Path) -> DashboardResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|err| DashboardError::load(source, format!("cannot read header: {err}")))?
            .clone();
        check_columns(&headers, source)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|err| DashboardError::load(source, err.to_string()))?;
            let line = row.position().map(|pos| pos.line()).unwrap_or_default();
            let raw: RawRow = row
                .deserialize(Some(&headers))
                .map_err(|err| DashboardError::load(source, format!("line {line}: {err}")))?;
            let date = parse_date(&raw.date, line)?;
            records.push(Record::new(
                raw.location,
                raw.continent.filter(|c| !c.is_empty()),
                date,
                raw.people_vaccinated,
                raw.people_fully_vaccinated,
                raw.population,
            ));
        }

        log_debug!("Parsed {} records from {}", records.len(), source.display());
        Ok(Dataset::from_records(records))
    }
}

fn check_columns(headers: &StringRecord, source: &Path) -> DashboardResult<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DashboardError::load(
            source,
            format!("missing required columns: {}", missing.join(", ")),
        ))
    }
}

/// Accepts plain dates and timestamps; timestamps are truncated to the day.
fn parse_date(value: &str, line: u64) -> DashboardResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| DashboardError::Parse {
            line,
            value: value.to_string(),
        })
}
