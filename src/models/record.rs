use chrono::NaiveDate;
use serde::Serialize;

/// One observation for one location on one date, with the derived
/// vaccination percentages already computed.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub location: String,
    pub continent: Option<String>,
    pub date: NaiveDate,
    pub people_vaccinated: Option<f64>,
    pub people_fully_vaccinated: Option<f64>,
    pub population: Option<f64>,
    pub pct_vaccinated: Option<f64>,
    pub pct_fully_vaccinated: Option<f64>,
}

impl Record {
    pub fn new(
        location: impl Into<String>,
        continent: Option<String>,
        date: NaiveDate,
        people_vaccinated: Option<f64>,
        people_fully_vaccinated: Option<f64>,
        population: Option<f64>,
    ) -> Self {
        Self {
            location: location.into(),
            continent,
            date,
            people_vaccinated,
            people_fully_vaccinated,
            population,
            pct_vaccinated: percent_of(people_vaccinated, population),
            pct_fully_vaccinated: percent_of(people_fully_vaccinated, population),
        }
    }
}

/// `100 * part / whole`, or `None` if either side is missing, `whole` is zero
/// or the result is not finite. Out-of-range results are kept as-is.
pub fn percent_of(part: Option<f64>, whole: Option<f64>) -> Option<f64> {
    match (part, whole) {
        (Some(part), Some(whole)) if whole != 0.0 => {
            Some(part / whole * 100.0).filter(|pct| pct.is_finite())
        }
        _ => None,
    }
}
