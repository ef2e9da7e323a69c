//! Headless front end: turns command-line arguments into selection events
//! and prints the resulting view as JSON.

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;

use crate::dashboard::SelectionEvent;
use crate::models::{ContinentFilter, DateRange};

#[derive(Debug, Default, PartialEq)]
pub struct ShellArgs {
    pub continent: Option<ContinentFilter>,
    pub countries: Option<Vec<String>>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ShellArgs {
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = ShellArgs::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| anyhow!("missing value for {flag}"))
            };
            match flag.as_str() {
                "--continent" => parsed.continent = Some(ContinentFilter::parse(&value()?)),
                "--countries" => {
                    parsed.countries = Some(
                        value()?
                            .split(',')
                            .map(str::trim)
                            .filter(|c| !c.is_empty())
                            .map(str::to_string)
                            .collect(),
                    )
                }
                "--from" => parsed.from = Some(parse_day(&value()?)?),
                "--to" => parsed.to = Some(parse_day(&value()?)?),
                other => bail!("unknown argument {other}"),
            }
        }
        Ok(parsed)
    }

    /// Events in the order a user would produce them: continent, then
    /// countries, then dates.
    pub fn events(&self, current: &DateRange) -> Vec<SelectionEvent> {
        let mut events = Vec::new();
        if let Some(continent) = &self.continent {
            events.push(SelectionEvent::ContinentChanged(continent.clone()));
        }
        if let Some(countries) = &self.countries {
            events.push(SelectionEvent::CountriesChanged(countries.clone()));
        }
        if self.from.is_some() || self.to.is_some() {
            events.push(SelectionEvent::DateRangeChanged(DateRange {
                start: self.from.or(current.start),
                end: self.to.or(current.end),
            }));
        }
        events
    }
}

fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}
