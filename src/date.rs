//! Day/month/year date handling for log entries and report bounds.

use crate::errors::FuelError;
use chrono::{Datelike, NaiveDate};

/// Labels are written with at most four year digits.
const MAX_YEAR: i32 = 9999;

/// Parse a `day/month/year` date. Components need not be zero padded.
pub fn parse_date(input: &str) -> Result<NaiveDate, FuelError> {
    let parts: Vec<&str> = input.trim().split('/').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(FuelError::Parse(format!("invalid date '{input}': expected day/month/year")));
    };

    let day = component(input, day)?;
    let month = component(input, month)?;
    let year = component(input, year)?;
    let year = i32::try_from(year)
        .ok()
        .filter(|year| *year <= MAX_YEAR)
        .ok_or_else(|| FuelError::Parse(format!("invalid date '{input}': year out of range")))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| FuelError::Parse(format!("invalid date '{input}': no such calendar day")))
}

/// Normalise a report bound. Date inputs submit `YYYY-MM-DD`; anything else
/// goes through [`parse_date`].
pub fn parse_bound(input: &str) -> Result<NaiveDate, FuelError> {
    let trimmed = input.trim();
    if trimmed.contains('-') {
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|err| FuelError::Parse(format!("invalid date '{input}': {err}")))?;
        if !(0..=MAX_YEAR).contains(&date.year()) {
            return Err(FuelError::Parse(format!("invalid date '{input}': year out of range")));
        }
        return Ok(date);
    }
    parse_date(trimmed)
}

/// `DD/MM/YYYY`; the result always goes back through [`parse_date`] for
/// dates the parsers accept.
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

fn component(input: &str, part: &str) -> Result<u32, FuelError> {
    if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(FuelError::Parse(format!(
            "invalid date '{input}': '{part}' is not a number"
        )));
    }
    part.parse()
        .map_err(|_| FuelError::Parse(format!("invalid date '{input}': '{part}' is too large")))
}
