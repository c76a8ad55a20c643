//! Date and time extraction.

use chrono::NaiveDate;
use regex::Captures;

use crate::models::config::ConfidenceWeights;
use crate::models::receipt::{DateValue, FieldResult};

use super::patterns::{DATE_DMY, DATE_MONTH_ABBR, DATE_MONTH_FULL, DATE_YMD, TIME};

/// Extract the transaction date: first line with a matching shape wins.
///
/// Shapes are tried per line in priority order: numeric day-first, numeric
/// year-first, abbreviated month name, full month name. The raw match is
/// always recorded; the parsed date is `None` when the components do not
/// form a valid calendar date (a transposed month/day, for instance).
pub fn extract_date(lines: &[&str], weights: &ConfidenceWeights) -> FieldResult<DateValue> {
    for line in lines {
        if let Some(caps) = DATE_DMY.captures(line) {
            return date_field(&caps, parse_day_first(&caps), weights, line);
        }
        if let Some(caps) = DATE_YMD.captures(line) {
            return date_field(&caps, parse_year_first(&caps), weights, line);
        }
        if let Some(caps) = DATE_MONTH_ABBR.captures(line) {
            return date_field(&caps, parse_named_month(&caps), weights, line);
        }
        if let Some(caps) = DATE_MONTH_FULL.captures(line) {
            return date_field(&caps, parse_named_month(&caps), weights, line);
        }
    }

    FieldResult::none()
}

fn date_field(
    caps: &Captures<'_>,
    parsed: Option<NaiveDate>,
    weights: &ConfidenceWeights,
    line: &str,
) -> FieldResult<DateValue> {
    let raw = caps.get(0).unwrap().as_str().to_string();
    FieldResult::new(DateValue { raw, parsed }, weights.date, line)
}

fn parse_day_first(caps: &Captures<'_>) -> Option<NaiveDate> {
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year = expand_year(&caps[3])?;
    // from_ymd_opt rejects transposed month/day outright, which is the
    // year-rollover guard without the rollover.
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_year_first(caps: &Captures<'_>) -> Option<NaiveDate> {
    let year = expand_year(&caps[1])?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_named_month(caps: &Captures<'_>) -> Option<NaiveDate> {
    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2])?;
    let year = expand_year(&caps[3])?;
    NaiveDate::from_ymd_opt(year, month, day)
}

// Two-digit years expand by prefixing "20"; receipts are current documents.
fn expand_year(s: &str) -> Option<i32> {
    if s.len() == 2 {
        format!("20{s}").parse().ok()
    } else {
        s.parse().ok()
    }
}

fn month_number(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_lowercase();
    match prefix.as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

/// Extract the transaction time: first `H:MM[:SS][ AM|PM]` match wins.
pub fn extract_time(lines: &[&str], weights: &ConfidenceWeights) -> FieldResult<String> {
    for line in lines {
        if let Some(m) = TIME.find(line) {
            return FieldResult::new(m.as_str().trim().to_string(), weights.time, *line);
        }
    }

    FieldResult::none()
}
