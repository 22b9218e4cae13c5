use chrono::{Days, NaiveDate};

use crate::error::PlanError;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a calendar date given as `YYYY-MM-DD` or `YYYY/MM/DD`
pub fn parse_date(input: &str) -> Result<NaiveDate, PlanError> {
    let trimmed = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| PlanError::InvalidDate(input.to_string()))
}

/// Parse a trip's start and end, requiring `end >= start`
pub fn parse_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), PlanError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if end < start {
        return Err(PlanError::InvalidRange);
    }
    Ok((start, end))
}

/// Parse an optional range: `start` defaults to `today`, `end` to `start`.
///
/// The order of the two dates is not checked.
pub fn parse_optional_range(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), PlanError> {
    let start = start.map(parse_date).transpose()?.unwrap_or(today);
    let end = end.map(parse_date).transpose()?.unwrap_or(start);
    Ok((start, end))
}

/// Inclusive number of days in `start..=end`
pub fn trip_days(start: NaiveDate, end: NaiveDate) -> usize {
    usize::try_from((end - start).num_days() + 1).unwrap_or(0)
}

/// Every date of the trip, in calendar order
pub fn trip_dates(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    (0..trip_days(start, end) as u64)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .collect()
}
