use chrono::NaiveDate;
use shared::error::ValidationError;

/// Checks the raw start/end selector values before a search or submission.
/// Both fields must be present and the range must be non-empty; there is no
/// business-hours bound on this path (the server enforces its own window).
pub fn validate_time_range(start: &str, end: &str) -> Result<(u8, u8), ValidationError> {
    if start.is_empty() || end.is_empty() {
        return Err(ValidationError::MissingTimeRange);
    }
    let start: u8 = start
        .parse()
        .map_err(|_| ValidationError::MissingTimeRange)?;
    let end: u8 = end.parse().map_err(|_| ValidationError::MissingTimeRange)?;
    if end <= start {
        return Err(ValidationError::EmptyTimeRange);
    }
    Ok((start, end))
}

/// Advisory business-hours window. Not part of the validation path; callers
/// may use it to annotate hours outside the normal 07:00-16:00 day.
pub fn within_business_hours(hour: u8) -> bool {
    (7..=16).contains(&hour)
}

/// A slot date is reservable when it is not in the past.
pub fn is_reservable_date(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}
