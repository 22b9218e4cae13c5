//! Planning errors.
//!
//! Each variant's `Display` text is the body of the `ERROR:` line that the
//! text entry points return instead of a report.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("Could not geocode '{0}'.")]
    GeocodeFailed(String),

    #[error("Dates must be YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("end_date must be same or after start_date.")]
    InvalidRange,
}

impl PlanError {
    /// The single line returned to callers in place of a report
    pub fn report_line(&self) -> String {
        format!("ERROR: {}", self)
    }
}
