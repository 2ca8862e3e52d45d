//! Holiday Calendar Port - "is this date a public holiday?"
//!
//! Treated as an external read-only data source: lookups may fail, and a
//! failure surfaces as a transient external-service error rather than a
//! silent "not a holiday".

use async_trait::async_trait;
use chrono::NaiveDate;

/// Port for public-holiday lookups.
#[async_trait]
pub trait HolidayCalendar: Send + Sync {
    /// Whether `date` is a recognized public holiday.
    async fn is_holiday(&self, date: NaiveDate) -> Result<bool, HolidayError>;
}

/// Holiday lookup failures.
#[derive(Debug, thiserror::Error)]
pub enum HolidayError {
    /// The calendar source could not be reached or read.
    #[error("holiday calendar unavailable: {0}")]
    Unavailable(String),
}
