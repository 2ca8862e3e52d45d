//! Computed US federal holiday calendar.
//!
//! Covers the eleven federal holidays, with observed shifts for the
//! fixed-date ones (Saturday observed on the preceding Friday, Sunday on
//! the following Monday). Computed locally, so lookups never fail; the
//! port still returns a Result because other backings are remote.

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::ports::{HolidayCalendar, HolidayError};

/// US federal holiday calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsFederalHolidays;

impl UsFederalHolidays {
    /// Creates the calendar.
    pub fn new() -> Self {
        Self
    }

    /// Whether `date` is a federal holiday or its observed substitute.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let year = date.year();
        self.holidays_for(year).contains(&date)
            // Jan 1 observed on Dec 31 spills from the following year.
            || self.holidays_for(year + 1).contains(&date)
    }

    fn holidays_for(&self, year: i32) -> Vec<NaiveDate> {
        let mut days = Vec::new();

        let mut fixed = |month: u32, day: u32| {
            if let Some(d) = NaiveDate::from_ymd_opt(year, month, day) {
                days.push(d);
                match d.weekday() {
                    Weekday::Sat => days.push(d - Duration::days(1)),
                    Weekday::Sun => days.push(d + Duration::days(1)),
                    _ => {}
                }
            }
        };

        fixed(1, 1); // New Year's Day
        fixed(6, 19); // Juneteenth
        fixed(7, 4); // Independence Day
        fixed(11, 11); // Veterans Day
        fixed(12, 25); // Christmas Day

        let floating = [
            nth_weekday(year, 1, Weekday::Mon, 3),  // MLK Day
            nth_weekday(year, 2, Weekday::Mon, 3),  // Washington's Birthday
            last_weekday(year, 5, Weekday::Mon),    // Memorial Day
            nth_weekday(year, 9, Weekday::Mon, 1),  // Labor Day
            nth_weekday(year, 10, Weekday::Mon, 2), // Columbus Day
            nth_weekday(year, 11, Weekday::Thu, 4), // Thanksgiving
        ];
        days.extend(floating.into_iter().flatten());

        days
    }
}

/// The nth given weekday of a month.
fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
    first.checked_add_signed(Duration::days(offset as i64 + 7 * (n as i64 - 1)))
        .filter(|d| d.month() == month)
}

/// The last given weekday of a month.
fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_month.pred_opt()?;
    let offset = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last.checked_sub_signed(Duration::days(offset as i64))
}

#[async_trait]
impl HolidayCalendar for UsFederalHolidays {
    async fn is_holiday(&self, date: NaiveDate) -> Result<bool, HolidayError> {
        Ok(self.contains(date))
    }
}
