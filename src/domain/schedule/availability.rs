//! Availability evaluation and fallback selection.
//!
//! A department with window-shaped hours is closed when the clock falls
//! outside the window, on weekends, when the caller's context already says
//! "weekend or holiday", or on a recognized public holiday. The holiday
//! lookup itself is an external capability, so callers resolve it first and
//! pass the result in; this module stays pure.

use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::domain::directory::{DepartmentId, Directory};

use super::HoursSpec;

/// The caller-supplied "now": clock, date, weekday and the caller's own
/// weekend-or-holiday judgement.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    /// Local clock time.
    pub time: NaiveTime,
    /// Calendar date, used for the public-holiday lookup.
    pub date: NaiveDate,
    /// Day of week.
    pub weekday: Weekday,
    /// Caller-supplied weekend/holiday flag; applies on top of the
    /// weekday and holiday-calendar checks.
    pub weekend_or_holiday: bool,
}

impl Clock {
    /// Derives a clock from a local datetime with the flag left unset.
    pub fn from_datetime(dt: chrono::NaiveDateTime) -> Self {
        use chrono::Datelike;
        Self {
            time: dt.time(),
            date: dt.date(),
            weekday: dt.weekday(),
            weekend_or_holiday: false,
        }
    }

    /// Sets the caller's weekend-or-holiday flag.
    pub fn with_weekend_or_holiday(mut self, flag: bool) -> Self {
        self.weekend_or_holiday = flag;
        self
    }
}

/// Decides whether a department is currently available.
///
/// `is_public_holiday` is the resolved answer from the holiday calendar for
/// `clock.date`; it only matters for window-shaped hours.
pub fn is_available(spec: &HoursSpec, clock: &Clock, is_public_holiday: bool) -> bool {
    let (start, end) = match spec {
        HoursSpec::AlwaysOpen => return true,
        HoursSpec::Unrestricted => return true,
        HoursSpec::Window { start, end } => (*start, *end),
    };

    let in_window = start <= clock.time && clock.time <= end;
    let weekend = matches!(clock.weekday, Weekday::Sat | Weekday::Sun);

    in_window && !weekend && !clock.weekend_or_holiday && !is_public_holiday
}

/// Picks a fallback for a closed department.
///
/// Walks the directory in enumeration order, skipping the closed department
/// and any 24/7 department, and returns the first whose window contains the
/// current clock time. Unrestricted rows carry no window and are never
/// proposed. Returns `None` when nothing qualifies.
pub fn pick_fallback(
    directory: &Directory,
    closed: DepartmentId,
    time: NaiveTime,
) -> Option<DepartmentId> {
    directory
        .iter()
        .filter(|d| d.id != closed)
        .filter(|d| !matches!(d.hours_spec, HoursSpec::AlwaysOpen))
        .find(|d| {
            d.hours_spec
                .window()
                .is_some_and(|(start, end)| start <= time && time <= end)
        })
        .map(|d| d.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn tuesday_at(h: u32) -> Clock {
        Clock {
            time: t(h, 0),
            date: NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
            weekday: Weekday::Tue,
            weekend_or_holiday: false,
        }
    }

    fn nine_to_five() -> HoursSpec {
        HoursSpec::Window {
            start: t(9, 0),
            end: t(17, 0),
        }
    }

    #[test]
    fn always_open_ignores_everything() {
        let clock = Clock {
            time: t(3, 0),
            date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
            weekday: Weekday::Sun,
            weekend_or_holiday: true,
        };
        assert!(is_available(&HoursSpec::AlwaysOpen, &clock, true));
    }

    #[test]
    fn unrestricted_is_never_closed() {
        let clock = tuesday_at(2).with_weekend_or_holiday(true);
        assert!(is_available(&HoursSpec::Unrestricted, &clock, true));
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        assert!(is_available(&nine_to_five(), &tuesday_at(9), false));
        assert!(is_available(&nine_to_five(), &tuesday_at(17), false));
        assert!(!is_available(&nine_to_five(), &tuesday_at(8), false));
        assert!(!is_available(&nine_to_five(), &tuesday_at(18), false));
    }

    #[test]
    fn weekend_closes_a_window_department() {
        let saturday = Clock {
            weekday: Weekday::Sat,
            ..tuesday_at(10)
        };
        assert!(!is_available(&nine_to_five(), &saturday, false));
    }

    #[test]
    fn caller_flag_closes_a_window_department() {
        let clock = tuesday_at(10).with_weekend_or_holiday(true);
        assert!(!is_available(&nine_to_five(), &clock, false));
    }

    #[test]
    fn public_holiday_closes_a_window_department() {
        assert!(!is_available(&nine_to_five(), &tuesday_at(10), true));
    }

    #[test]
    fn fallback_skips_the_closed_department_and_always_open_rows() {
        let dir = Directory::hospital_defaults();
        // 10:00 is inside Virtual HelpDesk's 9-5 window; Hospital Reading
        // Rooms (24/7) must not be proposed even though it is open.
        let fb = pick_fallback(&dir, DepartmentId::WcinypIt, t(10, 0));
        assert_eq!(fb, Some(DepartmentId::VirtualHelpDesk));
    }

    #[test]
    fn fallback_is_none_when_no_window_contains_the_time() {
        let dir = Directory::hospital_defaults();
        // 22:00 is outside the only window-shaped row (Virtual HelpDesk).
        let fb = pick_fallback(&dir, DepartmentId::VirtualHelpDesk, t(22, 0));
        assert_eq!(fb, None);
    }

    #[test]
    fn fallback_never_proposes_the_closed_department_itself() {
        let dir = Directory::hospital_defaults();
        let fb = pick_fallback(&dir, DepartmentId::VirtualHelpDesk, t(10, 0));
        assert_eq!(fb, None);
    }
}
