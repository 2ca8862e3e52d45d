//! Parsing of published hours-of-operation strings.
//!
//! Formats in the wild:
//! - `"24/7"`
//! - `"Mon–Fri, 9 AM–5 PM"` (a day-range prefix before the comma)
//! - `"7 AM–7 PM"`
//!
//! Anything else ("See Above", "Platform dependent") is kept as
//! [`HoursSpec::Unrestricted`]: such a department is never flagged
//! unavailable. Parsing happens once, at directory construction, so an
//! unrestricted row is visible (and logged) at startup instead of being a
//! silent per-request fallback.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Parsed hours of operation for a department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoursSpec {
    /// The literal "24/7": always available, no further checks apply.
    AlwaysOpen,
    /// A daily window; inclusive on both ends.
    Window {
        /// Opening time, 24-hour clock.
        start: NaiveTime,
        /// Closing time, 24-hour clock.
        end: NaiveTime,
    },
    /// Hours string did not parse; the department carries no time
    /// restriction.
    Unrestricted,
}

impl HoursSpec {
    /// Parses a published hours string.
    pub fn parse(hours: &str) -> Self {
        let s = hours.trim();
        if s == "24/7" {
            return HoursSpec::AlwaysOpen;
        }

        // Drop a leading "Mon–Fri," style day-range prefix.
        let range = match s.split_once(',') {
            Some((_days, rest)) => rest.trim(),
            None => s,
        };

        let (start_raw, end_raw) = match split_range(range) {
            Some(parts) => parts,
            None => return HoursSpec::Unrestricted,
        };

        match (parse_clock(start_raw), parse_clock(end_raw)) {
            (Some(start), Some(end)) => HoursSpec::Window { start, end },
            _ => HoursSpec::Unrestricted,
        }
    }

    /// Returns the window for window-shaped hours.
    pub fn window(&self) -> Option<(NaiveTime, NaiveTime)> {
        match self {
            HoursSpec::Window { start, end } => Some((*start, *end)),
            _ => None,
        }
    }
}

/// Splits "9 AM–5 PM" on the range delimiter (en dash or hyphen).
fn split_range(s: &str) -> Option<(&str, &str)> {
    s.split_once('\u{2013}').or_else(|| s.split_once('-'))
}

/// Parses a single "9 AM" / "12 PM" clock token into a 24-hour time.
fn parse_clock(token: &str) -> Option<NaiveTime> {
    // Published strings mix plain and narrow no-break spaces.
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    let upper = compact.to_ascii_uppercase();

    let (digits, meridiem) = if let Some(d) = upper.strip_suffix("AM") {
        (d, Meridiem::Am)
    } else if let Some(d) = upper.strip_suffix("PM") {
        (d, Meridiem::Pm)
    } else {
        return None;
    };

    let hour: u32 = digits.parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour24 = match (meridiem, hour) {
        (Meridiem::Am, 12) => 0,
        (Meridiem::Am, h) => h,
        (Meridiem::Pm, 12) => 12,
        (Meridiem::Pm, h) => h + 12,
    };
    NaiveTime::from_hms_opt(hour24, 0, 0)
}

#[derive(Clone, Copy)]
enum Meridiem {
    Am,
    Pm,
}
