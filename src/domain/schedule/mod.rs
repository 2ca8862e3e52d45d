//! Hours-of-operation parsing and availability evaluation.

mod availability;
mod hours;

pub use availability::{is_available, pick_fallback, Clock};
pub use hours::HoursSpec;
