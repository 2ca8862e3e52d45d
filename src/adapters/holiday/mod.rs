//! Holiday calendar adapters.

mod us_federal;

pub use us_federal::UsFederalHolidays;
