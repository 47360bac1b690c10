use hifitime::{Epoch, Unit};

use crate::constants::JulianDay;

/// Three-letter English month abbreviations, January first
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A UTC calendar date, the time of day is dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    /// Three-letter abbreviation of the month of this date
    pub fn month_abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[usize::from(self.month.clamp(1, 12)) - 1]
    }
}

/// Transformation from julian date (JD, UTC) to a gregorian calendar date
///
/// The epoch is rounded to the nearest second before the calendar breakdown, so that
/// samples falling on midnight are not pushed to the previous day by floating point noise.
///
/// Argument
/// --------
/// * `jd`: a julian date in the UTC time scale
///
/// Return
/// ------
/// * the calendar date (year, month, day) of this instant
pub fn jd_to_calendar(jd: JulianDay) -> CalendarDate {
    let epoch = Epoch::from_jde_utc(jd).round(Unit::Second * 1);
    let (year, month, day, _, _, _, _) = epoch.to_gregorian_utc();
    CalendarDate { year, month, day }
}
