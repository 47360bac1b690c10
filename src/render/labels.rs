//! Priority and typography of the date labels along a track.
//!
//! The label-conflict resolver places candidates in increasing order of priority, so a lower
//! score wins. Only the relative order of scores matters, but the weights below are kept exact:
//!
//! ```text
//! priority = 0.0123
//!          + 1e-9 · index in track          earlier points first
//!          − 1e-5 · [month start]           major labels before minor ones
//!          − 2e-6 · [day == 14]
//!          − 1e-6 · [January or July]
//!          − 5e-7 · [April or October]
//! ```

use crate::ephemeris::TrackLabel;

pub const PRIORITY_BASE: f64 = 0.0123;
pub const PRIORITY_INDEX_STEP: f64 = 1e-9;
pub const MAJOR_LABEL_BONUS: f64 = 1e-5;
pub const MID_MONTH_BONUS: f64 = 2e-6;
pub const HALF_YEAR_MONTH_BONUS: f64 = 1e-6;
pub const QUARTER_MONTH_BONUS: f64 = 5e-7;

pub const MAJOR_LABEL_FONT_SIZE: f64 = 1.7;
pub const MINOR_LABEL_FONT_SIZE: f64 = 1.3;
pub const MAJOR_LABEL_MARGIN: f64 = 0.1;
pub const MINOR_LABEL_MARGIN: f64 = 0.4;

fn bonus(condition: bool, weight: f64) -> f64 {
    if condition {
        weight
    } else {
        0.0
    }
}

/// Priority of the label of the point at `index` in its track (lower is placed first)
pub fn label_priority(index: usize, label: &TrackLabel) -> f64 {
    let month = label.date.month;
    PRIORITY_BASE + PRIORITY_INDEX_STEP * index as f64
        - bonus(label.is_major(), MAJOR_LABEL_BONUS)
        - bonus(label.date.day == 14, MID_MONTH_BONUS)
        - bonus(month == 1 || month == 7, HALF_YEAR_MONTH_BONUS)
        - bonus(month == 4 || month == 10, QUARTER_MONTH_BONUS)
}

/// Font size and margin of a label
pub fn label_typography(label: &TrackLabel) -> (f64, f64) {
    if label.is_major() {
        (MAJOR_LABEL_FONT_SIZE, MAJOR_LABEL_MARGIN)
    } else {
        (MINOR_LABEL_FONT_SIZE, MINOR_LABEL_MARGIN)
    }
}
