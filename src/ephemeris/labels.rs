//! Calendar labels along an ephemeris track.
//!
//! Every point is offered a candidate label derived from its date:
//!
//! * after the 6th of the month, the start of the current week of the month (`7`, `14`, `21`,
//!   `28`) as a minor label;
//! * otherwise the month abbreviation, followed by the year in January and on the first label
//!   of the track, as a major label.
//!
//! A candidate is attached only when its first three characters differ from the last attached
//! label, and the first label of a track waits for the 1st of a month.

use crate::{ephemeris::TrackLabel, time::CalendarDate};

/// Number of leading characters compared between consecutive labels
const LABEL_PREFIX_LEN: usize = 3;

#[derive(Debug, Default)]
pub(crate) struct LabelTracker {
    previous: Option<String>,
}

impl LabelTracker {
    /// Label to attach to the next point of the track, if any.
    ///
    /// Arguments
    /// ---------
    /// * `date`: the calendar date of the point
    ///
    /// Return
    /// ------
    /// * `Some(label)` when a label is attached to this point, `None` otherwise
    pub(crate) fn next_label(&mut self, date: CalendarDate) -> Option<TrackLabel> {
        let (text, sub_month) = candidate_text(date, self.previous.is_none());

        let previous_prefix = self.previous.as_deref().map_or("", label_prefix);
        if label_prefix(&text) == previous_prefix {
            return None;
        }
        if self.previous.is_none() && date.day != 1 {
            return None;
        }

        self.previous = Some(text.clone());
        Some(TrackLabel {
            text,
            date,
            sub_month,
        })
    }
}

fn candidate_text(date: CalendarDate, first_label: bool) -> (String, bool) {
    if date.day > 6 {
        ((date.day / 7 * 7).to_string(), true)
    } else if date.month == 1 || first_label {
        (format!("{} {}", date.month_abbreviation(), date.year), false)
    } else {
        (date.month_abbreviation().to_string(), false)
    }
}

fn label_prefix(text: &str) -> &str {
    match text.char_indices().nth(LABEL_PREFIX_LEN) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
