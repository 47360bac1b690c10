//! # Ephemeris tracks
//!
//! This module turns **track definitions** (`"<object_id>,<jd_min>,<jd_max>"`) into
//! [`ObjectTrack`]s: ordered sequences of sky positions sampled every
//! [`EPHEMERIS_JD_STEP`] days, each optionally carrying a calendar label
//! to be printed next to the track on the chart.
//!
//! ## Overview
//!
//! 1. A definition string is parsed into a [`TrackDefinition`].
//! 2. An [`EphemerisSource`](crate::ephemeris::source::EphemerisSource) is queried for the
//!    definition (by default the external `ephemerisCompute` process, see
//!    [`EphemerisCompute`](crate::ephemeris::source::EphemerisCompute)).
//! 3. Each returned record is converted to a calendar date and run through the label
//!    policy of [`labels`](crate::ephemeris::labels).
//!
//! ```text
//! "mars,2459000.5,2459100.5"
//!        │ parse
//!        ▼
//!  TrackDefinition ──query──▶ Vec<EphemerisRecord> ──labels──▶ ObjectTrack
//! ```
//!
//! ## Errors
//!
//! A source which yields **no record at all** for a definition is fatal for the whole
//! chart: [`load_tracks`] stops and returns [`SkyTrackError::EmptyEphemeris`] naming the tool.
//! There is no retry.

pub mod labels;
pub mod parser;
pub mod source;

use std::str::FromStr;

use log::{debug, info};

use crate::{
    constants::{JulianDay, Radian, EPHEMERIS_JD_STEP},
    ephemeris::{labels::LabelTracker, parser::EphemerisRecord, source::EphemerisSource},
    skytrack_errors::SkyTrackError,
    time::{jd_to_calendar, CalendarDate},
};

/// The object and time range of one ephemeris track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackDefinition {
    pub object_id: String,
    pub jd_start: JulianDay,
    pub jd_end: JulianDay,
    pub jd_step: f64,
}

impl FromStr for TrackDefinition {
    type Err = SkyTrackError;

    /// Parse a definition of the form `"<object_id>,<jd_min>,<jd_max>"`.
    ///
    /// Surrounding whitespace and double quotes around the object identifier are ignored.
    fn from_str(definition: &str) -> Result<Self, Self::Err> {
        let invalid = || SkyTrackError::InvalidTrackDefinition(definition.to_string());

        let fields: Vec<&str> = definition.split(',').map(str::trim).collect();
        let [object_id, jd_min, jd_max] = fields[..] else {
            return Err(invalid());
        };

        let object_id = object_id.trim_matches('"');
        if object_id.is_empty() {
            return Err(invalid());
        }
        let jd_start: JulianDay = jd_min.parse().map_err(|_| invalid())?;
        let jd_end: JulianDay = jd_max.parse().map_err(|_| invalid())?;
        if !jd_start.is_finite() || !jd_end.is_finite() {
            return Err(invalid());
        }
        if jd_start > jd_end {
            return Err(SkyTrackError::InvalidTimeRange {
                object_id: object_id.to_string(),
                jd_min: jd_start,
                jd_max: jd_end,
            });
        }

        Ok(TrackDefinition {
            object_id: object_id.to_string(),
            jd_start,
            jd_end,
            jd_step: EPHEMERIS_JD_STEP,
        })
    }
}

/// A text label attached to a point of an ephemeris track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLabel {
    pub text: String,
    pub date: CalendarDate,
    /// `true` for the within-month labels (7, 14, 21, 28), `false` for month starts
    pub sub_month: bool,
}

impl TrackLabel {
    pub fn is_major(&self) -> bool {
        !self.sub_month
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub jd: JulianDay,
    /// Right ascension (radians, in [0, 2π))
    pub ra: Radian,
    /// Declination (radians)
    pub dec: Radian,
    pub label: Option<TrackLabel>,
}

/// The sampled path of one solar system object, in strictly increasing time order
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTrack {
    pub definition: TrackDefinition,
    pub points: Vec<TrackPoint>,
}

impl ObjectTrack {
    /// Build a track from the raw records of the ephemeris source, attaching labels.
    ///
    /// Arguments
    /// ---------
    /// * `definition`: the definition the records were computed for
    /// * `records`: the accepted records, in time order
    ///
    /// Return
    /// ------
    /// * the labelled track; its point count is the number of records
    pub fn from_records(definition: TrackDefinition, records: Vec<EphemerisRecord>) -> Self {
        let mut tracker = LabelTracker::default();
        let points = records
            .into_iter()
            .map(|record| TrackPoint {
                jd: record.jd,
                ra: record.ra,
                dec: record.dec,
                label: tracker.next_label(jd_to_calendar(record.jd)),
            })
            .collect();

        ObjectTrack { definition, points }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Iterate over the points which carry a label, with their index in the track
    pub fn labelled_points(&self) -> impl Iterator<Item = (usize, &TrackPoint, &TrackLabel)> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, point)| point.label.as_ref().map(|label| (i, point, label)))
    }
}

/// Fetch a single track from the ephemeris source.
///
/// Return
/// ------
/// * the track, or [`SkyTrackError::EmptyEphemeris`] if the source accepted no line
pub fn load_track<S: EphemerisSource + ?Sized>(
    definition: TrackDefinition,
    source: &S,
) -> Result<ObjectTrack, SkyTrackError> {
    let records = source.query(&definition)?;
    if records.is_empty() {
        return Err(SkyTrackError::EmptyEphemeris {
            tool: source.name().to_string(),
            object_id: definition.object_id,
        });
    }

    let track = ObjectTrack::from_records(definition, records);
    debug!(
        "{}: {} points, {} labels",
        track.definition.object_id,
        track.point_count(),
        track.labelled_points().count()
    );
    Ok(track)
}

/// Fetch every requested track, one after the other.
///
/// Arguments
/// ---------
/// * `definitions`: the track definition strings, `"<object_id>,<jd_min>,<jd_max>"`
/// * `source`: where the ephemerides come from
///
/// Return
/// ------
/// * the tracks in definition order; the first failing definition aborts the whole load
pub fn load_tracks<S, D>(definitions: &[D], source: &S) -> Result<Vec<ObjectTrack>, SkyTrackError>
where
    S: EphemerisSource + ?Sized,
    D: AsRef<str>,
{
    let tracks = definitions
        .iter()
        .map(|definition| load_track(definition.as_ref().parse()?, source))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        "Loaded {} ephemeris tracks ({} points) from {}",
        tracks.len(),
        tracks.iter().map(ObjectTrack::point_count).sum::<usize>(),
        source.name()
    );
    Ok(tracks)
}
