//! # skytrack
//!
//! Ephemeris tracks of solar system objects on star charts: fetching the tracks from an
//! external ephemeris generator, sizing the chart around them, and drawing them with dated
//! tick marks whose labels are handed over to a label-conflict resolver.
//!
//! ## Pipeline
//!
//! ```text
//! ephemeris ──▶ coverage ──▶ viewport ──▶ render
//!  (tracks)     (bounds)     (ViewportSpec) (paths, ticks, label candidates)
//! ```
//!
//! The [`chart`] module wires the stages together.

pub mod chart;
pub mod constants;
pub mod coverage;
pub mod ephemeris;
pub mod render;
pub mod skytrack_errors;
pub mod time;
pub mod viewport;

pub use chart::{ChartConfig, EphemerisChart, PlannedChart};
pub use skytrack_errors::SkyTrackError;
