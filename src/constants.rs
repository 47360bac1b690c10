//! # Constants and type definitions for skytrack
//!
//! This module centralizes the **angular conversion factors**, the **reference values** of
//! the ephemeris pipeline (sampling step, grid resolution, tick geometry) and the **unit
//! type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, hours ↔ degrees)
//! - Ephemeris sampling and coverage grid reference values
//! - Tick and label geometry used by the track renderer
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Degrees of right ascension per hour
pub const DEG_PER_HOUR: f64 = 15.0;

/// Hours in a full turn of right ascension
pub const HOURS_PER_TURN: f64 = 24.0;

// -------------------------------------------------------------------------------------------------
// Ephemeris sampling and sky coverage
// -------------------------------------------------------------------------------------------------

/// Sampling step requested from the ephemeris generator (days)
pub const EPHEMERIS_JD_STEP: f64 = 0.5;

/// Comment marker in the generator output
pub const COMMENT_MARKER: char = '#';

/// Reference number of right ascension bins (1.875° each)
pub const RA_BIN_COUNT: usize = 192;

/// Reference number of declination bins (1.25° each)
pub const DEC_BIN_COUNT: usize = 144;

/// Margin applied around the bounding window of all tracks
pub const ANGULAR_WIDTH_MARGIN: f64 = 1.1;

/// Above this width (degrees) a chart is promoted to the full sky
pub const FULL_SKY_THRESHOLD: Degree = 350.0;

/// Width of a full-sky chart (degrees)
pub const FULL_SKY_WIDTH: Degree = 360.0;

// -------------------------------------------------------------------------------------------------
// Track rendering
// -------------------------------------------------------------------------------------------------

/// Physical length of a month-start tick (cm)
pub const MAJOR_TICK_LENGTH: f64 = 0.2;

/// Physical length of a sub-month tick (cm)
pub const MINOR_TICK_LENGTH: f64 = 0.12;

/// Line width of a month-start tick
pub const MAJOR_TICK_LINE_WIDTH: f64 = 2.0;

/// Line width of a sub-month tick
pub const MINOR_TICK_LINE_WIDTH: f64 = 0.8;

/// Half-size of the exclusion box around any point, relative to the tick length
pub const POINT_EXCLUSION_FRACTION: f64 = 0.1;

/// Half-size of the exclusion box around a labelled tick, relative to the tick length
pub const LABEL_EXCLUSION_FRACTION: f64 = 0.4;

/// Distances of the label anchors from the track, relative to the tick length
pub const LABEL_ANCHOR_DISTANCES: [f64; 2] = [1.5, 1.85];

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Right ascension in hours
pub type Hour = f64;
/// Julian day number
pub type JulianDay = f64;
