//! # Sky coverage of the ephemeris tracks
//!
//! To auto-scale a chart, the sky area covered by all tracks is measured on a coarse occupancy
//! grid ([`SkyCoverageGrid`]) made of two independent axes:
//!
//! - **Right ascension** bins, with a **circular** topology: bin arithmetic wraps around 24h.
//! - **Declination** bins, with a **linear** topology: indices are clamped to `[0, n-1]`.
//!
//! The RA extent of a set of tracks is ambiguous on a circle (a track from 23h to 1h spans two
//! hours, not twenty-two). The ambiguity is lifted by starting from the point of the sky
//! **opposite** to the spherical mean of all points, and peeling coverage back from there:
//!
//! ```text
//!            centroid bin
//!                 ▼
//!   ....####......|......###....        # = occupied RA bin
//!   ◀── max scan ─┤ anti ├─ min scan ──▶ (both wrap around 24h)
//! ```
//!
//! The forward scan (from the antipodal bin + 1) finds `ra_bin_min`, the backward scan (from the
//! antipodal bin) finds `ra_bin_max`. If a scan reaches the centroid bin without meeting any
//! occupied bin, the tracks cannot be bounded and [`map_coverage`] reports no bounds: autoscale is
//! disabled for the chart, which is not an error.
//!
//! The spherical mean itself is delegated to a [`SphericalMean`] implementation; the default
//! [`UnitVectorMean`] averages the unit vectors of the points and normalizes the result.

use std::f64::consts::{FRAC_PI_2, PI};

use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        Degree, Hour, Radian, ANGULAR_WIDTH_MARGIN, DEC_BIN_COUNT, DEG_PER_HOUR, DPI,
        HOURS_PER_TURN, RA_BIN_COUNT,
    },
    ephemeris::ObjectTrack,
    skytrack_errors::SkyTrackError,
};

/// Computes the mean position of a set of points on the celestial sphere
pub trait SphericalMean {
    /// Arguments
    /// ---------
    /// * `positions`: `(ra, dec)` pairs in radians
    ///
    /// Return
    /// ------
    /// * the mean `(ra, dec)` in radians, with `ra` in `[0, 2π)`
    fn mean_position(&self, positions: &[(Radian, Radian)]) -> (Radian, Radian);
}

/// Spherical mean obtained by summing the unit vectors of the points
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitVectorMean;

impl SphericalMean for UnitVectorMean {
    fn mean_position(&self, positions: &[(Radian, Radian)]) -> (Radian, Radian) {
        let sum: Vector3<f64> = positions
            .iter()
            .map(|&(ra, dec)| {
                Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin())
            })
            .sum();

        let ra = sum.y.atan2(sum.x).rem_euclid(DPI);
        let dec = sum.z.atan2(sum.x.hypot(sum.y));
        (ra, dec)
    }
}

/// Number of bins of the coverage grid on each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridResolution {
    pub ra_bins: usize,
    pub dec_bins: usize,
}

impl Default for GridResolution {
    fn default() -> Self {
        GridResolution {
            ra_bins: RA_BIN_COUNT,
            dec_bins: DEC_BIN_COUNT,
        }
    }
}

/// Occupancy map of the sky, in right ascension and declination separately
#[derive(Debug, Clone, PartialEq)]
pub struct SkyCoverageGrid {
    ra_usage: Vec<bool>,
    dec_usage: Vec<bool>,
}

impl SkyCoverageGrid {
    pub fn new(resolution: GridResolution) -> Result<Self, SkyTrackError> {
        if resolution.ra_bins == 0 || resolution.dec_bins == 0 {
            return Err(SkyTrackError::InvalidGridResolution {
                ra_bins: resolution.ra_bins,
                dec_bins: resolution.dec_bins,
            });
        }

        Ok(SkyCoverageGrid {
            ra_usage: vec![false; resolution.ra_bins],
            dec_usage: vec![false; resolution.dec_bins],
        })
    }

    /// Build the grid and mark every point of every track
    pub fn from_tracks(
        tracks: &[ObjectTrack],
        resolution: GridResolution,
    ) -> Result<Self, SkyTrackError> {
        let mut grid = Self::new(resolution)?;
        for point in tracks.iter().flat_map(|track| &track.points) {
            grid.mark(point.ra, point.dec);
        }
        Ok(grid)
    }

    pub fn ra_bin_count(&self) -> usize {
        self.ra_usage.len()
    }

    pub fn dec_bin_count(&self) -> usize {
        self.dec_usage.len()
    }

    /// RA bin containing `ra`, wrapped around the circle
    pub fn ra_bin(&self, ra: Radian) -> usize {
        let n = self.ra_bin_count() as i64;
        ((ra / DPI * n as f64).floor() as i64).rem_euclid(n) as usize
    }

    /// Dec bin containing `dec`, clamped to the poles
    pub fn dec_bin(&self, dec: Radian) -> usize {
        let m = self.dec_bin_count() as i64;
        (((dec + FRAC_PI_2) / PI * m as f64).floor() as i64).clamp(0, m - 1) as usize
    }

    /// Lower and upper RA edges of a bin (radians)
    pub fn ra_bin_range(&self, bin: usize) -> (Radian, Radian) {
        let width = DPI / self.ra_bin_count() as f64;
        (bin as f64 * width, (bin + 1) as f64 * width)
    }

    /// Lower and upper Dec edges of a bin (radians)
    pub fn dec_bin_range(&self, bin: usize) -> (Radian, Radian) {
        let width = PI / self.dec_bin_count() as f64;
        (
            bin as f64 * width - FRAC_PI_2,
            (bin + 1) as f64 * width - FRAC_PI_2,
        )
    }

    pub fn mark(&mut self, ra: Radian, dec: Radian) {
        let ra_bin = self.ra_bin(ra);
        let dec_bin = self.dec_bin(dec);
        self.ra_usage[ra_bin] = true;
        self.dec_usage[dec_bin] = true;
    }

    pub fn is_ra_occupied(&self, bin: usize) -> bool {
        self.ra_usage[bin % self.ra_bin_count()]
    }

    pub fn is_dec_occupied(&self, bin: usize) -> bool {
        self.dec_usage.get(bin).copied().unwrap_or(false)
    }

    /// Walk the RA bins from `start` until an occupied bin is found.
    ///
    /// The walk wraps around the circle and gives up on reaching `sentinel` (after testing it).
    /// Every bin is visited at most once, so the loop always ends.
    fn scan_ra(&self, start: usize, forward: bool, sentinel: usize) -> Option<usize> {
        let n = self.ra_bin_count();
        let mut bin = start % n;
        for _ in 0..n {
            if self.is_ra_occupied(bin) {
                return Some(bin);
            }
            if bin == sentinel {
                return None;
            }
            bin = if forward { (bin + 1) % n } else { (bin + n - 1) % n };
        }
        None
    }

    /// Smallest window containing all occupied bins, seen from the antipode of `centroid_ra`.
    ///
    /// Return
    /// ------
    /// * `None` if one of the four scans fails, in which case the chart must not be auto-scaled
    pub fn bounding_window(&self, centroid_ra: Radian) -> Option<CoverageBounds> {
        let n = self.ra_bin_count();
        let m = self.dec_bin_count();

        let centre_bin = self.ra_bin(centroid_ra);
        let anti_centre_bin = self.ra_bin(centroid_ra + PI);

        let ra_bin_min = self.scan_ra(anti_centre_bin + 1, true, centre_bin)?;
        let ra_bin_max = self.scan_ra(anti_centre_bin, false, centre_bin)?;
        let dec_bin_min = (0..m).find(|&bin| self.is_dec_occupied(bin))?;
        let dec_bin_max = (0..m).rev().find(|&bin| self.is_dec_occupied(bin))?;

        let hours_per_bin = HOURS_PER_TURN / n as f64;
        let degrees_per_bin = 180. / m as f64;

        let ra_min = ra_bin_min as f64 * hours_per_bin;
        // ra_bin_max is the last occupied bin, the window closes on its upper edge
        let mut ra_max = (ra_bin_max + 1) as f64 * hours_per_bin;
        while ra_max <= ra_min {
            ra_max += HOURS_PER_TURN;
        }
        while ra_max > ra_min + HOURS_PER_TURN {
            ra_max -= HOURS_PER_TURN;
        }

        Some(CoverageBounds {
            ra_min,
            ra_max,
            dec_min: dec_bin_min as f64 * degrees_per_bin - 90.,
            dec_max: (dec_bin_max + 1) as f64 * degrees_per_bin - 90.,
        })
    }
}

/// Sky window containing every track.
///
/// `ra_max` is always greater than `ra_min` and may exceed 24h when the window wraps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageBounds {
    pub ra_min: Hour,
    pub ra_max: Hour,
    pub dec_min: Degree,
    pub dec_max: Degree,
}

impl CoverageBounds {
    pub fn ra_span_hours(&self) -> Hour {
        self.ra_max - self.ra_min
    }

    pub fn ra_span_deg(&self) -> Degree {
        self.ra_span_hours() * DEG_PER_HOUR
    }

    pub fn dec_span_deg(&self) -> Degree {
        self.dec_max - self.dec_min
    }

    /// Largest of the two spans with the chart margin, before any full-sky promotion
    pub fn angular_width(&self) -> Degree {
        self.ra_span_deg().max(self.dec_span_deg()) * ANGULAR_WIDTH_MARGIN
    }
}

/// Result of the coverage mapping of all tracks
#[derive(Debug, Clone, PartialEq)]
pub struct SkyCoverage {
    pub grid: SkyCoverageGrid,
    /// Spherical mean of all points `(ra, dec)`, radians
    pub centroid: (Radian, Radian),
    /// `None` when the tracks could not be bounded and autoscale must be disabled
    pub bounds: Option<CoverageBounds>,
}

/// Measure the sky area covered by all tracks.
///
/// Arguments
/// ---------
/// * `tracks`: the loaded ephemeris tracks
/// * `resolution`: the number of RA and Dec bins of the occupancy grid
/// * `mean`: the spherical mean routine used to locate the centroid of all points
///
/// Return
/// ------
/// * the grid, the centroid and the bounding window (if any), or
///   [`SkyTrackError::InvalidGridResolution`] for an empty grid
pub fn map_coverage<M: SphericalMean + ?Sized>(
    tracks: &[ObjectTrack],
    resolution: GridResolution,
    mean: &M,
) -> Result<SkyCoverage, SkyTrackError> {
    let grid = SkyCoverageGrid::from_tracks(tracks, resolution)?;

    let positions: Vec<(Radian, Radian)> = tracks
        .iter()
        .flat_map(|track| track.points.iter().map(|point| (point.ra, point.dec)))
        .collect();
    let centroid = mean.mean_position(&positions);

    let bounds = grid.bounding_window(centroid.0);
    match &bounds {
        Some(bounds) => {
            debug!(
                "  RA  range: {:.1}h to {:.1}h",
                bounds.ra_min, bounds.ra_max
            );
            debug!(
                "  Dec range: {:.1}d to {:.1}d",
                bounds.dec_min, bounds.dec_max
            );
            debug!("  Ang width: {:.1} deg", bounds.angular_width());
        }
        None => debug!(
            "Unable to bound {} ephemeris points around centroid RA {:.2}h, autoscale disabled",
            positions.len(),
            centroid.0 / DPI * HOURS_PER_TURN
        ),
    }

    Ok(SkyCoverage {
        grid,
        centroid,
        bounds,
    })
}
