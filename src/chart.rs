//! # EphemerisChart: the ephemeris pipeline of a star chart
//!
//! This module defines [`EphemerisChart`], the façade which runs the stages of the ephemeris
//! pipeline for one chart, strictly in order:
//!
//! 1. **Load** every track of [`ChartConfig::ephemeris_definitions`] from an
//!    [`EphemerisSource`] ([`load_tracks`]).
//! 2. **Map** the sky coverage of all tracks ([`map_coverage`]).
//! 3. **Plan** the viewport: when autoscale is on and the coverage could be bounded, a new
//!    [`ViewportSpec`] is derived ([`plan_viewport`]); otherwise the preset viewport of the
//!    configuration is kept as is.
//! 4. **Render** the tracks on the canvas ([`PlannedChart::render`]).
//!
//! Each stage returns a new value. Rendering is only reachable from a [`PlannedChart`], so
//! points are never projected before the viewport is final.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use skytrack::chart::{ChartConfig, EphemerisChart};
//!
//! let config = ChartConfig {
//!     ephemeris_definitions: vec!["mars,2459000.5,2459100.5".into()],
//!     ephemeris_compute_path: "/usr/local/bin/ephem.bin".into(),
//!     ..ChartConfig::default()
//! };
//!
//! // Runs the external generator once per track, then sizes the chart around the tracks
//! let planned = EphemerisChart::new(config).plan()?;
//! println!("{:?}", planned.viewport());
//! # Ok::<(), skytrack::skytrack_errors::SkyTrackError>(())
//! ```
//!
//! ## Errors
//!
//! Loading errors are fatal and returned as [`SkyTrackError`]; no partial chart is produced.
//! A coverage which cannot be bounded only disables autoscale.

use camino::Utf8PathBuf;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    coverage::{map_coverage, GridResolution, SkyCoverage, SphericalMean, UnitVectorMean},
    ephemeris::{
        load_tracks,
        source::{EphemerisCompute, EphemerisSource},
        ObjectTrack,
    },
    render::{CanvasFrame, LabelLayer, LineDrawer, SkyProjection, TrackRenderer},
    skytrack_errors::SkyTrackError,
    viewport::{plan_viewport, ViewportSpec},
};

/// Ephemeris settings of a star chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Tracks to draw, as `"<object_id>,<jd_min>,<jd_max>"`
    pub ephemeris_definitions: Vec<String>,
    /// Path of the `ephemerisCompute` executable
    pub ephemeris_compute_path: Utf8PathBuf,
    /// Size the chart around the tracks
    pub ephemeris_autoscale: bool,
    /// Viewport used when autoscale is off or fails
    pub viewport: ViewportSpec,
    pub grid: GridResolution,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            ephemeris_definitions: Vec::new(),
            ephemeris_compute_path: Utf8PathBuf::from("ephemerisCompute"),
            ephemeris_autoscale: true,
            viewport: ViewportSpec::default(),
            grid: GridResolution::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EphemerisChart {
    config: ChartConfig,
}

impl EphemerisChart {
    pub fn new(config: ChartConfig) -> Self {
        EphemerisChart { config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Load the tracks with the configured `ephemerisCompute` and plan the viewport, using the
    /// unit-vector spherical mean.
    pub fn plan(&self) -> Result<PlannedChart, SkyTrackError> {
        let source = EphemerisCompute::new(self.config.ephemeris_compute_path.clone());
        self.plan_with(&source, &UnitVectorMean)
    }

    /// Load the tracks and plan the viewport.
    ///
    /// Arguments
    /// -----------------
    /// * `source`: where the ephemerides come from
    /// * `mean`: the spherical mean used to locate the centre of all tracks
    ///
    /// Return
    /// ----------
    /// * the planned chart, or the first fatal loading error
    pub fn plan_with<S, M>(&self, source: &S, mean: &M) -> Result<PlannedChart, SkyTrackError>
    where
        S: EphemerisSource + ?Sized,
        M: SphericalMean + ?Sized,
    {
        let tracks = load_tracks(&self.config.ephemeris_definitions, source)?;
        let coverage = map_coverage(&tracks, self.config.grid, mean)?;

        let planned_viewport = match (&coverage.bounds, self.config.ephemeris_autoscale) {
            (Some(bounds), true) => Some(plan_viewport(&self.config.viewport, bounds)),
            _ => None,
        };
        let autoscaled = planned_viewport.is_some();
        if self.config.ephemeris_autoscale && !autoscaled {
            info!("Ephemeris autoscale disabled, keeping the preset viewport");
        }

        Ok(PlannedChart {
            tracks,
            coverage,
            viewport: planned_viewport.unwrap_or_else(|| self.config.viewport.clone()),
            autoscaled,
        })
    }
}

/// Tracks of a chart together with their final viewport
#[derive(Debug, Clone)]
pub struct PlannedChart {
    tracks: Vec<ObjectTrack>,
    coverage: SkyCoverage,
    viewport: ViewportSpec,
    autoscaled: bool,
}

impl PlannedChart {
    pub fn tracks(&self) -> &[ObjectTrack] {
        &self.tracks
    }

    pub fn coverage(&self) -> &SkyCoverage {
        &self.coverage
    }

    pub fn viewport(&self) -> &ViewportSpec {
        &self.viewport
    }

    /// `true` when the viewport was derived from the tracks rather than taken from the preset
    pub fn is_autoscaled(&self) -> bool {
        self.autoscaled
    }

    /// Frame of a canvas spanning `[x_min, x_max] × [y_min, y_max]`, printed at the physical
    /// width of the final viewport, so that tick lengths follow the autoscaled chart size
    pub fn canvas_frame(&self, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> CanvasFrame {
        CanvasFrame::for_viewport(x_min, x_max, y_min, y_max, &self.viewport)
    }

    /// Draw every track, in definition order.
    ///
    /// Arguments
    /// -----------------
    /// * `projection`: the sky to canvas projection of the chart
    /// * `frame`: the drawable area of the canvas
    /// * `drawer`: receives the track paths and tick marks
    ///
    /// Return
    /// ----------
    /// * the exclusion regions and label candidates of all tracks, track after track
    pub fn render<P, D>(&self, projection: &P, frame: CanvasFrame, drawer: &mut D) -> LabelLayer
    where
        P: SkyProjection + ?Sized,
        D: LineDrawer + ?Sized,
    {
        let renderer = TrackRenderer::new(&self.viewport, projection, frame);
        let mut layer = LabelLayer::default();
        for track in &self.tracks {
            layer.append(renderer.render(track, drawer));
        }
        layer
    }
}

#[cfg(test)]
mod chart_test {
    use super::*;
    use crate::{ephemeris::source::StaticEphemeris, viewport::Projection};

    fn config(definitions: &[&str]) -> ChartConfig {
        ChartConfig {
            ephemeris_definitions: definitions.iter().map(|d| d.to_string()).collect(),
            ..ChartConfig::default()
        }
    }

    fn small_source() -> StaticEphemeris {
        StaticEphemeris::new().with_output(
            "ceres",
            "2459001.0 1.000 0.200\n2459001.5 1.001 0.201\n2459002.0 1.002 0.202\n",
        )
    }

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert!(config.ephemeris_autoscale);
        assert_eq!(config.ephemeris_compute_path, "ephemerisCompute");
        assert_eq!(config.grid.ra_bins, 192);
        assert_eq!(config.grid.dec_bins, 144);
    }

    #[test]
    fn test_plan_autoscaled() {
        let chart = EphemerisChart::new(config(&["ceres,2459001.0,2459002.0"]));
        let planned = chart.plan_with(&small_source(), &UnitVectorMean).unwrap();

        assert!(planned.is_autoscaled());
        assert_eq!(planned.tracks().len(), 1);
        assert_eq!(planned.tracks()[0].point_count(), 3);
        assert_eq!(planned.viewport().projection, Projection::Gnomonic);
        assert!(planned.viewport().angular_width < 5.0);
    }

    #[test]
    fn test_plan_without_autoscale_keeps_preset() {
        let mut config = config(&["ceres,2459001.0,2459002.0"]);
        config.ephemeris_autoscale = false;
        config.viewport.ra0 = 18.0;

        let planned = EphemerisChart::new(config.clone())
            .plan_with(&small_source(), &UnitVectorMean)
            .unwrap();
        assert!(!planned.is_autoscaled());
        assert_eq!(planned.viewport(), &config.viewport);
        assert!(planned.coverage().bounds.is_some());
    }

    #[test]
    fn test_canvas_frame_uses_final_width() {
        let mut config = config(&["ceres,2459001.0,2459002.0"]);
        config.viewport.style.width = 10.0;

        let planned = EphemerisChart::new(config)
            .plan_with(&small_source(), &UnitVectorMean)
            .unwrap();
        let frame = planned.canvas_frame(0.0, 5.0, -2.0, 2.0);
        assert_eq!(frame.canvas_per_cm, 0.5);
    }

    #[test]
    fn test_plan_fails_on_empty_track() {
        let chart = EphemerisChart::new(config(&[
            "ceres,2459001.0,2459002.0",
            "pallas,2459001.0,2459002.0",
        ]));
        let err = chart.plan_with(&small_source(), &UnitVectorMean).unwrap_err();
        assert_eq!(
            err,
            SkyTrackError::EmptyEphemeris {
                tool: "static".into(),
                object_id: "pallas".into()
            }
        );
    }
}
