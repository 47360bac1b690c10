//! # Viewport planning
//!
//! Turns the [`CoverageBounds`] of all ephemeris tracks into the chart parameters of an
//! auto-scaled chart: a [`ViewportSpec`] with centre, angular width, aspect ratio, projection
//! and the [`ChartStyle`] adjustments that go with the size of the chart.
//!
//! ## Projection choice
//!
//! | angular width (with 10% margin) | projection                   | aspect                          |
//! |---------------------------------|------------------------------|---------------------------------|
//! | ≤ 110°                          | [`Projection::Gnomonic`]     | `ceil(10·dec/ra)/10` in [0.5, 1.5] |
//! | > 110°                          | [`Projection::Rectangular`]  | `min(0.5, 1.8·dec/ra)`, or 1 for tall charts |
//!
//! Rectangular charts are physically larger (×1.6, ×0.7 more for tall narrow charts), use a
//! slightly smaller font, fewer stars and star labels, and no deep sky object names.
//! A chart wider than 350° becomes a full 360° chart.

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        Degree, Hour, ANGULAR_WIDTH_MARGIN, FULL_SKY_THRESHOLD, FULL_SKY_WIDTH, HOURS_PER_TURN,
    },
    coverage::CoverageBounds,
};

/// Widest chart still drawn with a gnomonic projection (degrees)
const GNOMONIC_MAX_WIDTH: Degree = 110.0;

/// Widest chart on which Flamsteed designations are written (degrees)
const FLAMSTEED_MAX_WIDTH: Degree = 22.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// Tangent-plane projection, for small fields
    Gnomonic,
    /// Wide-field RA/Dec rectangular projection
    Rectangular,
}

/// Styling parameters of the chart which depend on its sky area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Physical width of the plot (cm)
    pub width: f64,
    pub font_size: f64,
    /// Faintest magnitude of the stars displayed
    pub mag_min: f64,
    pub maximum_star_label_count: usize,
    pub messier_names: bool,
    pub ngc_names: bool,
    pub star_flamsteed_labels: bool,
    pub ra_line_count: usize,
    pub dec_line_count: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            width: 16.5,
            font_size: 1.0,
            mag_min: 6.0,
            maximum_star_label_count: 1000,
            messier_names: true,
            ngc_names: true,
            star_flamsteed_labels: true,
            ra_line_count: 24,
            dec_line_count: 18,
        }
    }
}

/// Sky area and projection of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSpec {
    /// Right ascension of the centre, in `[0, 24)`
    pub ra0: Hour,
    /// Declination of the centre
    pub dec0: Degree,
    pub angular_width: Degree,
    /// Height of the chart over its width
    pub aspect: f64,
    pub projection: Projection,
    pub style: ChartStyle,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        ViewportSpec {
            ra0: 0.0,
            dec0: 0.0,
            angular_width: 30.0,
            aspect: 1.0,
            projection: Projection::Gnomonic,
            style: ChartStyle::default(),
        }
    }
}

fn full_sky_cap(width: Degree) -> Degree {
    if width > FULL_SKY_THRESHOLD {
        FULL_SKY_WIDTH
    } else {
        width
    }
}

/// Viewport of an auto-scaled chart showing all of `bounds`.
///
/// Arguments
/// ---------
/// * `preset`: the viewport configured by the caller; its style is the starting point of the
///   adjustments
/// * `bounds`: the sky window covered by all tracks
///
/// Return
/// ------
/// * a new [`ViewportSpec`]; `preset` is left untouched
pub fn plan_viewport(preset: &ViewportSpec, bounds: &CoverageBounds) -> ViewportSpec {
    let ra_span = bounds.ra_span_deg();
    let dec_span = bounds.dec_span_deg();
    let angular_width = full_sky_cap(bounds.angular_width());

    let ra0 = ((bounds.ra_min + bounds.ra_max) / 2.).rem_euclid(HOURS_PER_TURN);
    let mut dec0 = (bounds.dec_min + bounds.dec_max) / 2.;

    let mut style = preset.style.clone();

    // Avoid having ridiculously many grid lines
    if angular_width > 20. {
        style.ra_line_count = style.ra_line_count.min(48);
    }
    if angular_width > 26. {
        style.ra_line_count = style.ra_line_count.min(24);
    }
    if angular_width > 24. {
        style.dec_line_count = style.dec_line_count.min(36);
    }
    if angular_width > FLAMSTEED_MAX_WIDTH {
        style.star_flamsteed_labels = false;
    }

    let viewport = if angular_width > GNOMONIC_MAX_WIDTH {
        style.width *= 1.6;
        style.font_size *= 0.95;
        style.mag_min = style.mag_min.min(5.);
        style.maximum_star_label_count = 25;
        style.messier_names = false;
        style.ngc_names = false;

        let mut aspect = (dec_span / ra_span * 1.8).min(0.5);

        // Tall narrow finder charts
        if dec_span / ra_span > 0.5 {
            aspect = 1.;
            style.width *= 0.7;
        }

        // Keep the plot within declinations -90 to 90
        let angular_height = angular_width * aspect;
        dec0 = dec0.max(-89. + angular_height / 2.);
        dec0 = dec0.min(89. - angular_height / 2.);

        ViewportSpec {
            ra0,
            dec0,
            angular_width,
            aspect,
            projection: Projection::Rectangular,
            style,
        }
    } else {
        let aspect = ((dec_span / ra_span * 10.).ceil() / 10.).clamp(0.5, 1.5);
        let angular_width =
            full_sky_cap(ra_span.max(dec_span / aspect) * ANGULAR_WIDTH_MARGIN);

        ViewportSpec {
            ra0,
            dec0,
            angular_width,
            aspect,
            projection: Projection::Gnomonic,
            style,
        }
    };

    info!(
        "Autoscaled chart: centre {:.2}h {:+.1}d, width {:.1} deg, aspect {:.2}, {:?} projection",
        viewport.ra0,
        viewport.dec0,
        viewport.angular_width,
        viewport.aspect,
        viewport.projection
    );
    viewport
}

#[cfg(test)]
mod viewport_test {
    use approx::assert_relative_eq;

    use super::*;

    fn bounds(ra_min: Hour, ra_max: Hour, dec_min: Degree, dec_max: Degree) -> CoverageBounds {
        CoverageBounds {
            ra_min,
            ra_max,
            dec_min,
            dec_max,
        }
    }

    #[test]
    fn test_single_bin_is_gnomonic() {
        let preset = ViewportSpec::default();
        let viewport = plan_viewport(&preset, &bounds(4.0, 4.125, 20.0, 21.25));

        assert_eq!(viewport.projection, Projection::Gnomonic);
        assert_relative_eq!(viewport.ra0, 4.0625, epsilon = 1e-12);
        assert_relative_eq!(viewport.dec0, 20.625, epsilon = 1e-12);
        assert_relative_eq!(viewport.aspect, 0.7, epsilon = 1e-12);
        assert_relative_eq!(viewport.angular_width, 2.0625, epsilon = 1e-12);
        assert_eq!(viewport.style, preset.style);
    }

    #[test]
    fn test_gnomonic_aspect_clamped() {
        let preset = ViewportSpec::default();

        // very tall window
        let viewport = plan_viewport(&preset, &bounds(1.0, 1.5, -10.0, 30.0));
        assert_eq!(viewport.projection, Projection::Gnomonic);
        assert_relative_eq!(viewport.aspect, 1.5, epsilon = 1e-12);
        assert_relative_eq!(viewport.angular_width, 40.0 / 1.5 * 1.1, epsilon = 1e-9);
        assert!(!viewport.style.star_flamsteed_labels);
        assert_eq!(viewport.style.ra_line_count, 24);

        // very wide window
        let viewport = plan_viewport(&preset, &bounds(1.0, 3.0, 0.0, 2.0));
        assert_relative_eq!(viewport.aspect, 0.5, epsilon = 1e-12);
        assert_relative_eq!(viewport.angular_width, 33.0, epsilon = 1e-9);
    }

    #[test]
    fn test_wide_window_is_rectangular() {
        let mut preset = ViewportSpec::default();
        preset.style.ra_line_count = 96;
        preset.style.dec_line_count = 72;

        let viewport = plan_viewport(&preset, &bounds(0.0, 12.0, -10.0, 20.0));

        assert_eq!(viewport.projection, Projection::Rectangular);
        assert_relative_eq!(viewport.angular_width, 198.0, epsilon = 1e-9);
        assert_relative_eq!(viewport.aspect, 0.3, epsilon = 1e-12);
        assert_relative_eq!(viewport.ra0, 6.0, epsilon = 1e-12);
        assert_relative_eq!(viewport.dec0, 5.0, epsilon = 1e-12);

        let style = &viewport.style;
        assert_relative_eq!(style.width, 16.5 * 1.6, epsilon = 1e-12);
        assert_relative_eq!(style.font_size, 0.95, epsilon = 1e-12);
        assert_eq!(style.mag_min, 5.0);
        assert_eq!(style.maximum_star_label_count, 25);
        assert!(!style.messier_names);
        assert!(!style.ngc_names);
        assert!(!style.star_flamsteed_labels);
        assert_eq!(style.ra_line_count, 24);
        assert_eq!(style.dec_line_count, 36);

        // the preset itself is untouched
        assert_eq!(preset.style.ra_line_count, 96);
    }

    #[test]
    fn test_tall_rectangular_chart() {
        let preset = ViewportSpec::default();
        let viewport = plan_viewport(&preset, &bounds(0.0, 8.0, -30.0, 88.75));

        assert_eq!(viewport.projection, Projection::Rectangular);
        assert_relative_eq!(viewport.angular_width, 132.0, epsilon = 1e-9);
        assert_eq!(viewport.aspect, 1.0);
        assert_relative_eq!(viewport.style.width, 16.5 * 1.6 * 0.7, epsilon = 1e-12);
        // centre pulled down so that the top edge stays below +89
        assert_relative_eq!(viewport.dec0, 23.0, epsilon = 1e-9);
    }

    #[test]
    fn test_full_sky() {
        let preset = ViewportSpec::default();
        let viewport = plan_viewport(&preset, &bounds(3.0, 27.0, -90.0, 90.0));

        assert_eq!(viewport.projection, Projection::Rectangular);
        assert_eq!(viewport.angular_width, 360.0);
        assert_relative_eq!(viewport.aspect, 0.5, epsilon = 1e-12);
        assert_relative_eq!(viewport.ra0, 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_centre_wraps_around_24h() {
        let preset = ViewportSpec::default();
        let viewport = plan_viewport(&preset, &bounds(23.375, 24.625, 9.0, 11.0));
        assert_relative_eq!(viewport.ra0, 0.0, epsilon = 1e-12);

        let viewport = plan_viewport(&preset, &bounds(23.0, 24.5, 9.0, 11.0));
        assert_relative_eq!(viewport.ra0, 23.75, epsilon = 1e-12);
    }
}
