//! # Track rendering
//!
//! Draws ephemeris tracks on the chart canvas once the viewport is final, and prepares their
//! date labels for the label-conflict resolver.
//!
//! ## Collaborators
//!
//! The renderer does no projection and no label placement by itself. It talks to:
//!
//! * a [`SkyProjection`], mapping `(ra, dec)` to canvas coordinates for a [`ViewportSpec`];
//! * a [`LineDrawer`], the vector drawing primitive (pen, points, line width);
//! * the label resolver, through the [`LabelLayer`] it returns: exclusion rectangles that
//!   labels must avoid, and [`LabelCandidate`]s with up to four anchors and a priority.
//!
//! ## Per track
//!
//! 1. Project all points; draw the in-frame ones as a single path, skipping the others.
//! 2. Compute the local direction of the track at each point (the first two points use the
//!    direction measured at the third one).
//! 3. Every in-frame point gets a small exclusion box around it.
//! 4. Every in-frame labelled point gets a tick mark perpendicular to the track, a larger
//!    exclusion box, and a label candidate on either side of the tick.

pub mod alignment;
pub mod labels;

use itertools::{izip, Itertools};
use smallvec::SmallVec;

use crate::{
    constants::{
        Radian, LABEL_ANCHOR_DISTANCES, LABEL_EXCLUSION_FRACTION, MAJOR_TICK_LENGTH,
        MAJOR_TICK_LINE_WIDTH, MINOR_TICK_LENGTH, MINOR_TICK_LINE_WIDTH, POINT_EXCLUSION_FRACTION,
    },
    ephemeris::{ObjectTrack, TrackLabel},
    render::{
        alignment::label_alignment,
        labels::{label_priority, label_typography},
    },
    viewport::ViewportSpec,
};

/// Line width of the track itself
const TRACK_LINE_WIDTH: f64 = 1.0;

/// Sky to canvas projection
pub trait SkyProjection {
    /// Canvas coordinates of the sky position `(ra, dec)` (radians) on a chart showing `viewport`
    fn project(&self, viewport: &ViewportSpec, ra: Radian, dec: Radian) -> (f64, f64);
}

/// Vector line drawing primitive
pub trait LineDrawer {
    /// End the current polyline
    fn pen_up(&mut self);
    /// Extend the current polyline to `(x, y)`, or start a new one after [`LineDrawer::pen_up`]
    fn point(&mut self, x: f64, y: f64);
    fn set_line_width(&mut self, width: f64);
}

/// Drawable area of the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFrame {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Canvas units per physical centimetre
    pub canvas_per_cm: f64,
}

impl CanvasFrame {
    /// Frame of a canvas spanning `[x_min, x_max] × [y_min, y_max]`, printed `width_cm` wide
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, width_cm: f64) -> Self {
        CanvasFrame {
            x_min,
            x_max,
            y_min,
            y_max,
            canvas_per_cm: (x_max - x_min) / width_cm,
        }
    }

    /// Frame of a canvas spanning `[x_min, x_max] × [y_min, y_max]`, printed at the physical
    /// width of the finalized `viewport`
    pub fn for_viewport(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        viewport: &ViewportSpec,
    ) -> Self {
        Self::new(x_min, x_max, y_min, y_max, viewport.style.width)
    }

    /// `false` for points outside the frame, and for non-finite coordinates
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/// Axis-aligned canvas rectangle which labels must not overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionRegion {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ExclusionRegion {
    pub fn centred(x: f64, y: f64, half_size: f64) -> Self {
        ExclusionRegion {
            x_min: x - half_size,
            x_max: x + half_size,
            y_min: y - half_size,
            y_max: y + half_size,
        }
    }
}

/// A possible position of a label, with its alignment relative to `(x, y)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    pub h_align: i8,
    pub v_align: i8,
}

/// A label to be placed by the conflict resolver at one of its anchors
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCandidate {
    pub text: String,
    pub anchors: SmallVec<[LabelAnchor; 4]>,
    /// Lower values are placed first
    pub priority: f64,
    pub font_size: f64,
    pub margin: f64,
}

/// Exclusion regions and label candidates, in the order they were produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelLayer {
    pub exclusion_regions: Vec<ExclusionRegion>,
    pub label_candidates: Vec<LabelCandidate>,
}

impl LabelLayer {
    /// Append the content of `other` after the content of `self`
    pub fn append(&mut self, mut other: LabelLayer) {
        self.exclusion_regions.append(&mut other.exclusion_regions);
        self.label_candidates.append(&mut other.label_candidates);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TickStyle {
    /// Physical length (cm)
    length: f64,
    line_width: f64,
}

impl TickStyle {
    fn for_label(label: Option<&TrackLabel>) -> Self {
        match label {
            Some(label) if label.sub_month => TickStyle {
                length: MINOR_TICK_LENGTH,
                line_width: MINOR_TICK_LINE_WIDTH,
            },
            _ => TickStyle {
                length: MAJOR_TICK_LENGTH,
                line_width: MAJOR_TICK_LINE_WIDTH,
            },
        }
    }
}

/// Direction of travel (radians, canvas frame) at each projected point.
///
/// The direction at point `i` is measured from point `i - 1`. Points 0 and 1 take the
/// direction at point 2, or the last one available on shorter tracks. Non-finite directions
/// are replaced by 0.
pub(crate) fn track_directions(projected: &[(f64, f64)]) -> Vec<f64> {
    let steps: Vec<f64> = projected
        .iter()
        .tuple_windows()
        .map(|(previous, current)| (current.1 - previous.1).atan2(current.0 - previous.0))
        .collect();
    let initial = steps.get(1).or(steps.last()).copied().unwrap_or(0.0);

    (0..projected.len())
        .map(|i| if i < 2 { initial } else { steps[i - 1] })
        .map(|theta| if theta.is_finite() { theta } else { 0.0 })
        .collect()
}

/// Renders ephemeris tracks for one finalized viewport
pub struct TrackRenderer<'a, P: SkyProjection + ?Sized> {
    viewport: &'a ViewportSpec,
    projection: &'a P,
    frame: CanvasFrame,
}

impl<'a, P: SkyProjection + ?Sized> TrackRenderer<'a, P> {
    pub fn new(viewport: &'a ViewportSpec, projection: &'a P, frame: CanvasFrame) -> Self {
        TrackRenderer {
            viewport,
            projection,
            frame,
        }
    }

    /// Draw `track` and collect its label exclusion regions and label candidates.
    ///
    /// Arguments
    /// ---------
    /// * `track`: the track to draw
    /// * `drawer`: receives the track path and the tick marks
    ///
    /// Return
    /// ------
    /// * the exclusion regions and label candidates of this track, in track order
    pub fn render<D: LineDrawer + ?Sized>(&self, track: &ObjectTrack, drawer: &mut D) -> LabelLayer {
        let projected: Vec<(f64, f64)> = track
            .points
            .iter()
            .map(|point| self.projection.project(self.viewport, point.ra, point.dec))
            .collect();

        self.draw_path(&projected, drawer);

        let directions = track_directions(&projected);
        let mut layer = LabelLayer::default();

        for (i, (point, &(x, y), &theta)) in
            izip!(&track.points, &projected, &directions).enumerate()
        {
            if !self.frame.contains(x, y) {
                continue;
            }

            let tick = TickStyle::for_label(point.label.as_ref());
            let tick_len = tick.length * self.frame.canvas_per_cm;

            layer.exclusion_regions.push(ExclusionRegion::centred(
                x,
                y,
                tick_len * POINT_EXCLUSION_FRACTION,
            ));

            let Some(label) = &point.label else {
                continue;
            };

            layer.exclusion_regions.push(ExclusionRegion::centred(
                x,
                y,
                tick_len * LABEL_EXCLUSION_FRACTION,
            ));

            let (sin_theta, cos_theta) = theta.sin_cos();

            drawer.pen_up();
            drawer.set_line_width(tick.line_width);
            drawer.point(x + tick_len * sin_theta, y - tick_len * cos_theta);
            drawer.point(x - tick_len * sin_theta, y + tick_len * cos_theta);
            drawer.pen_up();

            let (h_align, v_align) = label_alignment(theta.to_degrees());
            let mut anchors = SmallVec::new();
            for distance in LABEL_ANCHOR_DISTANCES {
                let offset = distance * tick_len;
                anchors.push(LabelAnchor {
                    x: x + offset * sin_theta,
                    y: y - offset * cos_theta,
                    h_align,
                    v_align,
                });
                anchors.push(LabelAnchor {
                    x: x - offset * sin_theta,
                    y: y + offset * cos_theta,
                    h_align: -h_align,
                    v_align: -v_align,
                });
            }

            let (font_size, margin) = label_typography(label);
            layer.label_candidates.push(LabelCandidate {
                text: label.text.clone(),
                anchors,
                priority: label_priority(i, label),
                font_size,
                margin,
            });
        }

        layer
    }

    fn draw_path<D: LineDrawer + ?Sized>(&self, projected: &[(f64, f64)], drawer: &mut D) {
        drawer.pen_up();
        drawer.set_line_width(TRACK_LINE_WIDTH);
        for &(x, y) in projected.iter().filter(|&&(x, y)| self.frame.contains(x, y)) {
            drawer.point(x, y);
        }
        drawer.pen_up();
    }
}
