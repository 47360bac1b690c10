#![allow(dead_code)]

use std::fmt::Write;

use skytrack::{
    constants::Radian,
    render::{LineDrawer, SkyProjection},
    viewport::ViewportSpec,
};

/// Text output of a generator for an object moving uniformly on the sky, sampled every 0.5 day
pub fn linear_ephemeris(
    jd_start: f64,
    jd_end: f64,
    start: (Radian, Radian),
    rate_per_day: (Radian, Radian),
) -> String {
    let mut output = String::from("# jd ra dec\n\n");
    let steps = ((jd_end - jd_start) / 0.5).round() as usize;
    for i in 0..=steps {
        let days = 0.5 * i as f64;
        writeln!(
            output,
            "{:.6} {:.12} {:.12}",
            jd_start + days,
            start.0 + rate_per_day.0 * days,
            start.1 + rate_per_day.1 * days
        )
        .unwrap();
    }
    output
}

/// x = RA in degrees, y = Dec in degrees
pub struct PlateCarree;

impl SkyProjection for PlateCarree {
    fn project(&self, _viewport: &ViewportSpec, ra: Radian, dec: Radian) -> (f64, f64) {
        (ra.to_degrees(), dec.to_degrees())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    PenUp,
    Point(f64, f64),
    LineWidth(f64),
}

#[derive(Debug, Default)]
pub struct RecordingDrawer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingDrawer {
    pub fn point_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Point(..)))
            .count()
    }
}

impl LineDrawer for RecordingDrawer {
    fn pen_up(&mut self) {
        self.commands.push(DrawCommand::PenUp);
    }

    fn point(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Point(x, y));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }
}
