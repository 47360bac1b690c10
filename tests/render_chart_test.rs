mod common;

use common::{linear_ephemeris, DrawCommand, PlateCarree, RecordingDrawer};
use skytrack::{
    coverage::UnitVectorMean, ephemeris::source::StaticEphemeris, render::CanvasFrame,
    ChartConfig, EphemerisChart,
};

fn planned_chart() -> skytrack::PlannedChart {
    let source = StaticEphemeris::new()
        .with_output(
            "mars",
            linear_ephemeris(2459000.5, 2459100.5, (0.4, 0.05), (0.006, 0.002)),
        )
        .with_output(
            "ceres",
            linear_ephemeris(2459000.5, 2459040.5, (0.6, -0.05), (0.002, 0.001)),
        );

    EphemerisChart::new(ChartConfig {
        ephemeris_definitions: vec![
            "mars,2459000.5,2459100.5".into(),
            "ceres,2459000.5,2459040.5".into(),
        ],
        ..ChartConfig::default()
    })
    .plan_with(&source, &UnitVectorMean)
    .unwrap()
}

#[test]
fn test_render_all_tracks_in_view() {
    let planned = planned_chart();
    let frame = CanvasFrame::new(0., 90., -30., 30., 18.);

    let mut drawer = RecordingDrawer::default();
    let layer = planned.render(&PlateCarree, frame, &mut drawer);

    let mars = &planned.tracks()[0];
    let ceres = &planned.tracks()[1];
    let points = mars.point_count() + ceres.point_count();
    let labels = mars.labelled_points().count() + ceres.labelled_points().count();

    // one box per point, one more per label
    assert_eq!(layer.exclusion_regions.len(), points + labels);
    assert_eq!(layer.label_candidates.len(), labels);
    // path points plus two per tick
    assert_eq!(drawer.point_count(), points + 2 * labels);

    // mars candidates come first, in track order
    assert_eq!(layer.label_candidates[0].text, "Jun 2020");
    let mars_labels = mars.labelled_points().count();
    assert_eq!(layer.label_candidates[mars_labels].text, "Jun 2020");

    for candidate in &layer.label_candidates {
        assert_eq!(candidate.anchors.len(), 4);
        assert!(candidate.priority > 0.0 && candidate.priority < 0.0124);
    }

    // the track is drawn with a thin line, month ticks thick and other ticks thin
    assert!(drawer.commands.contains(&DrawCommand::LineWidth(1.0)));
    assert!(drawer.commands.contains(&DrawCommand::LineWidth(2.0)));
    assert!(drawer.commands.contains(&DrawCommand::LineWidth(0.8)));
}

#[test]
fn test_month_starts_outrank_weeks() {
    let planned = planned_chart();
    let frame = CanvasFrame::new(0., 90., -30., 30., 18.);
    let layer = planned.render(&PlateCarree, frame, &mut RecordingDrawer::default());

    let best_minor = layer
        .label_candidates
        .iter()
        .filter(|candidate| candidate.font_size < 1.7)
        .map(|candidate| candidate.priority)
        .fold(f64::INFINITY, f64::min);
    let worst_major = layer
        .label_candidates
        .iter()
        .filter(|candidate| candidate.font_size == 1.7)
        .map(|candidate| candidate.priority)
        .fold(f64::NEG_INFINITY, f64::max);

    assert!(worst_major < best_minor);
}

#[test]
fn test_out_of_view_points_produce_nothing() {
    let planned = planned_chart();
    // a frame far from both tracks
    let frame = CanvasFrame::new(200., 260., -30., 30., 18.);

    let mut drawer = RecordingDrawer::default();
    let layer = planned.render(&PlateCarree, frame, &mut drawer);

    assert!(layer.exclusion_regions.is_empty());
    assert!(layer.label_candidates.is_empty());
    assert_eq!(drawer.point_count(), 0);
}
