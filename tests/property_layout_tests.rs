use std::f64::consts::TAU;

use pie_layout::api::{PieFigure, PieFigureConfig};
use pie_layout::core::{PlotArea, format_percent};
use pie_layout::layout::{independent_radius, layout_figure};
use pie_layout::measure::HeuristicTextMeasurer;
use pie_layout::render::NullRenderer;
use pie_layout::trace::{Direction, FigureDefaults, PieTraceSpec};
use proptest::prelude::*;

fn area() -> PlotArea {
    PlotArea::new(0.0, 0.0, 640.0, 480.0).expect("valid area")
}

proptest! {
    #[test]
    fn sweeps_cover_the_full_turn(
        values in prop::collection::vec(0.001f64..1_000.0, 1..40),
        clockwise in any::<bool>(),
        rotation in -360.0f64..360.0
    ) {
        let direction = if clockwise { Direction::Cw } else { Direction::Ccw };
        let trace = PieTraceSpec::new(values.clone())
            .with_direction(direction)
            .with_rotation(rotation)
            .resolve(&FigureDefaults::default());
        let layout = layout_figure(&[trace], area(), &HeuristicTextMeasurer::default());
        let shape = &layout.traces[0].shape;

        prop_assert_eq!(shape.slices.len(), values.len());
        let total: f64 = shape.slices.iter().map(|slice| slice.sweep()).sum();
        prop_assert!((total - TAU).abs() <= 1e-9);
        for slice in &shape.slices {
            prop_assert!(slice.sweep() >= 0.0);
        }
    }

    #[test]
    fn percent_text_is_always_finite(fraction in prop::num::f64::ANY) {
        let text = format_percent(fraction);
        prop_assert!(text.ends_with('%'));
        prop_assert!(!text.contains("NaN"));
        prop_assert!(!text.contains("inf"));
    }

    #[test]
    fn any_style_combination_renders_valid_geometry(
        values in prop::collection::vec(0.0f64..100.0, 1..12),
        hole in 0.0f64..0.95,
        tilt in 0.0f64..90.0,
        tilt_axis in -360.0f64..360.0,
        depth in 0.0f64..10.0,
        pull in 0.0f64..1.0
    ) {
        let mut figure = PieFigure::new(PieFigureConfig::new(area())).expect("figure init");
        figure.add_trace(
            &PieTraceSpec::new(values)
                .with_hole(hole)
                .with_tilt(tilt, tilt_axis)
                .with_depth(depth)
                .with_pull(pull),
        );
        let mut renderer = NullRenderer::default();
        let result = figure.render(&mut renderer, &HeuristicTextMeasurer::default());
        prop_assert!(result.is_ok(), "render failed: {:?}", result);
    }

    #[test]
    fn grouped_pies_never_outgrow_their_own_box(
        first in prop::collection::vec(0.1f64..100.0, 1..8),
        second in prop::collection::vec(0.1f64..100.0, 1..8),
        split in 0.1f64..0.9
    ) {
        let traces = vec![
            PieTraceSpec::new(first)
                .with_domain([0.0, split], [0.0, 1.0])
                .with_scale_group("g")
                .resolve(&FigureDefaults::default()),
            PieTraceSpec::new(second)
                .with_domain([split, 1.0], [0.0, 1.0])
                .with_scale_group("g")
                .resolve(&FigureDefaults::default()),
        ];
        let layout = layout_figure(&traces, area(), &HeuristicTextMeasurer::default());
        for (trace, trace_layout) in traces.iter().zip(&layout.traces) {
            let geometry = trace_layout.shape.geometry;
            prop_assert!(geometry.radius <= independent_radius(trace, area()) + 1e-9);
        }
        let a = layout.traces[0].shape.geometry;
        let b = layout.traces[1].shape.geometry;
        let density_a = a.radius * a.radius / a.total;
        let density_b = b.radius * b.radius / b.total;
        prop_assert!((density_a - density_b).abs() <= 1e-9 * density_a.max(density_b));
    }

    #[test]
    fn layout_is_deterministic(
        values in prop::collection::vec(0.0f64..50.0, 1..20),
        sort in any::<bool>()
    ) {
        let trace = PieTraceSpec::new(values)
            .with_sort(sort)
            .resolve(&FigureDefaults::default());
        let measurer = HeuristicTextMeasurer::default();
        let first = layout_figure(std::slice::from_ref(&trace), area(), &measurer);
        let second = layout_figure(std::slice::from_ref(&trace), area(), &measurer);
        prop_assert_eq!(first, second);
    }
}
