use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use crate::layout::{FigureLayout, TraceLayout};
use crate::trace::PieTrace;

use super::path::{side_path, slice_path};
use super::{
    ConnectorPrimitive, PieRenderFrame, SlicePart, SlicePrimitive, SliceStyle, TextPrimitive,
    TraceFrame,
};

/// Upper bound on the connector stroke width, in pixels.
pub const MAX_CONNECTOR_WIDTH: f64 = 2.0;

/// Turns a finished layout pass into drawables.
///
/// `traces` is the list the layout was computed from; layouts whose trace
/// index is out of range are skipped.
#[must_use]
pub fn build_render_frame(traces: &[PieTrace], layout: &FigureLayout) -> PieRenderFrame {
    let mut frame = PieRenderFrame::new(layout.plot_area);
    for trace_layout in &layout.traces {
        let Some(trace) = traces.get(trace_layout.trace_index) else {
            warn!(
                trace_index = trace_layout.trace_index,
                trace_count = traces.len(),
                "layout refers to a missing trace; skipping"
            );
            continue;
        };
        frame.traces.push(build_trace_frame(trace, trace_layout));
    }

    debug!(
        trace_count = frame.traces.len(),
        primitive_count = frame
            .traces
            .iter()
            .map(TraceFrame::primitive_count)
            .sum::<usize>(),
        "assembled pie render frame"
    );
    frame
}

fn build_trace_frame(trace: &PieTrace, layout: &TraceLayout) -> TraceFrame {
    let shape = &layout.shape;
    let mut frame = TraceFrame::new(layout.trace_index, trace.opacity);

    for (position, (record, slice)) in layout.reduced.slices.iter().zip(&shape.slices).enumerate() {
        let center = shape.slice_center(slice, trace.pull_for(record.index));
        let style = SliceStyle {
            fill: record.color,
            stroke: trace.line_color_for(record.index),
            stroke_width: trace.line_width_for(record.index),
        };

        frame.tops.push(SlicePrimitive {
            part: SlicePart::Top,
            slice: position,
            source_index: record.index,
            label: record.label.clone(),
            path: slice_path(shape, slice, center, trace.hole),
            style,
        });

        if trace.is_tilted() {
            frame.sides.push(SlicePrimitive {
                part: SlicePart::Side,
                slice: position,
                source_index: record.index,
                label: record.label.clone(),
                path: side_path(shape, slice, center),
                style: SliceStyle {
                    fill: record.color.darken(trace.shading * 100.0),
                    ..style
                },
            });
        }
    }

    // Far side first.
    frame
        .sides
        .sort_by_key(|side| OrderedFloat(shape.slices[side.slice].mid_depth));

    let connector_width = (trace.outside_font.size / 8.0).min(MAX_CONNECTOR_WIDTH);
    for label in layout.labels.iter().flatten() {
        if let Some(path) = label.connector_path() {
            frame.connectors.push(ConnectorPrimitive {
                slice: label.slice,
                path,
                stroke: trace.outside_font.color,
                stroke_width: connector_width,
            });
        }
        frame.texts.push(TextPrimitive {
            slice: label.slice,
            text: label.text.clone(),
            font: label.font.clone(),
            transform: label.svg_transform(),
        });
    }

    frame
}
