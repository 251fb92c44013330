use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Color, PlotArea};
use crate::measure::TextMeasurer;
use crate::trace::PieTrace;

use super::{
    LabelPlacement, LayoutContext, PieShape, ReducedTrace, place_labels, reduce_trace, scale_pies,
    set_coords,
};

/// Complete layout of one visible pie trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceLayout {
    /// Position of the trace in the figure's trace list.
    pub trace_index: usize,
    pub reduced: ReducedTrace,
    pub shape: PieShape,
    /// Parallel to `reduced.slices`.
    pub labels: Vec<Option<LabelPlacement>>,
}

/// Result of one whole-figure layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    pub plot_area: PlotArea,
    /// Visible traces in figure order; hidden traces are absent.
    pub traces: Vec<TraceLayout>,
    /// Label → color assignments made during the pass.
    pub color_map: IndexMap<String, Color>,
}

impl FigureLayout {
    #[must_use]
    pub fn trace(&self, trace_index: usize) -> Option<&TraceLayout> {
        self.traces
            .iter()
            .find(|layout| layout.trace_index == trace_index)
    }
}

/// Runs a full layout pass with a fresh [`LayoutContext`].
pub fn layout_figure<M: TextMeasurer + ?Sized>(
    traces: &[PieTrace],
    plot_area: PlotArea,
    measurer: &M,
) -> FigureLayout {
    let mut ctx = LayoutContext::new();
    layout_figure_with_context(traces, plot_area, &mut ctx, measurer)
}

/// Runs a full layout pass over every trace.
///
/// Color assignment and scale groups span traces, so every trace is reduced
/// before any radius is fixed, and every radius is fixed before angles and
/// labels are computed.
pub fn layout_figure_with_context<M: TextMeasurer + ?Sized>(
    traces: &[PieTrace],
    plot_area: PlotArea,
    ctx: &mut LayoutContext,
    measurer: &M,
) -> FigureLayout {
    let reduced: Vec<(usize, &PieTrace, ReducedTrace)> = traces
        .iter()
        .enumerate()
        .filter_map(|(index, trace)| reduce_trace(trace, ctx).map(|r| (index, trace, r)))
        .collect();

    let pies: Vec<(&PieTrace, &ReducedTrace)> = reduced
        .iter()
        .map(|(_, trace, reduced)| (*trace, reduced))
        .collect();
    let geometries = scale_pies(&pies, plot_area);

    let layouts: Vec<TraceLayout> = reduced
        .into_iter()
        .zip(geometries)
        .map(|((trace_index, trace, reduced), geometry)| {
            let shape = set_coords(trace, &reduced, geometry);
            let labels = place_labels(trace, &reduced, &shape, measurer);
            TraceLayout {
                trace_index,
                reduced,
                shape,
                labels,
            }
        })
        .collect();

    debug!(
        trace_count = traces.len(),
        visible_count = layouts.len(),
        "pie layout pass complete"
    );

    FigureLayout {
        plot_area,
        traces: layouts,
        color_map: ctx.color_map().clone(),
    }
}
