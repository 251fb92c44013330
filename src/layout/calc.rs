use std::collections::HashSet;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{Color, base_palette, default_color, format_percent, format_value, slice_palette};
use crate::measure::LINE_BREAK;
use crate::trace::PieTrace;

/// Per-figure state shared by every pie trace during one layout pass.
///
/// Holds the label → color assignments and the cursor into the default slice
/// palette. Create one per pass; reusing a context across passes carries
/// color assignments over.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutContext {
    color_map: IndexMap<String, Color>,
    default_color_count: usize,
    palette: Vec<Color>,
}

impl LayoutContext {
    /// Context using the standard ten-color base palette.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_palette(&base_palette())
    }

    /// Context whose slice palette derives from `base` (base, lighter, darker).
    #[must_use]
    pub fn with_base_palette(base: &[Color]) -> Self {
        Self {
            color_map: IndexMap::new(),
            default_color_count: 0,
            palette: slice_palette(base),
        }
    }

    /// Color assigned to `label` so far in this pass.
    #[must_use]
    pub fn color_for(&self, label: &str) -> Option<Color> {
        self.color_map.get(label).copied()
    }

    /// Label → color assignments in first-assignment order.
    #[must_use]
    pub fn color_map(&self) -> &IndexMap<String, Color> {
        &self.color_map
    }

    #[must_use]
    pub fn default_color_count(&self) -> usize {
        self.default_color_count
    }

    fn record(&mut self, label: &str, color: Color) {
        self.color_map.insert(label.to_owned(), color);
    }

    fn assign_default(&mut self, label: &str) -> Color {
        let color = default_color(&self.palette, self.default_color_count);
        self.default_color_count += 1;
        self.record(label, color);
        color
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new()
    }
}

/// One surviving data point of a trace, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceRecord {
    /// Position of the point in the trace's `values` array.
    pub index: usize,
    pub value: f64,
    pub label: String,
    pub color: Color,
    /// Label text, present when the trace shows any text info.
    pub text: Option<String>,
}

/// Output of data reduction for one visible trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedTrace {
    pub slices: Vec<SliceRecord>,
    /// Sum of every surviving value.
    pub total: f64,
}

impl ReducedTrace {
    /// Fraction of the total held by `value`; zero when the total is zero.
    #[must_use]
    pub fn fraction(&self, value: f64) -> f64 {
        if self.total > 0.0 {
            value / self.total
        } else {
            0.0
        }
    }
}

/// Filters, de-duplicates, colors, orders and labels a trace's data.
///
/// Returns `None` when the trace is hidden or has no usable value. Values that
/// are not numeric or are negative are dropped, as is every repeat of a label
/// already seen in this trace. Slices without an explicit or previously
/// mapped color take palette colors in display order, after sorting.
pub fn reduce_trace(trace: &PieTrace, ctx: &mut LayoutContext) -> Option<ReducedTrace> {
    if !trace.visible {
        debug!("skip hidden pie trace");
        return None;
    }

    let mut seen_labels = HashSet::new();
    let mut pending: Vec<(usize, f64, String, Option<Color>)> = Vec::new();
    let mut total = 0.0;

    for (index, raw) in trace.values.iter().enumerate() {
        let Some(value) = raw.as_number() else {
            continue;
        };
        if value < 0.0 {
            continue;
        }

        let label = trace.label_for(index);
        if !seen_labels.insert(label.clone()) {
            continue;
        }

        let color = match trace.explicit_color_for(index) {
            Some(color) => {
                ctx.record(&label, color);
                Some(color)
            }
            None => ctx.color_for(&label),
        };

        total += value;
        pending.push((index, value, label, color));
    }

    if pending.is_empty() {
        debug!(
            raw_count = trace.values.len(),
            "pie trace has no usable values"
        );
        return None;
    }

    if trace.sort {
        pending.sort_by(|a, b| OrderedFloat(b.1).cmp(&OrderedFloat(a.1)));
    }

    let mut reduced = ReducedTrace {
        slices: Vec::with_capacity(pending.len()),
        total,
    };
    for (index, value, label, color) in pending {
        let color = color.unwrap_or_else(|| ctx.assign_default(&label));
        reduced.slices.push(SliceRecord {
            index,
            value,
            label,
            color,
            text: None,
        });
    }

    if !trace.text_info.is_none() {
        for slice_index in 0..reduced.slices.len() {
            let text = slice_text(trace, &reduced, &reduced.slices[slice_index]);
            reduced.slices[slice_index].text = Some(text);
        }
    }

    debug!(
        raw_count = trace.values.len(),
        kept_count = reduced.slices.len(),
        total = reduced.total,
        "reduced pie trace"
    );
    Some(reduced)
}

fn slice_text(trace: &PieTrace, reduced: &ReducedTrace, slice: &SliceRecord) -> String {
    let info = trace.text_info;
    let mut parts: SmallVec<[String; 4]> = SmallVec::new();
    if info.label {
        parts.push(slice.label.clone());
    }
    if info.text {
        if let Some(custom) = trace.custom_text_for(slice.index) {
            parts.push(custom.to_owned());
        }
    }
    if info.value {
        parts.push(format_value(slice.value));
    }
    if info.percent {
        parts.push(format_percent(reduced.fraction(slice.value)));
    }
    parts.join(LINE_BREAK)
}
