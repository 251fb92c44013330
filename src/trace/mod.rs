//! Typed pie trace configuration.
//!
//! [`PieTraceSpec`] mirrors the loosely typed attributes a host hands over;
//! [`PieTrace`] is the coerced form every layout stage reads.

mod font;
mod per_slice;
mod spec;
mod text_info;

pub use font::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, FontSpec, TextFont};
pub use per_slice::PerSlice;
pub use spec::{Direction, FigureDefaults, LineSpec, PieTraceSpec};
pub use text_info::{TextInfo, TextPosition};

use serde::{Deserialize, Serialize};

use crate::core::{Color, DEFAULT_LINE_COLOR, DataValue, Domain};

/// A resolved pie trace. Immutable once layout begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieTrace {
    pub visible: bool,
    pub values: Vec<DataValue>,
    pub labels: Option<Vec<DataValue>>,
    pub label0: f64,
    pub dlabel: f64,
    /// Explicit per-slice colors by source index; `None` where absent or unparsable.
    pub colors: Vec<Option<Color>>,
    pub text: Option<Vec<Option<String>>>,
    pub scale_group: Option<String>,
    pub text_info: TextInfo,
    pub text_position: PerSlice<TextPosition>,
    pub inside_font: TextFont,
    pub outside_font: TextFont,
    pub domain: Domain,
    /// Degrees.
    pub tilt: f64,
    /// Degrees.
    pub tilt_axis: f64,
    pub depth: f64,
    pub shading: f64,
    pub hole: f64,
    pub sort: bool,
    pub direction: Direction,
    /// Degrees.
    pub rotation: f64,
    pub line_color: PerSlice<Color>,
    pub line_width: PerSlice<f64>,
    pub pull: PerSlice<f64>,
    pub opacity: f64,
}

impl PieTrace {
    /// Label used when the labels array has no usable entry at `index`.
    #[must_use]
    pub fn fallback_label(&self, index: usize) -> String {
        let label = self.label0 + index as f64 * self.dlabel;
        crate::core::value::format_plain_number(label)
    }

    #[must_use]
    pub fn label_for(&self, index: usize) -> String {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(index))
            .and_then(DataValue::as_label)
            .unwrap_or_else(|| self.fallback_label(index))
    }

    #[must_use]
    pub fn custom_text_for(&self, index: usize) -> Option<&str> {
        self.text
            .as_ref()
            .and_then(|text| text.get(index))
            .and_then(Option::as_deref)
            .filter(|text| !text.is_empty())
    }

    #[must_use]
    pub fn explicit_color_for(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied().flatten()
    }

    /// Text position for source index `index`; holes in a per-slice array read as `auto`.
    #[must_use]
    pub fn text_position_for(&self, index: usize) -> TextPosition {
        if self.text_info.is_none() {
            return TextPosition::None;
        }
        self.text_position.get(index).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn pull_for(&self, index: usize) -> f64 {
        self.pull.get(index).copied().unwrap_or(0.0)
    }

    /// Largest pull over every slice, used to reserve room around the pie.
    #[must_use]
    pub fn max_pull(&self) -> f64 {
        self.pull.values().copied().fold(0.0, f64::max)
    }

    #[must_use]
    pub fn line_width_for(&self, index: usize) -> f64 {
        self.line_width.get(index).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn line_color_for(&self, index: usize) -> Color {
        self.line_color
            .get(index)
            .copied()
            .unwrap_or_else(|| Color::from_rgb_u32(DEFAULT_LINE_COLOR))
    }

    #[must_use]
    pub fn is_tilted(&self) -> bool {
        self.tilt != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, FigureDefaults, PerSlice, PieTraceSpec, TextInfo, TextPosition};
    use crate::core::Domain;

    #[test]
    fn resolve_applies_defaults() {
        let trace = PieTraceSpec::new([1.0, 2.0]).resolve(&FigureDefaults::default());
        assert!(trace.visible);
        assert!(trace.sort);
        assert_eq!(trace.direction, Direction::Ccw);
        assert_eq!(trace.text_info, TextInfo::PERCENT);
        assert_eq!(trace.text_position, PerSlice::Scalar(TextPosition::Auto));
        assert_eq!(trace.domain, Domain::FULL);
        assert_eq!(trace.depth, 0.5);
        assert_eq!(trace.shading, 0.2);
        assert_eq!(trace.line_color_for(0).to_hex(), "#444444");
        assert_eq!(trace.line_width_for(0), 0.0);
    }

    #[test]
    fn text_array_switches_default_text_info() {
        let trace = PieTraceSpec::new([1.0])
            .with_text(["a"])
            .resolve(&FigureDefaults::default());
        assert_eq!(trace.text_info, TextInfo::TEXT_PERCENT);
    }

    #[test]
    fn out_of_range_scalars_fall_back_to_defaults() {
        let trace = PieTraceSpec::new([1.0])
            .with_hole(1.5)
            .with_tilt(120.0, 30.0)
            .with_pull(-0.2)
            .with_domain([-1.0, 0.5], [0.25, 2.0])
            .resolve(&FigureDefaults::default());
        assert_eq!(trace.hole, 0.0);
        assert_eq!(trace.tilt, 0.0);
        assert_eq!(trace.tilt_axis, 30.0);
        assert_eq!(trace.pull_for(0), 0.0);
        assert_eq!(trace.domain, Domain::new([0.0, 0.5], [0.25, 1.0]));
    }

    #[test]
    fn empty_values_make_the_trace_invisible() {
        let empty: [f64; 0] = [];
        let trace = PieTraceSpec::new(empty).resolve(&FigureDefaults::default());
        assert!(!trace.visible);
        let missing = PieTraceSpec::default().resolve(&FigureDefaults::default());
        assert!(!missing.visible);
    }

    #[test]
    fn labels_fall_back_to_label0_and_dlabel() {
        let mut spec = PieTraceSpec::new([1.0, 2.0, 3.0]);
        spec.label0 = Some(10.0);
        spec.dlabel = Some(5.0);
        let trace = spec.resolve(&FigureDefaults::default());
        assert_eq!(trace.label_for(2), "20");

        let trace = PieTraceSpec::new([1.0, 2.0])
            .with_labels(["a", ""])
            .resolve(&FigureDefaults::default());
        assert_eq!(trace.label_for(0), "a");
        assert_eq!(trace.label_for(1), "1");
    }

    #[test]
    fn max_pull_scans_per_slice_arrays() {
        let trace = PieTraceSpec::new([1.0, 2.0, 3.0])
            .with_pull(vec![0.1, 0.4, 0.2])
            .resolve(&FigureDefaults::default());
        assert_eq!(trace.max_pull(), 0.4);
        assert_eq!(trace.pull_for(1), 0.4);
    }

    #[test]
    fn parses_json_attributes() {
        let spec = PieTraceSpec::from_json_str(
            r#"{"values": [1, "2", null], "labels": ["x", "y", "z"], "direction": "cw",
                "textinfo": "label+value", "textposition": ["inside", "outside"],
                "line": {"width": 2, "color": ["red", null]}}"#,
        )
        .expect("parse trace");
        let trace = spec.resolve(&FigureDefaults::default());
        assert_eq!(trace.direction, Direction::Cw);
        assert!(trace.text_info.label && trace.text_info.value);
        assert_eq!(trace.text_position_for(1), TextPosition::Outside);
        assert_eq!(trace.text_position_for(2), TextPosition::Auto);
        assert_eq!(trace.line_width_for(5), 2.0);
        assert_eq!(trace.line_color_for(0).to_hex(), "#ff0000");
        assert_eq!(trace.line_color_for(1).to_hex(), "#444444");
    }
}
