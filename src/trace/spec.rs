use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Color, DEFAULT_LINE_COLOR, DataValue, Domain};
use crate::error::{PieError, PieResult};

use super::{FontSpec, PerSlice, PieTrace, TextFont, TextInfo, TextPosition};

/// Slice traversal direction starting from the rotation angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Cw,
    #[default]
    Ccw,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineSpec {
    #[serde(default)]
    pub color: Option<PerSlice<String>>,
    #[serde(default)]
    pub width: Option<PerSlice<f64>>,
}

/// Figure-wide defaults traces inherit from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FigureDefaults {
    pub font: TextFont,
}

/// Raw pie trace attributes as a host provides them.
///
/// Every field is optional. [`PieTraceSpec::resolve`] coerces the spec once
/// into a [`PieTrace`]: out-of-range scalars fall back to their defaults and
/// unparsable colors are treated as absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PieTraceSpec {
    #[serde(default)]
    pub values: Option<Vec<DataValue>>,
    #[serde(default)]
    pub labels: Option<Vec<DataValue>>,
    #[serde(default)]
    pub label0: Option<f64>,
    #[serde(default)]
    pub dlabel: Option<f64>,
    #[serde(default)]
    pub colors: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub text: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub scalegroup: Option<String>,
    #[serde(default)]
    pub textinfo: Option<TextInfo>,
    #[serde(default)]
    pub textposition: Option<PerSlice<TextPosition>>,
    #[serde(default)]
    pub textfont: Option<FontSpec>,
    #[serde(default)]
    pub insidetextfont: Option<FontSpec>,
    #[serde(default)]
    pub outsidetextfont: Option<FontSpec>,
    #[serde(default)]
    pub domain: Option<Domain>,
    #[serde(default)]
    pub tilt: Option<f64>,
    #[serde(default)]
    pub tiltaxis: Option<f64>,
    #[serde(default)]
    pub depth: Option<f64>,
    #[serde(default)]
    pub shading: Option<f64>,
    #[serde(default)]
    pub hole: Option<f64>,
    #[serde(default)]
    pub sort: Option<bool>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub line: Option<LineSpec>,
    #[serde(default)]
    pub pull: Option<PerSlice<f64>>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub visible: Option<bool>,
}

impl PieTraceSpec {
    #[must_use]
    pub fn new<V: Into<DataValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            values: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn from_json_str(input: &str) -> PieResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| PieError::InvalidData(format!("failed to parse pie trace json: {e}")))
    }

    #[must_use]
    pub fn with_labels<V: Into<DataValue>>(mut self, labels: impl IntoIterator<Item = V>) -> Self {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_colors<S: Into<String>>(mut self, colors: impl IntoIterator<Item = S>) -> Self {
        self.colors = Some(colors.into_iter().map(|c| Some(c.into())).collect());
        self
    }

    #[must_use]
    pub fn with_text<S: Into<String>>(mut self, text: impl IntoIterator<Item = S>) -> Self {
        self.text = Some(text.into_iter().map(|t| Some(t.into())).collect());
        self
    }

    #[must_use]
    pub fn with_scale_group(mut self, group: impl Into<String>) -> Self {
        self.scalegroup = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_text_info(mut self, info: TextInfo) -> Self {
        self.textinfo = Some(info);
        self
    }

    #[must_use]
    pub fn with_text_position(mut self, position: impl Into<PerSlice<TextPosition>>) -> Self {
        self.textposition = Some(position.into());
        self
    }

    #[must_use]
    pub fn with_text_font(mut self, font: FontSpec) -> Self {
        self.textfont = Some(font);
        self
    }

    #[must_use]
    pub fn with_inside_text_font(mut self, font: FontSpec) -> Self {
        self.insidetextfont = Some(font);
        self
    }

    #[must_use]
    pub fn with_outside_text_font(mut self, font: FontSpec) -> Self {
        self.outsidetextfont = Some(font);
        self
    }

    #[must_use]
    pub fn with_domain(mut self, x: [f64; 2], y: [f64; 2]) -> Self {
        self.domain = Some(Domain::new(x, y));
        self
    }

    /// Sets tilt (degrees back from face-on) and the tilt axis (degrees from straight up).
    #[must_use]
    pub fn with_tilt(mut self, tilt: f64, tilt_axis: f64) -> Self {
        self.tilt = Some(tilt);
        self.tiltaxis = Some(tilt_axis);
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn with_shading(mut self, shading: f64) -> Self {
        self.shading = Some(shading);
        self
    }

    #[must_use]
    pub fn with_hole(mut self, hole: f64) -> Self {
        self.hole = Some(hole);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LineSpec) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_pull(mut self, pull: impl Into<PerSlice<f64>>) -> Self {
        self.pull = Some(pull.into());
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Coerces the spec into a layout-ready trace.
    #[must_use]
    pub fn resolve(&self, defaults: &FigureDefaults) -> PieTrace {
        let values = self.values.clone().unwrap_or_default();
        let visible = self.visible.unwrap_or(true) && !values.is_empty();

        let text_info = self.textinfo.unwrap_or(if self.text.is_some() {
            TextInfo::TEXT_PERCENT
        } else {
            TextInfo::PERCENT
        });

        let text_font = self
            .textfont
            .as_ref()
            .map_or_else(|| defaults.font.clone(), |spec| spec.resolve(&defaults.font));
        let inside_font = self
            .insidetextfont
            .as_ref()
            .map_or_else(|| text_font.clone(), |spec| spec.resolve(&text_font));
        let outside_font = self
            .outsidetextfont
            .as_ref()
            .map_or_else(|| text_font.clone(), |spec| spec.resolve(&text_font));

        let line = self.line.clone().unwrap_or_default();
        let line_width = line
            .width
            .map(|width| coerce_per_slice("line.width", width, 0.0..=f64::MAX))
            .unwrap_or(PerSlice::Scalar(0.0));
        let default_line_color = Color::from_rgb_u32(DEFAULT_LINE_COLOR);
        let line_color = match line.color {
            Some(PerSlice::Scalar(color)) => {
                PerSlice::Scalar(Color::parse(&color).unwrap_or_else(|| {
                    warn!(attribute = "line.color", value = %color, "invalid color, using default");
                    default_line_color
                }))
            }
            Some(PerSlice::Array(colors)) => PerSlice::Array(
                colors
                    .into_iter()
                    .map(|color| color.as_deref().and_then(Color::parse))
                    .collect(),
            ),
            None => PerSlice::Scalar(default_line_color),
        };

        let pull = self
            .pull
            .clone()
            .map(|pull| coerce_per_slice("pull", pull, 0.0..=1.0))
            .unwrap_or(PerSlice::Scalar(0.0));

        PieTrace {
            visible,
            values,
            labels: self.labels.clone(),
            label0: coerce_number("label0", self.label0, f64::MIN..=f64::MAX, 0.0),
            dlabel: coerce_number("dlabel", self.dlabel, f64::MIN..=f64::MAX, 1.0),
            colors: self
                .colors
                .as_ref()
                .map(|colors| {
                    colors
                        .iter()
                        .map(|color| color.as_deref().and_then(Color::parse))
                        .collect()
                })
                .unwrap_or_default(),
            text: self.text.clone(),
            scale_group: self
                .scalegroup
                .clone()
                .filter(|group| !group.is_empty()),
            text_info,
            text_position: self.textposition.clone().unwrap_or_default(),
            inside_font,
            outside_font,
            domain: coerce_domain(self.domain),
            tilt: coerce_number("tilt", self.tilt, 0.0..=90.0, 0.0),
            tilt_axis: coerce_number("tiltaxis", self.tiltaxis, -360.0..=360.0, 0.0),
            depth: coerce_number("depth", self.depth, 0.0..=10.0, 0.5),
            shading: coerce_number("shading", self.shading, 0.0..=1.0, 0.2),
            hole: coerce_number("hole", self.hole, 0.0..=1.0, 0.0),
            sort: self.sort.unwrap_or(true),
            direction: self.direction.unwrap_or_default(),
            rotation: coerce_number("rotation", self.rotation, -360.0..=360.0, 0.0),
            line_color,
            line_width,
            pull,
            opacity: coerce_number("opacity", self.opacity, 0.0..=1.0, 1.0),
        }
    }
}

fn coerce_number(
    attribute: &'static str,
    value: Option<f64>,
    range: RangeInclusive<f64>,
    default: f64,
) -> f64 {
    match value {
        Some(value) if value.is_finite() && range.contains(&value) => value,
        Some(value) => {
            warn!(attribute, value, default, "attribute out of range, using default");
            default
        }
        None => default,
    }
}

fn coerce_per_slice(
    attribute: &'static str,
    values: PerSlice<f64>,
    range: RangeInclusive<f64>,
) -> PerSlice<f64> {
    match values {
        PerSlice::Scalar(value) => {
            PerSlice::Scalar(coerce_number(attribute, Some(value), range, 0.0))
        }
        PerSlice::Array(values) => PerSlice::Array(
            values
                .into_iter()
                .map(|value| value.filter(|v| v.is_finite() && range.contains(v)))
                .collect(),
        ),
    }
}

fn coerce_domain(domain: Option<Domain>) -> Domain {
    let Some(domain) = domain else {
        return Domain::FULL;
    };
    let axis = |name: &'static str, bounds: [f64; 2]| {
        [
            coerce_number(name, Some(bounds[0]), 0.0..=1.0, 0.0),
            coerce_number(name, Some(bounds[1]), 0.0..=1.0, 1.0),
        ]
    };
    Domain::new(axis("domain.x", domain.x), axis("domain.y", domain.y))
}
