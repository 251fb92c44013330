use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{PieError, PieResult};
use crate::trace::TextFont;

/// Which surface of a slice a path outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlicePart {
    Top,
    Side,
}

/// Fill and outline of one slice surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceStyle {
    pub fill: Color,
    pub stroke: Color,
    /// Zero means no outline.
    pub stroke_width: f64,
}

impl SliceStyle {
    pub fn validate(self) -> PieResult<()> {
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(PieError::InvalidData(
                "slice stroke width must be finite and >= 0".to_owned(),
            ));
        }
        self.fill.validate()?;
        self.stroke.validate()
    }
}

/// Draw command for one slice surface, as an SVG path in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlicePrimitive {
    pub part: SlicePart,
    /// Position of the slice in display order.
    pub slice: usize,
    /// Position of the slice's value in the trace's input data.
    pub source_index: usize,
    pub label: String,
    pub path: String,
    pub style: SliceStyle,
}

impl SlicePrimitive {
    pub fn validate(&self) -> PieResult<()> {
        validate_path(&self.path, "slice")?;
        self.style.validate()
    }
}

/// Draw command for one slice label.
///
/// The text is drawn centered on the origin of `transform`; lines are
/// separated by `<br>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub slice: usize,
    pub text: String,
    pub font: TextFont,
    pub transform: String,
}

impl TextPrimitive {
    pub fn validate(&self) -> PieResult<()> {
        if self.text.is_empty() {
            return Err(PieError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.font.size.is_finite() || self.font.size <= 0.0 {
            return Err(PieError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if has_non_finite_token(&self.transform) {
            return Err(PieError::InvalidData(
                "text transform must be finite".to_owned(),
            ));
        }
        self.font.color.validate()
    }
}

/// Leader line from a slice to a moved outside label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorPrimitive {
    pub slice: usize,
    pub path: String,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl ConnectorPrimitive {
    pub fn validate(&self) -> PieResult<()> {
        validate_path(&self.path, "connector")?;
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(PieError::InvalidData(
                "connector stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.stroke.validate()
    }
}

fn validate_path(path: &str, kind: &str) -> PieResult<()> {
    if path.is_empty() {
        return Err(PieError::InvalidData(format!("{kind} path must not be empty")));
    }
    if has_non_finite_token(path) {
        return Err(PieError::InvalidData(format!(
            "{kind} path coordinates must be finite"
        )));
    }
    Ok(())
}

fn has_non_finite_token(text: &str) -> bool {
    text.contains("NaN") || text.contains("inf")
}

#[cfg(test)]
mod tests {
    use super::{ConnectorPrimitive, SlicePart, SlicePrimitive, SliceStyle};
    use crate::core::Color;

    fn style() -> SliceStyle {
        SliceStyle {
            fill: Color::rgb(0.5, 0.5, 0.5),
            stroke: Color::rgb(0.0, 0.0, 0.0),
            stroke_width: 0.0,
        }
    }

    #[test]
    fn zero_stroke_width_is_valid_for_slices() {
        let slice = SlicePrimitive {
            part: SlicePart::Top,
            slice: 0,
            source_index: 0,
            label: "a".to_owned(),
            path: "M0,0l0,-10a10,10 0 1 1 0,20Z".to_owned(),
            style: style(),
        };
        assert!(slice.validate().is_ok());
    }

    #[test]
    fn non_finite_path_is_rejected() {
        let slice = SlicePrimitive {
            part: SlicePart::Side,
            slice: 0,
            source_index: 0,
            label: "a".to_owned(),
            path: "MNaN,0Z".to_owned(),
            style: style(),
        };
        assert!(slice.validate().is_err());
    }

    #[test]
    fn connector_needs_positive_width() {
        let connector = ConnectorPrimitive {
            slice: 1,
            path: "M0,0V10h2".to_owned(),
            stroke: Color::rgb(0.0, 0.0, 0.0),
            stroke_width: 0.0,
        };
        assert!(connector.validate().is_err());
    }
}
