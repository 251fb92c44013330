use serde::{Deserialize, Serialize};

use crate::core::{Color, DEFAULT_LINE_COLOR};

pub const DEFAULT_FONT_FAMILY: &str = "\"Open Sans\", verdana, arial, sans-serif";
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Fully resolved font used to measure and draw a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFont {
    pub family: String,
    pub size: f64,
    pub color: Color,
}

impl TextFont {
    #[must_use]
    pub fn new(family: impl Into<String>, size: f64, color: Color) -> Self {
        Self {
            family: family.into(),
            size,
            color,
        }
    }

    /// Whether switching between the two fonts changes text metrics.
    #[must_use]
    pub fn same_metrics(&self, other: &Self) -> bool {
        self.family == other.family && self.size == other.size
    }
}

impl Default for TextFont {
    fn default() -> Self {
        Self::new(
            DEFAULT_FONT_FAMILY,
            DEFAULT_FONT_SIZE,
            Color::from_rgb_u32(DEFAULT_LINE_COLOR),
        )
    }
}

/// Partially specified font; missing fields inherit from a parent font.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontSpec {
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
}

impl FontSpec {
    /// Fills unset or invalid fields from `parent`.
    #[must_use]
    pub fn resolve(&self, parent: &TextFont) -> TextFont {
        TextFont {
            family: self
                .family
                .clone()
                .filter(|family| !family.trim().is_empty())
                .unwrap_or_else(|| parent.family.clone()),
            size: self
                .size
                .filter(|size| size.is_finite() && *size >= 1.0)
                .unwrap_or(parent.size),
            color: self
                .color
                .as_deref()
                .and_then(Color::parse)
                .unwrap_or(parent.color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FontSpec, TextFont};

    #[test]
    fn missing_fields_inherit_from_parent() {
        let parent = TextFont::default();
        let spec = FontSpec {
            size: Some(18.0),
            color: Some("nonsense".to_owned()),
            ..FontSpec::default()
        };
        let font = spec.resolve(&parent);
        assert_eq!(font.size, 18.0);
        assert_eq!(font.family, parent.family);
        assert_eq!(font.color, parent.color);
        assert!(!font.same_metrics(&parent));
    }
}
