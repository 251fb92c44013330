//! Text measurement hooks for label placement.
//!
//! Shaping and font handling live with the host renderer; label placement only
//! needs a bounding box for a label drawn with `text-anchor: middle` at the
//! origin, baseline on `y = 0`.

use serde::{Deserialize, Serialize};

use crate::trace::TextFont;

/// Marker separating lines inside a label string.
pub const LINE_BREAK: &str = "<br>";

/// Bounding box of a label positioned at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl TextBox {
    #[must_use]
    pub fn from_edges(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            width: right - left,
            height: bottom - top,
        }
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        (self.left + self.right) / 2.0
    }

    #[must_use]
    pub fn center_y(self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Measures label text for a given font.
///
/// Hosts plug in their real text engine; [`HeuristicTextMeasurer`] covers
/// headless use and tests.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &TextFont) -> TextBox;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &str, font: &TextFont) -> TextBox {
        (**self).measure(text, font)
    }
}

/// Fixed-advance estimate: each glyph is `advance_em` wide, lines are
/// `line_spacing_em` apart and the first line's ascent is `ascent_em`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicTextMeasurer {
    pub advance_em: f64,
    pub ascent_em: f64,
    pub descent_em: f64,
    pub line_spacing_em: f64,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            ascent_em: 0.8,
            descent_em: 0.2,
            line_spacing_em: 1.3,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font: &TextFont) -> TextBox {
        let lines: Vec<&str> = text.split(LINE_BREAK).collect();
        let longest = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let width = longest as f64 * self.advance_em * font.size;
        let top = -self.ascent_em * font.size;
        let bottom = (lines.len().saturating_sub(1) as f64 * self.line_spacing_em
            + self.descent_em)
            * font.size;
        TextBox::from_edges(-width / 2.0, width / 2.0, top, bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::{HeuristicTextMeasurer, TextMeasurer};
    use crate::trace::TextFont;

    #[test]
    fn heuristic_box_is_centered_on_the_anchor() {
        let font = TextFont::default();
        let bb = HeuristicTextMeasurer::default().measure("abcd", &font);
        assert!((bb.width - 4.0 * 0.6 * 12.0).abs() < 1e-9);
        assert!((bb.height - 12.0).abs() < 1e-9);
        assert!(bb.center_x().abs() < 1e-9);
    }

    #[test]
    fn line_breaks_grow_the_box_downward() {
        let font = TextFont::default();
        let measurer = HeuristicTextMeasurer::default();
        let one = measurer.measure("ab", &font);
        let two = measurer.measure("ab<br>abcd", &font);
        assert_eq!(one.top, two.top);
        assert!(two.bottom > one.bottom);
        assert!(two.width > one.width);
    }
}
