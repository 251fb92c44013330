use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PieError, PieResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xffffff),
    ("red", 0xff0000),
    ("green", 0x008000),
    ("lime", 0x00ff00),
    ("blue", 0x0000ff),
    ("yellow", 0xffff00),
    ("cyan", 0x00ffff),
    ("magenta", 0xff00ff),
    ("orange", 0xffa500),
    ("purple", 0x800080),
    ("pink", 0xffc0cb),
    ("brown", 0xa52a2a),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("silver", 0xc0c0c0),
    ("navy", 0x000080),
    ("teal", 0x008080),
    ("olive", 0x808000),
    ("maroon", 0x800000),
];

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds an opaque color from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_rgb_u32(packed: u32) -> Self {
        Self::from_rgba8(
            ((packed >> 16) & 0xff) as u8,
            ((packed >> 8) & 0xff) as u8,
            (packed & 0xff) as u8,
            255,
        )
    }

    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            f64::from(alpha) / 255.0,
        )
    }

    /// Parses a CSS-style color string.
    ///
    /// Supported forms: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)`, `transparent` and a small set of named colors.
    /// Returns `None` for anything else.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let text = input.trim().to_ascii_lowercase();
        if text.is_empty() {
            return None;
        }
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(body) = text
            .strip_prefix("rgba(")
            .or_else(|| text.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_function(body);
        }
        if text == "transparent" {
            return Some(Self::rgba(0.0, 0.0, 0.0, 0.0));
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == text)
            .map(|(_, packed)| Self::from_rgb_u32(*packed))
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.red, self.green, self.blue, self.alpha]
            .iter()
            .all(|channel| channel.is_finite() && (0.0..=1.0).contains(channel))
    }

    pub fn validate(self) -> PieResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(PieError::InvalidData(
                "color channels must be finite and in [0, 1]".to_owned(),
            ))
        }
    }

    /// Raises HSL lightness by `amount` percentage points, clamped to white.
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        self.shift_lightness(amount / 100.0)
    }

    /// Lowers HSL lightness by `amount` percentage points, clamped to black.
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        self.shift_lightness(-amount / 100.0)
    }

    /// `#rrggbb`, alpha is dropped.
    #[must_use]
    pub fn to_hex(self) -> String {
        let [red, green, blue, _] = self.to_rgba8();
        format!("#{red:02x}{green:02x}{blue:02x}")
    }

    /// `rgb(r, g, b)` for opaque colors, `rgba(r, g, b, a)` otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        let [red, green, blue, _] = self.to_rgba8();
        if self.alpha >= 1.0 {
            format!("rgb({red}, {green}, {blue})")
        } else {
            let alpha = (self.alpha.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
            format!("rgba({red}, {green}, {blue}, {alpha})")
        }
    }

    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
            .map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    fn shift_lightness(self, delta: f64) -> Self {
        let (hue, saturation, lightness) = rgb_to_hsl(self.red, self.green, self.blue);
        let (red, green, blue) = hsl_to_rgb(hue, saturation, (lightness + delta).clamp(0.0, 1.0));
        Self::rgba(red, green, blue, self.alpha)
    }
}

impl FromStr for Color {
    type Err = PieError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
            .ok_or_else(|| PieError::InvalidData(format!("unrecognized color `{input}`")))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |index: usize| u8::from_str_radix(&hex[index..=index], 16).ok();
    let pair = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).ok();
    match hex.len() {
        3 => Some(Color::from_rgba8(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
            255,
        )),
        6 => Some(Color::from_rgba8(pair(0)?, pair(2)?, pair(4)?, 255)),
        8 => Some(Color::from_rgba8(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
        _ => None,
    }
}

fn parse_rgb_function(body: &str) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let mut channels = [0.0; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        let value = match part.strip_suffix('%') {
            Some(percent) => percent.parse::<f64>().ok()? / 100.0,
            None => part.parse::<f64>().ok()? / 255.0,
        };
        if !value.is_finite() {
            return None;
        }
        *slot = value.clamp(0.0, 1.0);
    }
    let alpha = match parts.get(3) {
        Some(part) => part.parse::<f64>().ok().filter(|a| a.is_finite())?,
        None => 1.0,
    };
    Some(Color::rgba(
        channels[0],
        channels[1],
        channels[2],
        alpha.clamp(0.0, 1.0),
    ))
}

fn rgb_to_hsl(red: f64, green: f64, blue: f64) -> (f64, f64, f64) {
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let lightness = (max + min) / 2.0;
    if max == min {
        return (0.0, 0.0, lightness);
    }

    let delta = max - min;
    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };
    let hue = if max == red {
        (green - blue) / delta + if green < blue { 6.0 } else { 0.0 }
    } else if max == green {
        (blue - red) / delta + 2.0
    } else {
        (red - green) / delta + 4.0
    };
    (hue / 6.0, saturation, lightness)
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (f64, f64, f64) {
    if saturation == 0.0 {
        return (lightness, lightness, lightness);
    }
    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;
    (
        hue_to_channel(p, q, hue + 1.0 / 3.0),
        hue_to_channel(p, q, hue),
        hue_to_channel(p, q, hue - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn parses_hex_and_functional_forms() {
        assert_eq!(
            Color::parse("#1f77b4").map(Color::to_hex).as_deref(),
            Some("#1f77b4")
        );
        assert_eq!(Color::parse("#fff").map(Color::to_hex).as_deref(), Some("#ffffff"));
        assert_eq!(
            Color::parse("rgb(255, 0, 0)").map(Color::to_hex).as_deref(),
            Some("#ff0000")
        );
        assert_eq!(
            Color::parse("rgba(0, 0, 255, 0.5)").map(Color::to_css).as_deref(),
            Some("rgba(0, 0, 255, 0.5)")
        );
        assert_eq!(Color::parse("Navy").map(Color::to_hex).as_deref(), Some("#000080"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::parse("").is_none());
        assert!(Color::parse("#12").is_none());
        assert!(Color::parse("#ggg").is_none());
        assert!(Color::parse("rgb(1, 2)").is_none());
        assert!(Color::parse("not-a-color").is_none());
    }

    #[test]
    fn lighten_and_darken_move_lightness() {
        let gray = Color::from_rgb_u32(0x808080);
        assert_eq!(gray.lighten(20.0).to_hex(), "#b3b3b3");
        assert_eq!(gray.darken(20.0).to_hex(), "#4d4d4d");
        assert_eq!(Color::from_rgb_u32(0xffffff).lighten(20.0).to_hex(), "#ffffff");
        assert_eq!(Color::from_rgb_u32(0x000000).darken(20.0).to_hex(), "#000000");
    }

    #[test]
    fn css_output_matches_rgb_function_form() {
        assert_eq!(Color::from_rgb_u32(0x1f77b4).to_css(), "rgb(31, 119, 180)");
    }
}
