use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PieError;

/// Which parts make up a slice label, resolved from a `label+text+value+percent`
/// flag list (or `none`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextInfo {
    pub label: bool,
    pub text: bool,
    pub value: bool,
    pub percent: bool,
}

impl TextInfo {
    pub const NONE: Self = Self {
        label: false,
        text: false,
        value: false,
        percent: false,
    };

    pub const PERCENT: Self = Self {
        percent: true,
        ..Self::NONE
    };

    pub const TEXT_PERCENT: Self = Self {
        text: true,
        percent: true,
        ..Self::NONE
    };

    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl FromStr for TextInfo {
    type Err = PieError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input == "none" {
            return Ok(Self::NONE);
        }
        let mut info = Self::NONE;
        for flag in input.split('+').map(str::trim) {
            match flag {
                "label" => info.label = true,
                "text" => info.text = true,
                "value" => info.value = true,
                "percent" => info.percent = true,
                other => {
                    return Err(PieError::InvalidData(format!(
                        "unknown textinfo flag `{other}`"
                    )));
                }
            }
        }
        Ok(info)
    }
}

impl fmt::Display for TextInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("none");
        }
        let flags = [
            (self.label, "label"),
            (self.text, "text"),
            (self.value, "value"),
            (self.percent, "percent"),
        ];
        let joined: Vec<&str> = flags
            .iter()
            .filter_map(|(on, name)| on.then_some(*name))
            .collect();
        f.write_str(&joined.join("+"))
    }
}

impl Serialize for TextInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TextInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Where a slice label goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Inside,
    Outside,
    /// Inside when the label fits at full size, outside otherwise.
    #[default]
    Auto,
    None,
}

impl TextPosition {
    #[must_use]
    pub fn allows_inside(self) -> bool {
        matches!(self, Self::Inside | Self::Auto)
    }

    #[must_use]
    pub fn allows_outside(self) -> bool {
        matches!(self, Self::Outside | Self::Auto)
    }
}
