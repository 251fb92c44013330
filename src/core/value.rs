use serde::{Deserialize, Serialize};

/// One entry of a loosely typed data array.
///
/// Hosts often hand over JSON arrays where numbers arrive as strings or holes
/// arrive as `null`; this keeps those entries intact until the layout decides
/// what is usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Number(f64),
    Text(String),
    Missing,
}

impl DataValue {
    /// Returns the numeric value when the entry passes the numeric-validity test.
    ///
    /// Finite numbers are numeric. Strings are numeric when they trim to a
    /// finite number. Everything else is rejected.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => value.is_finite().then_some(*value),
            Self::Text(text) => parse_numeric_str(text),
            Self::Missing => None,
        }
    }

    /// Returns the entry as label text, or `None` when it is missing or empty.
    #[must_use]
    pub fn as_label(&self) -> Option<String> {
        match self {
            Self::Number(value) => Some(format_plain_number(*value)),
            Self::Text(text) if !text.is_empty() => Some(text.clone()),
            Self::Text(_) | Self::Missing => None,
        }
    }
}

impl Default for DataValue {
    fn default() -> Self {
        Self::Missing
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Numeric-validity predicate shared by every loosely typed input.
#[must_use]
pub fn parse_numeric_str(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Formats a number the way a label coming from a numeric array reads.
///
/// Integral values print without a fractional part; `-0` prints as `0`.
#[must_use]
pub fn format_plain_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::{DataValue, format_plain_number, parse_numeric_str};

    #[test]
    fn numeric_strings_are_accepted() {
        assert_eq!(DataValue::from(" 4.5 ").as_number(), Some(4.5));
        assert_eq!(DataValue::from("abc").as_number(), None);
        assert_eq!(DataValue::from("").as_number(), None);
        assert_eq!(DataValue::Number(f64::NAN).as_number(), None);
        assert_eq!(DataValue::Missing.as_number(), None);
        assert_eq!(parse_numeric_str("inf"), None);
    }

    #[test]
    fn labels_stringify_numbers_and_skip_empty_text() {
        assert_eq!(DataValue::Number(3.0).as_label().as_deref(), Some("3"));
        assert_eq!(DataValue::Number(2.5).as_label().as_deref(), Some("2.5"));
        assert_eq!(DataValue::from("").as_label(), None);
        assert_eq!(format_plain_number(-0.0), "0");
    }

    #[test]
    fn json_arrays_deserialize_loosely() {
        let values: Vec<DataValue> =
            serde_json::from_str(r#"[1, "2", null, "x"]"#).expect("parse values");
        assert_eq!(
            values,
            vec![
                DataValue::Number(1.0),
                DataValue::Text("2".to_owned()),
                DataValue::Missing,
                DataValue::Text("x".to_owned()),
            ]
        );
    }
}
