use serde::{Deserialize, Serialize};

/// An attribute given either once for the whole trace or per slice.
///
/// Per-slice arrays are indexed by the slice's source index (its position in
/// the `values` array), not by display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerSlice<T> {
    Scalar(T),
    Array(Vec<Option<T>>),
}

impl<T> PerSlice<T> {
    /// Value for source index `index`; `None` for holes or past the end of an array.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Array(values) => values.get(index).and_then(Option::as_ref),
        }
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Every present value, scalar or array entries.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        let (scalar, array) = match self {
            Self::Scalar(value) => (Some(value), None),
            Self::Array(values) => (None, Some(values.iter().flatten())),
        };
        scalar.into_iter().chain(array.into_iter().flatten())
    }
}

impl<T: Default> Default for PerSlice<T> {
    fn default() -> Self {
        Self::Scalar(T::default())
    }
}

impl<T> From<T> for PerSlice<T> {
    fn from(value: T) -> Self {
        Self::Scalar(value)
    }
}

impl<T> From<Vec<T>> for PerSlice<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Some).collect())
    }
}
