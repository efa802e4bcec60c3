use serde::{Deserialize, Serialize};

use super::MtdError;

/// An optional attribute that may be supplied once for every entity or once
/// per entity.
///
/// Broadcast is resolved exactly once, at the assembler boundary, by
/// [`FieldValue::resolve`]. A `Scalar` or a one element `Sequence` is copied to
/// every entity; any other length must equal the entity count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue<T> {
    /// One value shared by every entity
    Scalar(T),
    /// One value per entity
    Sequence(Vec<T>),
    /// Attribute not supplied
    Absent,
}

impl<T> Default for FieldValue<T> {
    fn default() -> Self {
        FieldValue::Absent
    }
}

/// Per-entity lists of values (species, fragmentation methods, ...).
///
/// `Absent` means the attribute was not supplied at all; an empty inner list
/// means "this entity has no value" and is expanded to zero rows.
pub type MultiValue = FieldValue<Vec<String>>;

impl<T> FieldValue<T> {
    /// One value shared by every entity
    pub fn scalar(value: impl Into<T>) -> Self {
        FieldValue::Scalar(value.into())
    }

    /// One value per entity
    pub fn sequence<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        FieldValue::Sequence(values.into_iter().map(Into::into).collect())
    }

    /// Whether nothing was supplied. An empty sequence counts as absent.
    pub fn is_absent(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Sequence(v) => v.is_empty(),
            FieldValue::Scalar(_) => false,
        }
    }

    /// Number of supplied values, `None` when absent
    pub fn len(&self) -> Option<usize> {
        match self {
            FieldValue::Absent => None,
            FieldValue::Scalar(_) => Some(1),
            FieldValue::Sequence(v) if v.is_empty() => None,
            FieldValue::Sequence(v) => Some(v.len()),
        }
    }

    /// Apply `f` to every supplied value
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> FieldValue<U> {
        match self {
            FieldValue::Scalar(v) => FieldValue::Scalar(f(v)),
            FieldValue::Sequence(v) => FieldValue::Sequence(v.into_iter().map(f).collect()),
            FieldValue::Absent => FieldValue::Absent,
        }
    }
}

impl<T: Clone> FieldValue<T> {
    /// Resolve against `expected` entities, broadcasting length-1 input.
    ///
    /// Returns `Ok(None)` when absent. Any length other than 1 or `expected`
    /// is a [`MtdError::LengthMismatch`] naming `parameter`.
    pub fn resolve(&self, parameter: &str, expected: usize) -> Result<Option<Vec<T>>, MtdError> {
        match self {
            FieldValue::Absent => Ok(None),
            FieldValue::Sequence(v) if v.is_empty() => Ok(None),
            FieldValue::Scalar(v) => {
                log::trace!("broadcasting scalar '{}' to {} entities", parameter, expected);
                Ok(Some(vec![v.clone(); expected]))
            }
            FieldValue::Sequence(v) if v.len() == expected => Ok(Some(v.clone())),
            FieldValue::Sequence(v) if v.len() == 1 => {
                log::trace!("broadcasting '{}' to {} entities", parameter, expected);
                Ok(Some(vec![v[0].clone(); expected]))
            }
            FieldValue::Sequence(v) => Err(MtdError::length_mismatch(parameter, expected, v.len())),
        }
    }

    /// Resolve without broadcast: the length must be exactly `expected`.
    pub fn resolve_exact(&self, parameter: &str, expected: usize) -> Result<Option<Vec<T>>, MtdError> {
        match self {
            FieldValue::Absent => Ok(None),
            FieldValue::Sequence(v) if v.is_empty() => Ok(None),
            FieldValue::Scalar(v) if expected == 1 => Ok(Some(vec![v.clone()])),
            FieldValue::Scalar(_) => Err(MtdError::length_mismatch(parameter, expected, 1)),
            FieldValue::Sequence(v) if v.len() == expected => Ok(Some(v.clone())),
            FieldValue::Sequence(v) => Err(MtdError::length_mismatch(parameter, expected, v.len())),
        }
    }
}

impl From<&str> for FieldValue<String> {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue<String> {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<String>> for FieldValue<String> {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Sequence(values)
    }
}

impl From<Vec<&str>> for FieldValue<String> {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::sequence(values)
    }
}

impl From<usize> for FieldValue<usize> {
    fn from(value: usize) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<usize>> for FieldValue<usize> {
    fn from(values: Vec<usize>) -> Self {
        FieldValue::Sequence(values)
    }
}

impl From<Vec<Vec<String>>> for MultiValue {
    fn from(values: Vec<Vec<String>>) -> Self {
        FieldValue::Sequence(values)
    }
}

impl From<Vec<Vec<&str>>> for MultiValue {
    fn from(values: Vec<Vec<&str>>) -> Self {
        FieldValue::Sequence(
            values
                .into_iter()
                .map(|slot| slot.into_iter().map(str::to_string).collect())
                .collect(),
        )
    }
}

impl<T> From<Option<T>> for FieldValue<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Scalar)
    }
}
