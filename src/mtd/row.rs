use serde::{Deserialize, Serialize};

/// One line of an MTD section: a field name and its value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyedRow {
    /// Field name, e.g. `sample[2]-species[1]`
    pub key: String,
    /// Field value, passed through verbatim
    pub value: String,
}

impl KeyedRow {
    /// Create a new row
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for KeyedRow {
    fn from((key, value): (K, V)) -> Self {
        KeyedRow::new(key, value)
    }
}

/// An ordered sequence of keyed rows.
///
/// Order is significant: it is the final document order once a section has
/// been through [`sort_section`](super::sort_section).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section {
    rows: Vec<KeyedRow>,
}

impl Section {
    /// Create an empty section
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.rows.push(KeyedRow::new(key, value));
    }

    /// Append every row of `other`, keeping its order
    pub fn append(&mut self, other: Section) {
        self.rows.extend(other.rows);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the section has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in section order
    pub fn rows(&self) -> &[KeyedRow] {
        &self.rows
    }

    /// Iterate over rows in section order
    pub fn iter(&self) -> std::slice::Iter<'_, KeyedRow> {
        self.rows.iter()
    }

    /// Keys in section order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.key.as_str())
    }

    /// Value of the first row with exactly this key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.key == key)
            .map(|r| r.value.as_str())
    }

    /// Consume the section, returning its rows
    pub fn into_rows(self) -> Vec<KeyedRow> {
        self.rows
    }

    /// Serialize to a JSON array of `{key, value}` objects
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from the JSON produced by [`Section::to_json`]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Vec<KeyedRow>> for Section {
    fn from(rows: Vec<KeyedRow>) -> Self {
        Self { rows }
    }
}

impl<R: Into<KeyedRow>> FromIterator<R> for Section {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for Section {
    type Item = KeyedRow;
    type IntoIter = std::vec::IntoIter<KeyedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = &'a KeyedRow;
    type IntoIter = std::slice::Iter<'a, KeyedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// A row tagged with the 1-based index of the entity it belongs to.
///
/// Only lives while an assembler merges its attribute groups; the rank is
/// dropped by [`merge_ranked`] and never reaches the emitted key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankedRow {
    pub(crate) rank: usize,
    pub(crate) row: KeyedRow,
}

impl RankedRow {
    pub(crate) fn new(rank: usize, key: String, value: impl Into<String>) -> Self {
        Self {
            rank,
            row: KeyedRow {
                key,
                value: value.into(),
            },
        }
    }
}

/// Stable sort by entity rank, then strip the ranks.
///
/// Rows sharing a rank keep the order in which their attribute groups were
/// appended, which is what keeps declaration order within an entity.
pub(crate) fn merge_ranked(mut rows: Vec<RankedRow>) -> Section {
    rows.sort_by_key(|r| r.rank);
    rows.into_iter().map(|r| r.row).collect::<Vec<_>>().into()
}
