use super::row::{merge_ranked, RankedRow};
use super::{MtdError, Section};

/// Builds a block of indexed fields from aligned value vectors.
///
/// For entity `i` (1-based) the primary vector yields `prefix[i]` and every
/// named vector yields `prefix[i]-name`, named attributes in declaration
/// order. A vector of length 1 is recycled over all entities; any other
/// length must match the longest vector.
///
/// # Example
///
/// ```
/// use mztabm::mtd::FieldBlock;
///
/// let cv = FieldBlock::new("cv")
///     .field("label", ["MS"])
///     .field("full_name", ["PSI-MS controlled vocabulary"])
///     .build()?;
///
/// assert_eq!(cv.get("cv[1]-label"), Some("MS"));
/// # Ok::<(), mztabm::mtd::MtdError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBlock {
    prefix: String,
    primary: Option<Vec<String>>,
    fields: Vec<(String, Vec<String>)>,
}

impl FieldBlock {
    /// Start a block whose keys begin with `prefix`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            primary: None,
            fields: Vec::new(),
        }
    }

    /// Set the unnamed value rendered as `prefix[i]`. A block has at most one;
    /// calling this again replaces it.
    pub fn primary<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.primary = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Add a named attribute rendered as `prefix[i]-name`
    pub fn field<I>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.fields
            .push((name.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    /// Add a named attribute only when `values` is `Some`
    pub fn field_opt(self, name: impl Into<String>, values: Option<Vec<String>>) -> Self {
        match values {
            Some(values) => self.field(name, values),
            None => self,
        }
    }

    /// Key prefix of this block
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of entities described by the block.
    ///
    /// Fails with [`MtdError::LengthMismatch`] when a vector is neither of
    /// length 1 nor of the common length.
    pub fn entity_count(&self) -> Result<usize, MtdError> {
        let count = self.vectors().map(|(_, v)| v.len()).max().unwrap_or(0);
        for (name, values) in self.vectors() {
            if values.len() != count && values.len() != 1 {
                return Err(MtdError::length_mismatch(
                    self.parameter_name(name),
                    count,
                    values.len(),
                ));
            }
        }
        Ok(count)
    }

    /// Render the block in entity order
    pub fn build(&self) -> Result<Section, MtdError> {
        Ok(merge_ranked(self.build_ranked()?))
    }

    pub(crate) fn build_ranked(&self) -> Result<Vec<RankedRow>, MtdError> {
        let count = self.entity_count()?;
        let mut rows = Vec::with_capacity(count * (self.fields.len() + 1));
        for i in 0..count {
            let index = i + 1;
            if let Some(primary) = &self.primary {
                rows.push(RankedRow::new(
                    index,
                    format!("{}[{}]", self.prefix, index),
                    recycled(primary, i),
                ));
            }
            for (name, values) in &self.fields {
                rows.push(RankedRow::new(
                    index,
                    format!("{}[{}]-{}", self.prefix, index, name),
                    recycled(values, i),
                ));
            }
        }
        Ok(rows)
    }

    fn vectors(&self) -> impl Iterator<Item = (Option<&str>, &Vec<String>)> {
        self.primary
            .iter()
            .map(|v| (None, v))
            .chain(self.fields.iter().map(|(n, v)| (Some(n.as_str()), v)))
    }

    fn parameter_name(&self, name: Option<&str>) -> String {
        match name {
            Some(name) => format!("{}-{}", self.prefix, name),
            None => self.prefix.clone(),
        }
    }
}

fn recycled(values: &[String], i: usize) -> &str {
    if values.len() == 1 {
        &values[0]
    } else {
        &values[i]
    }
}
