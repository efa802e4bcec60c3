use serde::{Deserialize, Serialize};

use super::custom::custom_ranked;
use super::multi::expand_ranked;
use super::row::{merge_ranked, RankedRow};
use super::value::{FieldValue, MultiValue};
use super::{FieldBlock, MtdError, Section};

/// Input for the `sample[i]` rows of an MTD section.
///
/// Identity of a sample is its position in `sample`. The four characteristics
/// are independent multi-value fields; a sample with an empty list for one of
/// them gets no row for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleSection {
    /// Sample names (mandatory)
    pub sample: Vec<String>,
    /// Species terms per sample
    pub species: MultiValue,
    /// Tissue terms per sample
    pub tissue: MultiValue,
    /// Cell type terms per sample
    pub cell_type: MultiValue,
    /// Disease terms per sample
    pub disease: MultiValue,
    /// Free text description
    pub description: FieldValue<String>,
    /// Custom parameter columns, each with one value per sample
    pub custom: Vec<Vec<String>>,
}

impl SampleSection {
    /// Describe samples with the given names
    pub fn new<I>(sample: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            sample: sample.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Assemble the sample rows, grouped by sample index
    pub fn build(&self) -> Result<Section, MtdError> {
        let count = self.sample.len();
        if count == 0 {
            return Err(MtdError::MissingRequired("sample".to_string()));
        }

        let characteristics = [
            ("species", &self.species),
            ("tissue", &self.tissue),
            ("cell_type", &self.cell_type),
            ("disease", &self.disease),
        ];
        let mut resolved = Vec::with_capacity(characteristics.len());
        for (name, values) in characteristics {
            resolved.push((name, values.resolve(name, count)?));
        }
        let description = self.description.resolve("description", count)?;

        let mut rows: Vec<RankedRow> = FieldBlock::new("sample")
            .primary(self.sample.iter().map(String::as_str))
            .build_ranked()?;
        for (name, slots) in &resolved {
            if let Some(slots) = slots {
                rows.extend(expand_ranked("sample", name, slots));
            }
        }
        rows.extend(
            FieldBlock::new("sample")
                .field_opt("description", description)
                .build_ranked()?,
        );
        rows.extend(custom_ranked("sample", count, &self.custom)?);

        let section = merge_ranked(rows);
        log::debug!("assembled {} rows for {} samples", section.len(), count);
        Ok(section)
    }
}
