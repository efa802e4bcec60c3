use serde::{Deserialize, Serialize};

use super::custom::custom_ranked;
use super::multi::expand_ranked;
use super::row::{merge_ranked, RankedRow};
use super::value::FieldValue;
use super::{FieldBlock, MtdError, Section};

/// How assays map onto ms_runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MsRunRefs {
    /// One run per assay, rendered as `assay[i]-ms_run_ref`
    PerAssay(Vec<String>),
    /// Pre-fractionated assays spanning several runs, rendered as
    /// `assay[i]-ms_run_ref[j]`. Every assay needs at least one run.
    Fractionated(Vec<Vec<String>>),
}

impl Default for MsRunRefs {
    fn default() -> Self {
        MsRunRefs::PerAssay(Vec::new())
    }
}

impl MsRunRefs {
    fn len(&self) -> usize {
        match self {
            MsRunRefs::PerAssay(refs) => refs.len(),
            MsRunRefs::Fractionated(refs) => refs.len(),
        }
    }
}

impl From<Vec<&str>> for MsRunRefs {
    fn from(refs: Vec<&str>) -> Self {
        MsRunRefs::PerAssay(refs.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for MsRunRefs {
    fn from(refs: Vec<String>) -> Self {
        MsRunRefs::PerAssay(refs)
    }
}

impl From<Vec<Vec<String>>> for MsRunRefs {
    fn from(refs: Vec<Vec<String>>) -> Self {
        MsRunRefs::Fractionated(refs)
    }
}

impl From<Vec<Vec<&str>>> for MsRunRefs {
    fn from(refs: Vec<Vec<&str>>) -> Self {
        MsRunRefs::Fractionated(
            refs.into_iter()
                .map(|runs| runs.into_iter().map(str::to_string).collect())
                .collect(),
        )
    }
}

/// Input for the `assay[i]` rows of an MTD section.
///
/// Identity of an assay is its position in `assay`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssaySection {
    /// Assay names (mandatory)
    pub assay: Vec<String>,
    /// Runs each assay was measured in (mandatory)
    pub ms_run_ref: MsRunRefs,
    /// External URI per assay
    pub external_uri: FieldValue<String>,
    /// Sample reference per assay, e.g. `sample[1]`. Never broadcast.
    pub sample_ref: FieldValue<String>,
    /// Custom parameter columns, each with one value per assay
    pub custom: Vec<Vec<String>>,
}

impl AssaySection {
    /// Describe assays with the given names and run mapping
    pub fn new<I>(assay: I, ms_run_ref: impl Into<MsRunRefs>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            assay: assay.into_iter().map(Into::into).collect(),
            ms_run_ref: ms_run_ref.into(),
            ..Default::default()
        }
    }

    /// Assemble the assay rows, grouped by assay index
    pub fn build(&self) -> Result<Section, MtdError> {
        let count = self.assay.len();
        if count == 0 {
            return Err(MtdError::MissingRequired("assay".to_string()));
        }
        if self.ms_run_ref.len() == 0 {
            return Err(MtdError::MissingRequired("ms_run_ref".to_string()));
        }
        if self.ms_run_ref.len() != count {
            return Err(MtdError::length_mismatch("ms_run_ref", count, self.ms_run_ref.len()));
        }
        if let MsRunRefs::Fractionated(slots) = &self.ms_run_ref {
            if let Some(i) = slots.iter().position(Vec::is_empty) {
                return Err(MtdError::MissingReference { assay: i + 1 });
            }
        }

        let external_uri = self.external_uri.resolve("external_uri", count)?;
        let sample_ref = self.sample_ref.resolve_exact("sample_ref", count)?;

        let mut rows: Vec<RankedRow> = FieldBlock::new("assay")
            .primary(self.assay.iter().map(String::as_str))
            .build_ranked()?;
        rows.extend(custom_ranked("assay", count, &self.custom)?);

        let block = FieldBlock::new("assay")
            .field_opt("external_uri", external_uri)
            .field_opt("sample_ref", sample_ref);
        match &self.ms_run_ref {
            MsRunRefs::PerAssay(refs) => {
                rows.extend(block.field("ms_run_ref", refs.iter().map(String::as_str)).build_ranked()?);
            }
            MsRunRefs::Fractionated(slots) => {
                rows.extend(block.build_ranked()?);
                rows.extend(expand_ranked("assay", "ms_run_ref", slots));
            }
        }

        let section = merge_ranked(rows);
        log::debug!("assembled {} rows for {} assays", section.len(), count);
        Ok(section)
    }
}
