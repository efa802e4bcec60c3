use serde::{Deserialize, Serialize};

use crate::controlled_vocabulary::{ms_terms, CvTerm};

use super::multi::expand_ranked;
use super::row::merge_ranked;
use super::value::MultiValue;
use super::{FieldBlock, MtdError, Section};

/// mzTab-M version written when none is given
pub const MZTAB_M_VERSION: &str = "2.0.0-M";

/// The document level fields every MTD section starts with.
///
/// Unset vocabulary fields fall back to the terms in
/// [`ms_terms`](crate::controlled_vocabulary::ms_terms), which reference the
/// `MS` and `PRIDE` vocabularies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MtdHeader {
    /// `mzTab-version`
    pub version: String,
    /// `mzTab-ID` (mandatory)
    pub id: String,
    /// `title`
    pub title: Option<String>,
    /// `description`
    pub description: Option<String>,
    /// `software[i]` terms (at least one)
    pub software: Vec<String>,
    /// `software[i]-setting[j]` per software
    pub software_setting: MultiValue,
    /// `quantification_method`
    pub quantification_method: Option<String>,
    /// `small_molecule-quantification_unit`
    pub small_molecule_quantification_unit: Option<String>,
    /// `small_molecule_feature-quantification_unit`
    pub small_molecule_feature_quantification_unit: Option<String>,
    /// `small_molecule-identification_reliability`
    pub small_molecule_identification_reliability: Option<String>,
    /// `id_confidence_measure[i]` terms
    pub id_confidence_measure: Vec<String>,
}

impl Default for MtdHeader {
    fn default() -> Self {
        Self {
            version: MZTAB_M_VERSION.to_string(),
            id: String::new(),
            title: None,
            description: None,
            software: Vec::new(),
            software_setting: MultiValue::Absent,
            quantification_method: None,
            small_molecule_quantification_unit: None,
            small_molecule_feature_quantification_unit: None,
            small_molecule_identification_reliability: None,
            id_confidence_measure: Vec::new(),
        }
    }
}

impl MtdHeader {
    /// Header for the document `id` produced by `software`
    pub fn new(id: impl Into<String>, software: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            software: vec![software.into()],
            ..Default::default()
        }
    }

    /// Assemble the header rows
    pub fn build(&self) -> Result<Section, MtdError> {
        if self.id.trim().is_empty() {
            return Err(MtdError::MissingRequired("id".to_string()));
        }
        if self.software.is_empty() {
            return Err(MtdError::MissingRequired("software".to_string()));
        }

        let mut section = Section::new();
        section.push("mzTab-version", self.version.as_str());
        section.push("mzTab-ID", self.id.as_str());
        if let Some(title) = &self.title {
            section.push("title", title.as_str());
        }
        if let Some(description) = &self.description {
            section.push("description", description.as_str());
        }

        let mut software = FieldBlock::new("software")
            .primary(self.software.iter().map(String::as_str))
            .build_ranked()?;
        if let Some(settings) = self.software_setting.resolve("software_setting", self.software.len())? {
            software.extend(expand_ranked("software", "setting", &settings));
        }
        section.append(merge_ranked(software));

        let quantification_method = or_term(self.quantification_method.as_deref(), ms_terms::label_free_quantitation);
        let unit = ms_terms::arbitrary_quantification_unit;
        section.push("quantification_method", quantification_method);
        section.push(
            "small_molecule-quantification_unit",
            or_term(self.small_molecule_quantification_unit.as_deref(), unit),
        );
        section.push(
            "small_molecule_feature-quantification_unit",
            or_term(self.small_molecule_feature_quantification_unit.as_deref(), unit),
        );
        section.push(
            "small_molecule-identification_reliability",
            or_term(
                self.small_molecule_identification_reliability.as_deref(),
                ms_terms::compound_identification_confidence_level,
            ),
        );

        let confidence = if self.id_confidence_measure.is_empty() {
            vec![ms_terms::fragmentation_score().to_string()]
        } else {
            self.id_confidence_measure.clone()
        };
        section.append(FieldBlock::new("id_confidence_measure").primary(confidence).build()?);

        Ok(section)
    }
}

fn or_term(value: Option<&str>, default: fn() -> CvTerm) -> String {
    value.map_or_else(|| default().to_string(), str::to_string)
}
