//! TOML description of a complete MTD section.
//!
//! Every assembler input can be written down in a study file instead of
//! being built in code:
//!
//! ```toml
//! # study.toml
//! [metadata]
//! id = "LIVER-TIMECOURSE"
//! software = ["[MS, MS:1002879, Progenesis QI, 3.0]"]
//!
//! [ms_run]
//! location = ["file:///data/run1.mzML", "file:///data/run2.mzML"]
//! scan_polarity = "positive"
//!
//! [assay]
//! assay = ["liver_0h", "liver_6h"]
//! ms_run_ref = ["ms_run[1]", "ms_run[2]"]
//!
//! [study_variable]
//! columns = ["timepoint"]
//!
//! [[design]]
//! name = "timepoint"
//! values = ["0h", "6h"]
//!
//! [[block]]
//! prefix = "instrument"
//! [[block.field]]
//! name = "name"
//! values = ["[MS, MS:1001911, Q Exactive, ]"]
//! ```
//!
//! Optional attributes take either a single value, broadcast to every entity,
//! or a list with one value per entity.
//!
//! Multi-value attributes (`species`, `tissue`, `cell_type`, `disease`,
//! `fragmentation_method`, software settings) hold a list per entity. A flat
//! list is one such list and is shared by every entity; per-entity lists
//! must be nested:
//!
//! ```toml
//! [sample]
//! sample = ["liver", "kidney"]
//! # both samples get two species rows
//! species = ["[NEWT, 9606, Homo sapiens (Human), ]", "[NEWT, 10090, Mus musculus (Mouse), ]"]
//! # one tissue row each
//! tissue = [["[BTO, BTO:0000759, liver, ]"], ["[BTO, BTO:0000671, kidney, ]"]]
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::controlled_vocabulary::CvDefinition;
use crate::design::{DesignError, DesignTable};
use crate::mtd::{
    assemble, AssaySection, FieldBlock, MsRunSection, MtdError, MtdHeader, SampleSection, Section,
    StudyVariableSection,
};

/// Errors raised while loading or applying a study file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File that was requested
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the expected layout
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// The inline design table is malformed
    #[error(transparent)]
    Design(#[from] DesignError),

    /// An assembler rejected its input
    #[error(transparent)]
    Mtd(#[from] MtdError),
}

/// A named vector of values, used for design columns and block fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValues {
    /// Column or attribute name
    pub name: String,
    /// One value per entity
    #[serde(default)]
    pub values: Vec<String>,
}

/// An ad hoc indexed block such as `instrument`, `contact` or `database`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    /// Entity prefix, e.g. `instrument`
    pub prefix: String,
    /// Values of the bare `prefix[i]` rows
    pub primary: Option<Vec<String>>,
    /// Named attributes in output order
    #[serde(rename = "field")]
    pub fields: Vec<NamedValues>,
}

impl BlockConfig {
    /// The equivalent indexed field block
    pub fn to_field_block(&self) -> FieldBlock {
        let mut block = FieldBlock::new(self.prefix.as_str());
        if let Some(primary) = &self.primary {
            block = block.primary(primary.iter().map(String::as_str));
        }
        for field in &self.fields {
            block = block.field(field.name.as_str(), field.values.iter().map(String::as_str));
        }
        block
    }
}

/// Root of a study file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Document level fields
    pub metadata: MtdHeader,
    /// Controlled vocabularies; PSI-MS and PRIDE when empty
    pub cv: Vec<CvDefinition>,
    /// Samples, if any are described
    pub sample: Option<SampleSection>,
    /// MS runs (mandatory)
    pub ms_run: MsRunSection,
    /// Assays (mandatory)
    pub assay: AssaySection,
    /// Study variable definition
    pub study_variable: StudyVariableSection,
    /// Inline design table, one entry per column
    pub design: Vec<NamedValues>,
    /// Additional indexed blocks
    #[serde(rename = "block")]
    pub blocks: Vec<BlockConfig>,
}

impl FromStr for StudyConfig {
    type Err = ConfigError;

    /// Parse a study file from a TOML string
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

impl StudyConfig {
    /// Load a study file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_str(&content)
    }

    /// The inline design table, if the file has one
    pub fn design_table(&self) -> Result<Option<DesignTable>, ConfigError> {
        if self.design.is_empty() {
            return Ok(None);
        }
        let columns = self
            .design
            .iter()
            .map(|c| (c.name.as_str(), c.values.iter().map(String::as_str).collect()))
            .collect::<Vec<(&str, Vec<&str>)>>();
        Ok(Some(DesignTable::from_columns(columns)?))
    }

    /// Run every assembler and return the sorted MTD section.
    ///
    /// `design` takes precedence over the inline design table. Without
    /// either, study variables are computed over a design with one row per
    /// assay and no columns.
    pub fn build_section(&self, design: Option<&DesignTable>) -> Result<Section, ConfigError> {
        let inline = self.design_table()?;
        let assays = self.assay.assay.len();
        let fallback;
        let design = match design.or(inline.as_ref()) {
            Some(design) => design,
            None => {
                fallback = DesignTable::with_assays(assays);
                &fallback
            }
        };
        if design.row_count() != assays {
            return Err(MtdError::LengthMismatch {
                parameter: "design rows".to_string(),
                expected: assays,
                found: design.row_count(),
            }
            .into());
        }

        let mut sections = vec![self.metadata.build()?];
        let cv = if self.cv.is_empty() {
            vec![CvDefinition::psi_ms(), CvDefinition::pride()]
        } else {
            self.cv.clone()
        };
        sections.push(CvDefinition::block(&cv)?);
        if let Some(sample) = &self.sample {
            sections.push(sample.build()?);
        }
        sections.push(self.ms_run.build()?);
        sections.push(self.assay.build()?);
        sections.push(self.study_variable.build(design)?);
        for block in &self.blocks {
            sections.push(block.to_field_block().build()?);
        }

        log::info!(
            "study '{}': {} ms runs, {} assays, {} extra blocks",
            self.metadata.id,
            self.ms_run.location.len(),
            assays,
            self.blocks.len()
        );
        Ok(assemble(sections))
    }
}
