//! # Controlled Vocabulary Terms
//!
//! mzTab-M writes every ontology reference as a bracketed parameter,
//! `[LABEL, ACCESSION, NAME, VALUE]`. This module renders such parameters and
//! collects the handful of fixed terms the MTD builders fall back to.
//!
//! CV strings supplied by callers are never parsed or checked here; they are
//! passed through to the section verbatim.
//!
//! ## Reference
//! - PSI-MS OBO: https://raw.githubusercontent.com/HUPO-PSI/psi-ms-CV/master/psi-ms.obo
//! - mzTab-M 2.0: https://github.com/HUPO-PSI/mzTab-M

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::mtd::{FieldBlock, MtdError, Section};

/// A controlled vocabulary parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CvTerm {
    /// CV label (e.g., "MS"), empty for user parameters
    pub label: String,
    /// CV accession (e.g., "MS:1000130")
    pub accession: String,
    /// Human-readable name
    pub name: String,
    /// Optional value associated with the term
    pub value: Option<String>,
}

impl CvTerm {
    /// Create a new CV term with label, accession and name
    pub fn new(label: &str, accession: &str, name: &str) -> Self {
        Self {
            label: label.to_string(),
            accession: accession.to_string(),
            name: name.to_string(),
            value: None,
        }
    }

    /// A user parameter: no label or accession, only a name and value
    pub fn user(name: &str, value: impl ToString) -> Self {
        Self::new("", "", name).with_value(value)
    }

    /// Add a value to the CV term
    pub fn with_value(mut self, value: impl ToString) -> Self {
        self.value = Some(value.to_string());
        self
    }
}

impl fmt::Display for CvTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.label,
            self.accession,
            self.name,
            self.value.as_deref().unwrap_or("")
        )
    }
}

impl From<CvTerm> for String {
    fn from(term: CvTerm) -> Self {
        term.to_string()
    }
}

/// Terms the MTD builders use by default
pub mod ms_terms {
    use super::CvTerm;

    // =========================================================================
    // Polarity terms
    // =========================================================================

    /// MS:1000130 - positive scan
    pub fn positive_scan() -> CvTerm {
        CvTerm::new("MS", "MS:1000130", "positive scan")
    }

    /// MS:1000129 - negative scan
    pub fn negative_scan() -> CvTerm {
        CvTerm::new("MS", "MS:1000129", "negative scan")
    }

    // =========================================================================
    // File format terms
    // =========================================================================

    /// MS:1000584 - mzML format
    pub fn mzml_format() -> CvTerm {
        CvTerm::new("MS", "MS:1000584", "mzML format")
    }

    /// MS:1000768 - Thermo nativeID format
    pub fn thermo_native_id_format() -> CvTerm {
        CvTerm::new("MS", "MS:1000768", "Thermo nativeID format")
    }

    /// MS:1000569 - SHA-1
    pub fn sha1() -> CvTerm {
        CvTerm::new("MS", "MS:1000569", "SHA-1")
    }

    /// MS:1000568 - MD5
    pub fn md5() -> CvTerm {
        CvTerm::new("MS", "MS:1000568", "MD5")
    }

    // =========================================================================
    // Quantification and identification terms
    // =========================================================================

    /// MS:1001834 - LC-MS label-free quantitation analysis
    pub fn label_free_quantitation() -> CvTerm {
        CvTerm::new("MS", "MS:1001834", "LC-MS label-free quantitation analysis")
    }

    /// PRIDE:0000330 - Arbitrary quantification unit
    pub fn arbitrary_quantification_unit() -> CvTerm {
        CvTerm::new("PRIDE", "PRIDE:0000330", "Arbitrary quantification unit")
    }

    /// MS:1002896 - compound identification confidence level
    pub fn compound_identification_confidence_level() -> CvTerm {
        CvTerm::new("MS", "MS:1002896", "compound identification confidence level")
    }

    /// MS:1002890 - fragmentation score
    pub fn fragmentation_score() -> CvTerm {
        CvTerm::new("MS", "MS:1002890", "fragmentation score")
    }
}

/// One `cv[i]` entry of the MTD section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvDefinition {
    /// Short label used in parameters, e.g. "MS"
    pub label: String,
    /// Full name of the vocabulary
    pub full_name: String,
    /// Version of the vocabulary that was used
    pub version: String,
    /// Where the vocabulary can be retrieved
    pub uri: String,
}

impl CvDefinition {
    /// Create a new vocabulary definition
    pub fn new(label: &str, full_name: &str, version: &str, uri: &str) -> Self {
        Self {
            label: label.to_string(),
            full_name: full_name.to_string(),
            version: version.to_string(),
            uri: uri.to_string(),
        }
    }

    /// The PSI-MS vocabulary
    pub fn psi_ms() -> Self {
        Self::new(
            "MS",
            "PSI-MS controlled vocabulary",
            "4.1.138",
            "https://raw.githubusercontent.com/HUPO-PSI/psi-ms-CV/master/psi-ms.obo",
        )
    }

    /// The PRIDE vocabulary, needed for the default quantification unit
    pub fn pride() -> Self {
        Self::new(
            "PRIDE",
            "PRIDE PRoteomics IDEntifications (PRIDE) database controlled vocabulary",
            "16:10:2023 11:38",
            "https://www.ebi.ac.uk/ols/ontologies/pride",
        )
    }

    /// Render `cv[i]-label`, `cv[i]-full_name`, `cv[i]-version`, `cv[i]-uri`
    pub fn block(definitions: &[CvDefinition]) -> Result<Section, MtdError> {
        FieldBlock::new("cv")
            .field("label", definitions.iter().map(|d| d.label.as_str()))
            .field("full_name", definitions.iter().map(|d| d.full_name.as_str()))
            .field("version", definitions.iter().map(|d| d.version.as_str()))
            .field("uri", definitions.iter().map(|d| d.uri.as_str()))
            .build()
    }
}
