//! # Small Molecule Feature (SMF) Table
//!
//! Assembles the SMF table of an mzTab-M document: one row per detected
//! feature with its m/z, charge, retention time window and one abundance
//! column per assay. Anything missing is written as the literal `null`.

use serde::{Deserialize, Serialize};

use crate::mtd::MtdError;

/// Explicit missing value marker
pub const NULL_VALUE: &str = "null";

/// Fixed SMF columns, in document order, before the abundance columns
pub const SMF_COLUMNS: &[&str] = &[
    "SMF_ID",
    "SME_ID_REFS",
    "SME_ID_REF_ambiguity_code",
    "adduct_ion",
    "isotopomer",
    "exp_mass_to_charge",
    "charge",
    "retention_time_in_seconds",
    "retention_time_in_seconds_start",
    "retention_time_in_seconds_end",
];

/// One small molecule feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmfFeature {
    /// SME_ID values of the evidence supporting this feature
    pub sme_id_refs: Vec<String>,
    /// Ambiguity code when several evidences are referenced
    pub sme_id_ref_ambiguity_code: Option<u8>,
    /// Adduct, e.g. `[M+H]1+`
    pub adduct_ion: Option<String>,
    /// Isotopomer term
    pub isotopomer: Option<String>,
    /// Experimental m/z (mandatory)
    pub exp_mass_to_charge: Option<f64>,
    /// Charge state (mandatory)
    pub charge: Option<i32>,
    /// Apex retention time in seconds
    pub retention_time_in_seconds: Option<f64>,
    /// Start of the retention time window
    pub retention_time_in_seconds_start: Option<f64>,
    /// End of the retention time window
    pub retention_time_in_seconds_end: Option<f64>,
    /// One abundance per assay; empty when no abundance was measured at all
    pub abundance_assay: Vec<Option<f64>>,
}

impl SmfFeature {
    /// A feature with its mandatory fields
    pub fn new(exp_mass_to_charge: f64, charge: i32) -> Self {
        Self {
            exp_mass_to_charge: Some(exp_mass_to_charge),
            charge: Some(charge),
            ..Default::default()
        }
    }
}

/// A rendered table: the header line and the data lines, prefix cell included
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// `SFH` followed by column names
    pub header: Vec<String>,
    /// `SMF` followed by one cell per column
    pub rows: Vec<Vec<String>>,
}

/// Builder for the SMF table of a study with a fixed number of assays
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmfTable {
    assays: usize,
    features: Vec<SmfFeature>,
    optional_columns: Vec<(String, Vec<String>)>,
}

impl SmfTable {
    /// An empty table for `assays` abundance columns
    pub fn new(assays: usize) -> Self {
        Self {
            assays,
            ..Default::default()
        }
    }

    /// Build features from parallel m/z and charge vectors and an abundance
    /// matrix with one row per feature and one column per assay
    pub fn from_abundances(
        assays: usize,
        exp_mass_to_charge: &[f64],
        charge: &[i32],
        abundances: &[Vec<Option<f64>>],
    ) -> Result<Self, MtdError> {
        let count = exp_mass_to_charge.len();
        if charge.len() != count {
            return Err(MtdError::length_mismatch("charge", count, charge.len()));
        }
        if abundances.len() != count {
            return Err(MtdError::length_mismatch("abundance_assay", count, abundances.len()));
        }

        let mut table = Self::new(assays);
        for ((mz, z), abundance) in exp_mass_to_charge.iter().zip(charge).zip(abundances) {
            let mut feature = SmfFeature::new(*mz, *z);
            feature.abundance_assay = abundance.clone();
            table.push_feature(feature);
        }
        Ok(table)
    }

    /// Append a feature; its SMF_ID is its 1-based position
    pub fn push_feature(&mut self, feature: SmfFeature) {
        self.features.push(feature);
    }

    /// Append an `opt_` column with one value per feature
    pub fn optional_column<I>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.optional_columns
            .push((name.into(), values.into_iter().map(Into::into).collect()));
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the table has no features
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Column names, without the `SFH` prefix cell
    pub fn columns(&self) -> Vec<String> {
        SMF_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain((1..=self.assays).map(|i| format!("abundance_assay[{}]", i)))
            .chain(self.optional_columns.iter().map(|(name, _)| name.clone()))
            .collect()
    }

    /// Render header and rows, filling missing values with `null`
    pub fn build(&self) -> Result<Table, MtdError> {
        for (name, values) in &self.optional_columns {
            if values.len() != self.features.len() {
                return Err(MtdError::length_mismatch(name.as_str(), self.features.len(), values.len()));
            }
        }

        let mut header = vec!["SFH".to_string()];
        header.extend(self.columns());

        let mut rows = Vec::with_capacity(self.features.len());
        for (i, feature) in self.features.iter().enumerate() {
            let id = i + 1;
            let mz = feature
                .exp_mass_to_charge
                .ok_or_else(|| MtdError::MissingRequired(format!("exp_mass_to_charge of SMF {}", id)))?;
            let charge = feature
                .charge
                .ok_or_else(|| MtdError::MissingRequired(format!("charge of SMF {}", id)))?;

            let abundance = &feature.abundance_assay;
            if !abundance.is_empty() && abundance.len() != self.assays {
                return Err(MtdError::length_mismatch(
                    format!("abundance_assay of SMF {}", id),
                    self.assays,
                    abundance.len(),
                ));
            }

            let mut row = Vec::with_capacity(header.len());
            row.push("SMF".to_string());
            row.push(id.to_string());
            row.push(if feature.sme_id_refs.is_empty() {
                NULL_VALUE.to_string()
            } else {
                feature.sme_id_refs.join("|")
            });
            row.push(or_null(feature.sme_id_ref_ambiguity_code));
            row.push(or_null(feature.adduct_ion.as_deref()));
            row.push(or_null(feature.isotopomer.as_deref()));
            row.push(mz.to_string());
            row.push(charge.to_string());
            row.push(or_null(feature.retention_time_in_seconds));
            row.push(or_null(feature.retention_time_in_seconds_start));
            row.push(or_null(feature.retention_time_in_seconds_end));
            for assay in 0..self.assays {
                row.push(or_null(abundance.get(assay).copied().flatten()));
            }
            for (_, values) in &self.optional_columns {
                row.push(values[i].clone());
            }
            rows.push(row);
        }

        log::debug!(
            "assembled SMF table with {} features and {} assays",
            rows.len(),
            self.assays
        );
        Ok(Table { header, rows })
    }
}

fn or_null<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NULL_VALUE.to_string(), |v| v.to_string())
}
