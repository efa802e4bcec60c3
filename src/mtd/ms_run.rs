use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::controlled_vocabulary::{ms_terms, CvTerm};

use super::multi::expand_ranked;
use super::row::{merge_ranked, RankedRow};
use super::value::{FieldValue, MultiValue};
use super::{FieldBlock, MtdError, Section};

/// Scan polarity of an MS run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanPolarity {
    /// MS:1000130
    Positive,
    /// MS:1000129
    Negative,
}

impl ScanPolarity {
    /// The CV term written for this polarity
    pub fn term(&self) -> CvTerm {
        match self {
            ScanPolarity::Positive => ms_terms::positive_scan(),
            ScanPolarity::Negative => ms_terms::negative_scan(),
        }
    }
}

impl FromStr for ScanPolarity {
    type Err = MtdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(ScanPolarity::Positive),
            "negative" => Ok(ScanPolarity::Negative),
            other => Err(MtdError::InvalidEnumValue {
                parameter: "scan_polarity".to_string(),
                value: other.to_string(),
                allowed: "positive, negative".to_string(),
            }),
        }
    }
}

impl fmt::Display for ScanPolarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanPolarity::Positive => f.write_str("positive"),
            ScanPolarity::Negative => f.write_str("negative"),
        }
    }
}

/// Input for the `ms_run[i]` rows of an MTD section.
///
/// Identity of a run is its position in `location`. Every optional attribute
/// may be given once for all runs, except `hash` which is per file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MsRunSection {
    /// File locations (mandatory)
    pub location: Vec<String>,
    /// 1-based index of the `instrument[k]` each run was acquired on
    pub instrument_ref: FieldValue<usize>,
    /// File format term, requires `id_format`
    pub format: FieldValue<String>,
    /// Native id format term, requires `format`
    pub id_format: FieldValue<String>,
    /// Fragmentation method terms per run
    pub fragmentation_method: MultiValue,
    /// "positive" or "negative" (mandatory)
    pub scan_polarity: FieldValue<String>,
    /// File checksum per run, requires `hash_method`
    pub hash: FieldValue<String>,
    /// Checksum method term, requires `hash`
    pub hash_method: FieldValue<String>,
}

impl MsRunSection {
    /// Describe runs stored at the given locations
    pub fn new<I>(location: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            location: location.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Assemble the ms_run rows, grouped by run index
    pub fn build(&self) -> Result<Section, MtdError> {
        let count = self.location.len();
        if count == 0 {
            return Err(MtdError::MissingRequired("location".to_string()));
        }

        check_pair(&self.format, "format", &self.id_format, "id_format")?;
        check_pair(&self.hash, "hash", &self.hash_method, "hash_method")?;

        let instrument_ref = match self.instrument_ref.resolve("instrument_ref", count)? {
            Some(refs) => Some(
                refs.into_iter()
                    .map(instrument_key)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        let format = self.format.resolve("format", count)?;
        let id_format = self.id_format.resolve("id_format", count)?;
        let fragmentation_method = self.fragmentation_method.resolve("fragmentation_method", count)?;

        let polarity = self
            .scan_polarity
            .resolve("scan_polarity", count)?
            .ok_or_else(|| MtdError::MissingRequired("scan_polarity".to_string()))?
            .iter()
            .map(|p| p.parse::<ScanPolarity>().map(|p| p.term().to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        let hash = self.hash.resolve_exact("hash", count)?;
        let hash_method = self.hash_method.resolve("hash_method", count)?;

        let mut rows: Vec<RankedRow> = FieldBlock::new("ms_run")
            .field("location", self.location.iter().map(String::as_str))
            .field_opt("instrument_ref", instrument_ref)
            .field_opt("format", format)
            .field_opt("id_format", id_format)
            .build_ranked()?;
        if let Some(slots) = &fragmentation_method {
            rows.extend(expand_ranked("ms_run", "fragmentation_method", slots));
        }
        rows.extend(
            FieldBlock::new("ms_run")
                .field("scan_polarity[1]", polarity)
                .field_opt("hash_method", hash_method)
                .field_opt("hash", hash)
                .build_ranked()?,
        );

        let section = merge_ranked(rows);
        log::debug!("assembled {} rows for {} ms_runs", section.len(), count);
        Ok(section)
    }
}

fn check_pair<T>(
    first: &FieldValue<T>,
    first_name: &str,
    second: &FieldValue<T>,
    second_name: &str,
) -> Result<(), MtdError> {
    match (first.is_absent(), second.is_absent()) {
        (false, true) => Err(MtdError::paired(first_name, second_name)),
        (true, false) => Err(MtdError::paired(second_name, first_name)),
        _ => Ok(()),
    }
}

fn instrument_key(index: usize) -> Result<String, MtdError> {
    if index == 0 {
        return Err(MtdError::InvalidEnumValue {
            parameter: "instrument_ref".to_string(),
            value: index.to_string(),
            allowed: "1-based instrument index".to_string(),
        });
    }
    Ok(format!("instrument[{}]", index))
}
