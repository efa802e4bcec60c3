//! # MTD Section Builders
//!
//! This module turns caller-supplied vectors into the keyed rows of an
//! mzTab-M metadata (MTD) section, following the mzTab-M naming scheme:
//! `entity[i]`, `entity[i]-attribute`, `entity[i]-attribute[j]`.
//!
//! ## Building blocks
//!
//! 1. **Indexed fields** ([`FieldBlock`]): aligned vectors become
//!    `prefix[i]` / `prefix[i]-name` rows.
//! 2. **Multi-value fields** ([`expand_multi_values`]): per-entity lists become
//!    `prefix[i]-suffix[j]` rows; empty lists produce nothing.
//! 3. **Custom fields** ([`attach_custom`]): side-channel columns become
//!    `prefix[i]-custom[k]` rows, with strict length checks.
//!
//! ## Assemblers
//!
//! [`MtdHeader`], [`SampleSection`], [`MsRunSection`], [`AssaySection`] and
//! [`StudyVariableSection`] compose the building blocks under entity specific
//! rules. Each returns its rows grouped by entity index; [`assemble`]
//! concatenates any number of sections and applies [`sort_section`] once.
//!
//! All indices are derived from input positions, so every builder is a pure
//! function of its inputs and may be called concurrently.
//!
//! ```
//! use mztabm::mtd::{assemble, AssaySection, MsRunSection, MtdHeader};
//!
//! let header = MtdHeader::new("STUDY-1", "[MS, MS:1002879, Progenesis QI, 3.0]");
//! let mut runs = MsRunSection::new(["file:///data/run1.mzML"]);
//! runs.scan_polarity = "positive".into();
//! let assays = AssaySection::new(["liver_1"], vec!["ms_run[1]"]);
//!
//! let mtd = assemble([assays.build()?, runs.build()?, header.build()?]);
//! assert_eq!(mtd.rows()[0].key, "mzTab-version");
//! assert_eq!(mtd.get("assay[1]-ms_run_ref"), Some("ms_run[1]"));
//! # Ok::<(), mztabm::mtd::MtdError>(())
//! ```

mod assay;
mod custom;
mod document;
mod error;
mod fields;
mod header;
mod ms_run;
mod multi;
mod row;
mod sample;
mod sort;
mod study_variable;
mod value;

#[cfg(test)]
mod tests;

pub use assay::{AssaySection, MsRunRefs};
pub use custom::attach_custom;
pub use document::assemble;
pub use error::{ErrorKind, MtdError};
pub use fields::FieldBlock;
pub use header::{MtdHeader, MZTAB_M_VERSION};
pub use ms_run::{MsRunSection, ScanPolarity};
pub use multi::expand_multi_values;
pub use row::{KeyedRow, Section};
pub use sample::SampleSection;
pub use sort::{section_rank, sort_section, SECTION_ORDER};
pub use study_variable::{
    discover_study_variables, StudyVariable, StudyVariableSection, UNDEFINED_STUDY_VARIABLE,
};
pub use value::{FieldValue, MultiValue};
