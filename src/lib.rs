//! # mztabm - mzTab-M Metadata Assembly
//!
//! `mztabm` builds the metadata (MTD) section of mzTab-M 2.0 documents, the
//! HUPO-PSI exchange format for small-molecule mass spectrometry results.
//!
//! An MTD section is a flat list of key/value rows whose keys follow a strict
//! indexing scheme (`sample[1]-species[2]`, `ms_run[3]-hash`, ...). This crate
//! derives those keys from the positions of caller-supplied vectors, validates
//! their lengths, broadcasts single values across entities and orders the
//! result in the canonical section order.
//!
//! ## Key Features
//!
//! - **Indexed field blocks**: aligned vectors become `prefix[i]-name` rows,
//!   grouped per entity.
//!
//! - **Entity assemblers**: samples, MS runs, assays and study variables, each
//!   with its own mandatory parameters and co-requirement rules.
//!
//! - **Study variables from a design table**: distinct values of designated
//!   design columns become `study_variable[i]` rows with their assay refs.
//!
//! - **Canonical ordering**: a stable sort that moves row families into the
//!   order mzTab-M validators expect, leaving rows within a family untouched.
//!
//! - **Study files**: a TOML document describing a whole section, and a small
//!   SMF (feature) table builder sharing the same conventions.
//!
//! ## Quick Start
//!
//! ```rust
//! use mztabm::design::DesignTable;
//! use mztabm::mtd::{assemble, AssaySection, MsRunSection, MtdHeader, StudyVariableSection};
//!
//! let header = MtdHeader::new("LIVER-1", "[MS, MS:1002879, Progenesis QI, 3.0]");
//!
//! let mut runs = MsRunSection::new(["file:///data/a.mzML", "file:///data/b.mzML"]);
//! runs.scan_polarity = "positive".into();
//!
//! let assays = AssaySection::new(["liver_0h", "liver_6h"], vec!["ms_run[1]", "ms_run[2]"]);
//!
//! let design = DesignTable::from_columns(vec![("timepoint", vec!["0h", "6h"])])?;
//! let variables = StudyVariableSection::new(["timepoint"]);
//!
//! let mtd = assemble([
//!     header.build()?,
//!     runs.build()?,
//!     assays.build()?,
//!     variables.build(&design)?,
//! ]);
//!
//! for row in &mtd {
//!     println!("MTD\t{}\t{}", row.key, row.value);
//! }
//! assert_eq!(mtd.get("study_variable[2]-assay_refs"), Some("assay[2]"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`mtd`]: building blocks, entity assemblers and section sort
//! - [`design`]: study design tables
//! - [`controlled_vocabulary`]: CV terms and `cv[i]` definitions
//! - [`config`]: TOML study files
//! - [`smf`]: small molecule feature table

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controlled_vocabulary;
pub mod design;
pub mod mtd;
pub mod smf;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigError, StudyConfig};
    pub use crate::controlled_vocabulary::{ms_terms, CvDefinition, CvTerm};
    pub use crate::design::{DesignError, DesignTable};
    pub use crate::mtd::{
        assemble, attach_custom, expand_multi_values, sort_section, AssaySection, ErrorKind,
        FieldBlock, FieldValue, KeyedRow, MsRunRefs, MsRunSection, MtdError, MtdHeader,
        MultiValue, SampleSection, ScanPolarity, Section, StudyVariableSection,
    };
    pub use crate::smf::{SmfFeature, SmfTable, Table};
}
