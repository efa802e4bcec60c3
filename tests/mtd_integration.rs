//! End-to-end tests for MTD section assembly
//!
//! This test suite validates:
//! - Full study files assembled into a sorted section
//! - Assay run mapping shapes
//! - Study variable discovery from TSV design tables
//! - Canonical ordering of mixed rows

use std::str::FromStr;

use mztabm::config::StudyConfig;
use mztabm::design::DesignTable;
use mztabm::mtd::{
    assemble, sort_section, AssaySection, ErrorKind, FieldBlock, FieldValue, MsRunSection,
    MtdHeader, SampleSection, Section, StudyVariableSection,
};
use mztabm::smf::SmfTable;

// ============================================================================
// Helper Functions
// ============================================================================

fn keys(section: &Section) -> Vec<&str> {
    section.keys().collect()
}

/// Check a key against `name([n])?(-name([n])?)*` with 1-based, unpadded indices
fn is_well_formed_key(key: &str) -> bool {
    key.split('-').all(|part| {
        let (name, index) = match part.split_once('[') {
            Some((name, rest)) => match rest.strip_suffix(']') {
                Some(index) => (name, Some(index)),
                None => return false,
            },
            None => (part, None),
        };
        let name_ok = !name.is_empty()
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        let index_ok = index.map_or(true, |i| {
            !i.is_empty() && !i.starts_with('0') && i.chars().all(|c| c.is_ascii_digit())
        });
        name_ok && index_ok
    })
}

fn liver_study() -> Result<Section, mztabm::mtd::MtdError> {
    let mut header = MtdHeader::new("LIVER-TIMECOURSE", "[MS, MS:1002879, Progenesis QI, 3.0]");
    header.title = Some("Liver timecourse".to_string());

    let mut samples = SampleSection::new(["liver_a", "liver_b"]);
    samples.species = vec![vec!["[NEWT, 9606, Homo sapiens (Human), ]"]].into();
    samples.disease = vec![vec!["[DOID, DOID:409, liver disease, ]"], vec![]].into();
    samples.custom = vec![vec!["donor 1".to_string(), "donor 2".to_string()]];

    let mut runs = MsRunSection::new((1..=12).map(|i| format!("file:///data/run{}.mzML", i)));
    runs.scan_polarity = "positive".into();
    runs.instrument_ref = FieldValue::Scalar(1);
    runs.hash = FieldValue::Sequence((1..=12).map(|i| format!("{:040}", i)).collect());
    runs.hash_method = "[MS, MS:1000569, SHA-1, ]".into();

    let assays = AssaySection::new(
        (1..=12).map(|i| format!("assay_{}", i)),
        (1..=12).map(|i| format!("ms_run[{}]", i)).collect::<Vec<_>>(),
    );

    let design = DesignTable::from_columns(vec![(
        "timepoint",
        vec!["0h", "6h", "0h", "6h", "0h", "6h", "0h", "6h", "0h", "6h", "0h", "6h"],
    )])
    .unwrap();
    let variables = StudyVariableSection::new(["timepoint"]);

    let instruments = FieldBlock::new("instrument")
        .field("name", ["[MS, MS:1001911, Q Exactive, ]"])
        .field("source", ["[MS, MS:1000073, electrospray ionization, ]"])
        .build()?;

    Ok(assemble([
        variables.build(&design)?,
        assays.build()?,
        runs.build()?,
        samples.build()?,
        instruments,
        header.build()?,
    ]))
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_full_study_is_sorted_and_well_formed() {
    let mtd = liver_study().unwrap();

    for key in mtd.keys() {
        assert!(is_well_formed_key(key), "malformed key: {}", key);
    }

    // Running the sort again changes nothing
    assert_eq!(sort_section(mtd.clone()), mtd);

    let first = |prefix: &str| mtd.keys().position(|k| k.starts_with(prefix)).unwrap();
    assert_eq!(first("mzTab-version"), 0);
    assert!(first("instrument") < first("software"));
    assert!(first("sample") < first("ms_run"));
    assert!(first("ms_run") < first("assay"));
    assert!(first("assay") < first("study_variable"));
}

#[test]
fn test_twelve_runs_keep_numeric_order() {
    let mtd = liver_study().unwrap();
    let locations: Vec<_> = mtd
        .keys()
        .filter(|k| k.ends_with("-location"))
        .collect();
    let expected: Vec<_> = (1..=12).map(|i| format!("ms_run[{}]-location", i)).collect();
    assert_eq!(locations, expected);

    // All rows of ms_run[2] come before any row of ms_run[10]
    let last_of_2 = mtd
        .rows()
        .iter()
        .rposition(|r| r.key.starts_with("ms_run[2]-"))
        .unwrap();
    let first_of_10 = mtd.keys().position(|k| k.starts_with("ms_run[10]-")).unwrap();
    assert!(last_of_2 < first_of_10);
}

#[test]
fn test_sample_rows() {
    let mtd = liver_study().unwrap();
    let sample_keys: Vec<_> = mtd.keys().filter(|k| k.starts_with("sample[")).collect();
    assert_eq!(
        sample_keys,
        [
            "sample[1]",
            "sample[1]-species[1]",
            "sample[1]-disease[1]",
            "sample[1]-custom[1]",
            "sample[2]",
            "sample[2]-species[1]",
            "sample[2]-custom[1]",
        ]
    );
}

#[test]
fn test_study_variables_from_design() {
    let mtd = liver_study().unwrap();
    assert_eq!(mtd.get("study_variable[1]"), Some("timepoint:0h"));
    assert_eq!(
        mtd.get("study_variable[1]-assay_refs"),
        Some("assay[1]|assay[3]|assay[5]|assay[7]|assay[9]|assay[11]")
    );
    assert_eq!(mtd.get("study_variable[2]-description"), Some("Column: timepoint, value: 6h"));
    assert_eq!(mtd.get("study_variable[3]"), None);
}

#[test]
fn test_assembly_is_deterministic() {
    assert_eq!(liver_study().unwrap(), liver_study().unwrap());
}

// ============================================================================
// Assay Mapping Tests
// ============================================================================

#[test]
fn test_flat_ms_run_refs() {
    let assays = AssaySection::new(["a", "b", "c"], vec!["r1", "r1", "r2"]);
    let section = assays.build().unwrap();
    let refs: Vec<_> = section
        .iter()
        .filter(|r| r.key.ends_with("ms_run_ref"))
        .map(|r| (r.key.as_str(), r.value.as_str()))
        .collect();
    assert_eq!(
        refs,
        [
            ("assay[1]-ms_run_ref", "r1"),
            ("assay[2]-ms_run_ref", "r1"),
            ("assay[3]-ms_run_ref", "r2"),
        ]
    );
}

#[test]
fn test_fractionated_ms_run_refs() {
    let assays = AssaySection::new(["a", "b"], vec![vec!["r1", "r2"], vec!["r3"]]);
    let section = assays.build().unwrap();
    assert_eq!(
        keys(&section),
        [
            "assay[1]",
            "assay[1]-ms_run_ref[1]",
            "assay[1]-ms_run_ref[2]",
            "assay[2]",
            "assay[2]-ms_run_ref[1]",
        ]
    );
    assert_eq!(section.get("assay[2]-ms_run_ref[1]"), Some("r3"));
}

#[test]
fn test_empty_fraction_is_missing_reference() {
    let assays = AssaySection::new(["a", "b"], vec![vec!["r1"], vec![]]);
    let err = assays.build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingReference);
}

// ============================================================================
// Design Table Tests
// ============================================================================

#[test]
fn test_tsv_design_drives_study_variables() {
    let tsv = "assay\ttreatment\ttimepoint\n\
               a1\tdrug\t0h\n\
               a2\tcontrol\t0h\n\
               a3\tdrug\t6h\n";
    let design = DesignTable::from_reader(tsv.as_bytes()).unwrap();
    let section = StudyVariableSection::new(["treatment", "timepoint"])
        .build(&design)
        .unwrap();

    let names: Vec<_> = section
        .iter()
        .filter(|r| !r.key.contains('-'))
        .map(|r| r.value.as_str())
        .collect();
    assert_eq!(names, ["treatment:drug", "treatment:control", "timepoint:0h", "timepoint:6h"]);
    assert_eq!(section.get("study_variable[3]-assay_refs"), Some("assay[1]|assay[2]"));
}

#[test]
fn test_undefined_study_variable() {
    let design = DesignTable::with_assays(3);
    let section = StudyVariableSection::default().build(&design).unwrap();
    assert_eq!(section.get("study_variable[1]"), Some("undefined"));
    assert_eq!(section.get("study_variable[1]-assay_refs"), Some("assay[1]|assay[2]|assay[3]"));
    assert_eq!(section.get("study_variable[2]"), None);
}

#[test]
fn test_study_variable_parameter_lengths() {
    let design = DesignTable::from_columns(vec![("timepoint", vec!["0h", "6h", "0h"])]).unwrap();
    let mut variables = StudyVariableSection::new(["timepoint"]);
    variables.average_function = vec!["a", "b", "c"].into();
    match variables.build(&design).unwrap_err() {
        mztabm::mtd::MtdError::LengthMismatch { parameter, expected, found } => {
            assert_eq!(parameter, "average_function");
            assert_eq!(expected, 2);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error: {}", other),
    }
}

// ============================================================================
// Section Sort Tests
// ============================================================================

#[test]
fn test_sort_places_unlisted_last() {
    let section: Section = vec![
        ("custom[1]", "x"),
        ("sample[1]", "a"),
        ("cv[1]-label", "MS"),
        ("sample[2]", "b"),
    ]
    .into_iter()
    .collect();
    let sorted = sort_section(section);
    assert_eq!(keys(&sorted), ["sample[1]", "sample[2]", "cv[1]-label", "custom[1]"]);
}

#[test]
fn test_sort_keeps_colunit_rows_together() {
    let section: Section = vec![
        ("colunit-small_molecule", "retention_time=[UO, UO:0000010, second, ]"),
        ("mzTab-ID", "X"),
        ("colunit-small_molecule_feature", "retention_time=[UO, UO:0000010, second, ]"),
    ]
    .into_iter()
    .collect();
    assert_eq!(
        keys(&sort_section(section)),
        ["mzTab-ID", "colunit-small_molecule", "colunit-small_molecule_feature"]
    );
}

// ============================================================================
// Study File Tests
// ============================================================================

#[test]
fn test_study_file_matches_programmatic_assembly() {
    let toml = r#"
        [metadata]
        id = "LIVER-TIMECOURSE"
        software = ["[MS, MS:1002879, Progenesis QI, 3.0]"]

        [ms_run]
        location = ["file:///data/run1.mzML", "file:///data/run2.mzML"]
        scan_polarity = ["positive", "negative"]

        [assay]
        assay = ["a1", "a2"]
        ms_run_ref = ["ms_run[1]", "ms_run[2]"]
    "#;
    let from_file = StudyConfig::from_str(toml).unwrap().build_section(None).unwrap();

    let mut runs = MsRunSection::new(["file:///data/run1.mzML", "file:///data/run2.mzML"]);
    runs.scan_polarity = vec!["positive", "negative"].into();
    let by_hand = assemble([
        MtdHeader::new("LIVER-TIMECOURSE", "[MS, MS:1002879, Progenesis QI, 3.0]").build().unwrap(),
        mztabm::controlled_vocabulary::CvDefinition::block(&[
            mztabm::controlled_vocabulary::CvDefinition::psi_ms(),
            mztabm::controlled_vocabulary::CvDefinition::pride(),
        ])
        .unwrap(),
        runs.build().unwrap(),
        AssaySection::new(["a1", "a2"], vec!["ms_run[1]", "ms_run[2]"]).build().unwrap(),
        StudyVariableSection::default()
            .build(&DesignTable::with_assays(2))
            .unwrap(),
    ]);

    assert_eq!(from_file, by_hand);
    assert_eq!(
        from_file.get("ms_run[2]-scan_polarity[1]"),
        Some("[MS, MS:1000129, negative scan, ]")
    );
}

#[test]
fn test_invalid_polarity_in_study_file() {
    let toml = r#"
        [metadata]
        id = "X"
        software = ["sw"]

        [ms_run]
        location = ["file:///run.mzML"]
        scan_polarity = "neutral"

        [assay]
        assay = ["a1"]
        ms_run_ref = ["ms_run[1]"]
    "#;
    let err = StudyConfig::from_str(toml).unwrap().build_section(None).unwrap_err();
    match err {
        mztabm::config::ConfigError::Mtd(err) => assert_eq!(err.kind(), ErrorKind::InvalidEnumValue),
        other => panic!("unexpected error: {}", other),
    }
}

// ============================================================================
// SMF Table Tests
// ============================================================================

#[test]
fn test_smf_abundance_columns_follow_assays() {
    let assays = AssaySection::new(["a1", "a2", "a3"], vec!["ms_run[1]", "ms_run[1]", "ms_run[1]"]);
    let count = assays.assay.len();
    let table = SmfTable::from_abundances(
        count,
        &[180.0634, 256.2402],
        &[1, 1],
        &[vec![Some(1.0), None, Some(3.0)], vec![]],
    )
    .unwrap()
    .build()
    .unwrap();

    assert_eq!(table.header.len(), 1 + 10 + count);
    assert_eq!(table.rows[1][1], "2");
    assert!(table.rows[1][11..].iter().all(|cell| cell == "null"));
}
