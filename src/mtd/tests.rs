use super::*;

fn pairs(section: &Section) -> Vec<(&str, &str)> {
    section
        .iter()
        .map(|r| (r.key.as_str(), r.value.as_str()))
        .collect()
}

#[test]
fn test_field_block_order() {
    let block = FieldBlock::new("instrument")
        .field("name", ["Q Exactive", "Orbitrap Exploris 480"])
        .field("source", ["ESI", "ESI"])
        .build()
        .unwrap();
    let keys: Vec<_> = block.keys().collect();
    assert_eq!(
        keys,
        [
            "instrument[1]-name",
            "instrument[1]-source",
            "instrument[2]-name",
            "instrument[2]-source",
        ]
    );
}

#[test]
fn test_field_block_primary_first() {
    let block = FieldBlock::new("database")
        .field("prefix", ["HMDB"])
        .primary(["[MIRIAM, MIR:00000051, HMDB, ]"])
        .build()
        .unwrap();
    assert_eq!(
        pairs(&block),
        [
            ("database[1]", "[MIRIAM, MIR:00000051, HMDB, ]"),
            ("database[1]-prefix", "HMDB"),
        ]
    );
}

#[test]
fn test_field_block_recycles_length_one() {
    let block = FieldBlock::new("contact")
        .field("name", ["A", "B", "C"])
        .field("affiliation", ["EMBL"])
        .build()
        .unwrap();
    assert_eq!(block.len(), 6);
    assert_eq!(block.get("contact[3]-affiliation"), Some("EMBL"));
}

#[test]
fn test_field_block_length_mismatch() {
    let err = FieldBlock::new("contact")
        .field("name", ["A", "B", "C"])
        .field("email", ["a@x", "b@x"])
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        MtdError::LengthMismatch {
            parameter: "contact-email".to_string(),
            expected: 3,
            found: 2,
        }
    );
    assert_eq!(err.kind(), ErrorKind::LengthMismatch);
}

#[test]
fn test_field_block_empty() {
    let block = FieldBlock::new("uri").primary(Vec::<String>::new()).build().unwrap();
    assert!(block.is_empty());
}

#[test]
fn test_multi_value_skips_empty_slots() {
    let slots = vec![vec!["a", "b"], vec![], vec!["c"]];
    let section = expand_multi_values("sample", "species", &slots);
    assert_eq!(
        pairs(&section),
        [
            ("sample[1]-species[1]", "a"),
            ("sample[1]-species[2]", "b"),
            ("sample[3]-species[1]", "c"),
        ]
    );
}

#[test]
fn test_custom_fields() {
    let columns = vec![vec!["x1", "x2"], vec!["y1", "y2"]];
    let section = attach_custom("assay", 2, &columns).unwrap();
    assert_eq!(
        pairs(&section),
        [
            ("assay[1]-custom[1]", "x1"),
            ("assay[1]-custom[2]", "y1"),
            ("assay[2]-custom[1]", "x2"),
            ("assay[2]-custom[2]", "y2"),
        ]
    );
}

#[test]
fn test_custom_fields_do_not_recycle() {
    let columns = vec![vec!["x1", "x2"]];
    let err = attach_custom("assay", 3, &columns).unwrap_err();
    assert_eq!(
        err,
        MtdError::LengthMismatch {
            parameter: "assay-custom[1]".to_string(),
            expected: 3,
            found: 2,
        }
    );
}

#[test]
fn test_no_custom_columns() {
    let columns: Vec<Vec<String>> = Vec::new();
    assert!(attach_custom("sample", 4, &columns).unwrap().is_empty());
}

#[test]
fn test_scalar_broadcast() {
    let value: FieldValue<String> = "shared".into();
    assert_eq!(
        value.resolve("description", 3).unwrap(),
        Some(vec!["shared".to_string(); 3])
    );

    let single: FieldValue<String> = vec!["only"].into();
    assert_eq!(single.resolve("description", 2).unwrap().map(|v| v.len()), Some(2));
}

#[test]
fn test_resolve_rejects_other_lengths() {
    let value: FieldValue<String> = vec!["a", "b"].into();
    assert_eq!(value.resolve("x", 3).unwrap_err().kind(), ErrorKind::LengthMismatch);
    assert_eq!(value.resolve_exact("x", 1).unwrap_err().kind(), ErrorKind::LengthMismatch);
}

#[test]
fn test_absent_and_empty() {
    let absent: MultiValue = FieldValue::Absent;
    let empty_slot: MultiValue = vec![Vec::<&str>::new()].into();
    assert!(absent.is_absent());
    assert_eq!(absent.resolve("species", 2).unwrap(), None);
    assert!(!empty_slot.is_absent());
    assert_eq!(
        empty_slot.resolve("species", 2).unwrap(),
        Some(vec![Vec::<String>::new(), Vec::new()])
    );
}

#[test]
fn test_assemblers_are_deterministic() {
    let mut samples = SampleSection::new(["a", "b"]);
    samples.species = vec![vec!["Homo sapiens"], vec![]].into();
    samples.cell_type = FieldValue::Scalar(vec!["hepatocyte".to_string()]);
    assert_eq!(samples.build().unwrap(), samples.build().unwrap());
}

#[test]
fn test_assembled_document_order() {
    let header = MtdHeader::new("STUDY-1", "[MS, MS:1002879, Progenesis QI, 3.0]");
    let samples = SampleSection::new(["liver"]);
    let mut runs = MsRunSection::new(["file:///run1.mzML", "file:///run2.mzML"]);
    runs.scan_polarity = "negative".into();
    let mut assays = AssaySection::new(["a1", "a2"], vec!["ms_run[1]", "ms_run[2]"]);
    assays.sample_ref = vec!["sample[1]", "sample[1]"].into();
    let design = crate::design::DesignTable::with_assays(2);
    let variables = StudyVariableSection::default();

    let mtd = assemble([
        variables.build(&design).unwrap(),
        assays.build().unwrap(),
        samples.build().unwrap(),
        runs.build().unwrap(),
        header.build().unwrap(),
    ]);

    let families: Vec<_> = mtd
        .keys()
        .map(|k| k.split(|c: char| c == '[' || c == '-').next().unwrap_or(k))
        .fold(Vec::<&str>::new(), |mut acc, family| {
            if acc.last() != Some(&family) {
                acc.push(family);
            }
            acc
        });
    assert_eq!(
        families,
        [
            "mzTab",
            "software",
            "quantification_method",
            "sample",
            "ms_run",
            "assay",
            "study_variable",
            "small_molecule",
            "small_molecule_feature",
            "small_molecule",
            "id_confidence_measure",
        ]
    );
    assert_eq!(mtd.get("assay[2]-sample_ref"), Some("sample[1]"));
}

#[test]
fn test_section_json_roundtrip() {
    let section = SampleSection::new(["a"]).build().unwrap();
    let json = section.to_json().unwrap();
    assert_eq!(json, r#"[{"key":"sample[1]","value":"a"}]"#);
    assert_eq!(Section::from_json(&json).unwrap(), section);
}
