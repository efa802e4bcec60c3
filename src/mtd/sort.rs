use super::{KeyedRow, Section};

/// Canonical order of MTD field families.
///
/// A key belongs to the first entry it starts with, so `sample_processing`
/// must stay ahead of `sample`. Keys matching no entry sort after every
/// listed family.
///
/// `custom` is deliberately absent: top level `custom[i]` parameters sort
/// after `cv[i]` rows, as in the canonical example
/// `custom[1], sample[1], cv[1]-label, sample[2]` ->
/// `sample[1], sample[2], cv[1]-label, custom[1]`. Entity level custom rows
/// such as `sample[1]-custom[1]` stay with their entity.
pub const SECTION_ORDER: &[&str] = &[
    "mzTab-version",
    "mzTab-ID",
    "title",
    "description",
    "sample_processing",
    "instrument",
    "software",
    "publication",
    "contact",
    "uri",
    "external_study_uri",
    "quantification_method",
    "sample",
    "ms_run",
    "assay",
    "study_variable",
    "cv",
    "database",
    "derivatization_agent",
    "small_molecule-quantification_unit",
    "small_molecule_feature-quantification_unit",
    "small_molecule-identification_reliability",
    "id_confidence_measure",
    "colunit-",
];

/// Position of the family `key` belongs to, `None` when it matches none
pub fn section_rank(key: &str) -> Option<usize> {
    SECTION_ORDER.iter().position(|prefix| key.starts_with(prefix))
}

/// Reorder rows into canonical section order.
///
/// The sort is stable: rows of the same family, and unmatched rows, keep
/// their relative input order. That is what keeps each entity's attributes
/// together once several assemblers' outputs are concatenated.
///
/// ```
/// use mztabm::mtd::{sort_section, Section};
///
/// let rows: Section = [("custom[1]", "x"), ("sample[1]", "a"), ("cv[1]-label", "MS"), ("sample[2]", "b")]
///     .into_iter()
///     .collect();
/// let sorted = sort_section(rows);
///
/// let keys: Vec<_> = sorted.keys().collect();
/// assert_eq!(keys, ["sample[1]", "sample[2]", "cv[1]-label", "custom[1]"]);
/// ```
pub fn sort_section(section: Section) -> Section {
    let mut rows: Vec<(usize, KeyedRow)> = section
        .into_iter()
        .map(|row| (section_rank(&row.key).unwrap_or(usize::MAX), row))
        .collect();
    rows.sort_by_key(|(rank, _)| *rank);
    rows.into_iter().map(|(_, row)| row).collect()
}
