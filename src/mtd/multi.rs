use super::row::{merge_ranked, RankedRow};
use super::Section;

/// Expand per-entity value lists into `prefix[i]-suffix[j]` rows.
///
/// `i` is the 1-based slot position and `j` the 1-based position of the value
/// within its slot. A slot with no values produces no rows: an entity with no
/// recorded species is not the same thing as an entity with a null species.
///
/// ```
/// use mztabm::mtd::expand_multi_values;
///
/// let slots = vec![vec!["a", "b"], vec![], vec!["c"]];
/// let rows = expand_multi_values("sample", "species", &slots);
///
/// let keys: Vec<_> = rows.keys().collect();
/// assert_eq!(keys, ["sample[1]-species[1]", "sample[1]-species[2]", "sample[3]-species[1]"]);
/// ```
pub fn expand_multi_values<S: AsRef<str>>(prefix: &str, suffix: &str, slots: &[Vec<S>]) -> Section {
    merge_ranked(expand_ranked(prefix, suffix, slots))
}

pub(crate) fn expand_ranked<S: AsRef<str>>(
    prefix: &str,
    suffix: &str,
    slots: &[Vec<S>],
) -> Vec<RankedRow> {
    slots
        .iter()
        .enumerate()
        .flat_map(|(i, slot)| {
            slot.iter().enumerate().map(move |(j, value)| {
                RankedRow::new(
                    i + 1,
                    format!("{}[{}]-{}[{}]", prefix, i + 1, suffix, j + 1),
                    value.as_ref(),
                )
            })
        })
        .collect()
}
