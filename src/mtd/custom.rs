use super::row::{merge_ranked, RankedRow};
use super::{MtdError, Section};

/// Attach side-channel columns as `prefix[i]-custom[k]` rows.
///
/// `k` is the 1-based position of the column among `columns` and `i` the
/// 1-based position within it. Every column must hold exactly
/// `expected_length` values; nothing is recycled. No columns at all is an
/// empty section, not an error.
pub fn attach_custom<S: AsRef<str>>(
    prefix: &str,
    expected_length: usize,
    columns: &[Vec<S>],
) -> Result<Section, MtdError> {
    Ok(merge_ranked(custom_ranked(prefix, expected_length, columns)?))
}

pub(crate) fn custom_ranked<S: AsRef<str>>(
    prefix: &str,
    expected_length: usize,
    columns: &[Vec<S>],
) -> Result<Vec<RankedRow>, MtdError> {
    for (k, column) in columns.iter().enumerate() {
        if column.len() != expected_length {
            return Err(MtdError::length_mismatch(
                format!("{}-custom[{}]", prefix, k + 1),
                expected_length,
                column.len(),
            ));
        }
    }

    let mut rows = Vec::with_capacity(columns.len() * expected_length);
    for (k, column) in columns.iter().enumerate() {
        for (i, value) in column.iter().enumerate() {
            rows.push(RankedRow::new(
                i + 1,
                format!("{}[{}]-custom[{}]", prefix, i + 1, k + 1),
                value.as_ref(),
            ));
        }
    }
    Ok(rows)
}
