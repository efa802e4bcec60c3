use super::{sort_section, Section};

/// Concatenate sections and put the result in canonical order.
///
/// This is the only place where global MTD order is decided: each assembler
/// orders rows within its own family, and the stable [`sort_section`] only
/// moves whole families relative to each other.
pub fn assemble<I>(sections: I) -> Section
where
    I: IntoIterator<Item = Section>,
{
    let mut merged = Section::new();
    let mut parts = 0usize;
    for section in sections {
        merged.append(section);
        parts += 1;
    }
    log::debug!("assembling {} rows from {} sections", merged.len(), parts);
    sort_section(merged)
}
