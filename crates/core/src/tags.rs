//! Tag name handling.

/// Trim tag names, drop empty ones, and remove duplicates.
///
/// The first spelling of a name wins and input order is kept. Matching is
/// exact (case-sensitive), mirroring the `uq_tags_name` constraint.
pub fn normalize_tag_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let trimmed = name.as_ref().trim();
        if !trimmed.is_empty() && !out.iter().any(|existing| existing == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}
