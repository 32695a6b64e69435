/// Canonicalize text for comparison.
///
/// Lower-cases, turns every character outside `[a-z0-9]` into a boundary,
/// and joins the remaining runs with single spaces. Idempotent.
#[must_use]
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
