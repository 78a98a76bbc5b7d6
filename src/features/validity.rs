//! Geographic key validation

/// Returns true when a state name is a plausible geographic key.
///
/// Upstream cleaning occasionally leaves numeric codes or truncated
/// fragments in the state column. Those rows must be dropped before
/// aggregation or they become phantom states in every downstream table.
pub fn is_valid_state(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.chars().count() > 3 && !trimmed.chars().all(|c| c.is_ascii_digit())
}
