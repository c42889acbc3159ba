//! Collision-free naming of query parameters.

use model::core::value::Value;
use std::collections::BTreeMap;

/// Named parameters bound alongside a compiled query.
pub type Parameters = BTreeMap<String, Value>;

/// Returns `base` if it is not yet a key of `parameters`, otherwise `base_n`
/// for the smallest `n >= 1` that is free.
///
/// The map must be the one accumulated over the whole build, not a fresh one
/// per call, or keys from sibling subtrees can collide.
pub fn allocate_key<V>(parameters: &BTreeMap<String, V>, base: &str) -> String {
    if !parameters.contains_key(base) {
        return base.to_string();
    }

    let mut n = 1;
    loop {
        let candidate = format!("{base}_{n}");
        if !parameters.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Turns an arbitrary property name into a valid placeholder base name.
///
/// Characters outside `[A-Za-z0-9_]` become `_`; a leading digit gets a
/// `p_` prefix.
pub fn parameter_base(name: &str) -> String {
    let mut base: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
        base.insert_str(0, "p_");
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(keys: &[&str]) -> Parameters {
        keys.iter()
            .map(|k| (k.to_string(), Value::from(*k)))
            .collect()
    }

    #[test]
    fn test_allocate_unused_base() {
        assert_eq!(allocate_key(&params(&[]), "type"), "type");
    }

    #[test]
    fn test_allocate_first_suffix() {
        assert_eq!(allocate_key(&params(&["type"]), "type"), "type_1");
    }

    #[test]
    fn test_allocate_next_free_suffix() {
        assert_eq!(allocate_key(&params(&["type", "type_1"]), "type"), "type_2");
        assert_eq!(
            allocate_key(&params(&["type", "type_1", "type_3"]), "type"),
            "type_2"
        );
    }

    #[test]
    fn test_allocate_ignores_unrelated_keys() {
        assert_eq!(allocate_key(&params(&["type_1", "name"]), "type"), "type");
    }

    #[test]
    fn test_parameter_base() {
        assert_eq!(parameter_base("name"), "name");
        assert_eq!(parameter_base("first name"), "first_name");
        assert_eq!(parameter_base("a-b.c"), "a_b_c");
        assert_eq!(parameter_base("2fa"), "p_2fa");
        assert_eq!(parameter_base("$"), "_");
    }
}
