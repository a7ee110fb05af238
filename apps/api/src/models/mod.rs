pub mod analysis;
pub mod learning;
pub mod resume;

/// Returns the trimmed value when it holds anything besides whitespace.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Appends `item` unless an entry with the same case-insensitive spelling is already present.
/// The first spelling wins.
pub fn push_unique(list: &mut Vec<String>, item: &str) {
    let item = item.trim();
    if item.is_empty() {
        return;
    }
    if !list.iter().any(|existing| existing.eq_ignore_ascii_case(item)) {
        list.push(item.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank_filters_whitespace() {
        assert_eq!(non_blank(&Some("  ".to_string())), None);
        assert_eq!(non_blank(&None), None);
        assert_eq!(non_blank(&Some(" Rust ".to_string())), Some("Rust"));
    }

    #[test]
    fn test_push_unique_is_case_insensitive() {
        let mut skills = vec![];
        push_unique(&mut skills, "Python");
        push_unique(&mut skills, "python");
        push_unique(&mut skills, " ");
        push_unique(&mut skills, "Rust");
        assert_eq!(skills, vec!["Python", "Rust"]);
    }
}
