//! Helpers for candidate name normalization and validation.
//!
//! Each external source wants the name in a slightly different shape:
//! the trademark cache keys on a lowercase/trimmed form, store title
//! matching strips all whitespace, and domain labels keep only
//! lowercase alphanumerics.

use crate::error::NameCheckError;

/// Maximum accepted candidate name length, in characters.
const MAX_NAME_LEN: usize = 64;

/// Validate a candidate name before checking.
///
/// Returns `Ok(())` if the name is usable, `Err(NameCheckError)` otherwise.
pub fn validate_name(name: &str) -> Result<(), NameCheckError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(NameCheckError::invalid_name(
            name,
            "Name cannot be empty",
        ));
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(NameCheckError::invalid_name(
            name,
            format!("Name exceeds {} characters", MAX_NAME_LEN),
        ));
    }

    Ok(())
}

/// Normalize a name for cache keys and registry queries: lowercase, trimmed.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize a title for store matching: lowercase with all whitespace removed.
///
/// "Sound Scout" and "soundscout" compare equal under this form.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Reduce a name to a domain label: lowercase alphanumerics only.
pub fn domain_base(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Truncate a string to at most `max` characters, appending an ellipsis
/// marker when content was dropped. Char-boundary safe.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Lumina").is_ok());
        assert!(validate_name("  spaced out  ").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Lumina "), "lumina");
        assert_eq!(normalize_name("SwiftHub"), "swifthub");
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("Sound Scout"), "soundscout");
        assert_eq!(normalize_title("  Sound\tScout "), "soundscout");
        assert_eq!(normalize_title("soundscout"), "soundscout");
    }

    #[test]
    fn test_domain_base() {
        assert_eq!(domain_base("Sound Scout!"), "soundscout");
        assert_eq!(domain_base("app-42"), "app42");
        assert_eq!(domain_base("Café"), "caf");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exactly-ten", 11), "exactly-ten");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
    }
}
