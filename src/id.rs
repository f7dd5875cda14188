//! ID generation utilities for toolbench
//!
//! Provides functions for generating and validating post record identifiers.

use rand::Rng;

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Generate a unique post ID
///
/// Format: `post-{timestamp_ms}-{random_hex}`
/// Example: `post-1738300800123-a1b2`
pub fn generate_post_id() -> String {
    let timestamp = now_ms();
    let random: u16 = rand::rng().random();
    format!("post-{}-{:04x}", timestamp, random)
}

/// Check whether a string matches the post ID format.
///
/// Used by schema validation so malformed identifiers are rejected
/// before any store call.
pub fn is_valid_post_id(id: &str) -> bool {
    let parts: Vec<&str> = id.split('-').collect();
    if parts.len() != 3 || parts[0] != "post" {
        return false;
    }
    let millis_ok = !parts[1].is_empty() && parts[1].chars().all(|c| c.is_ascii_digit());
    let suffix_ok = parts[2].len() == 4 && parts[2].chars().all(|c| c.is_ascii_hexdigit());
    millis_ok && suffix_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_returns_reasonable_timestamp() {
        let ts = now_ms();
        // Should be after 2020-01-01 and before 2100-01-01
        assert!(ts > 1577836800000); // 2020-01-01
        assert!(ts < 4102444800000); // 2100-01-01
    }

    #[test]
    fn test_generate_post_id_format() {
        let id = generate_post_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "post");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        // 4-char hex suffix
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_post_id_uniqueness() {
        let id1 = generate_post_id();
        let id2 = generate_post_id();
        // With random component, should be different
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_generated_ids_validate() {
        let id = generate_post_id();
        assert!(is_valid_post_id(&id));
    }

    #[test]
    fn test_is_valid_post_id_rejects_bad_prefix() {
        assert!(!is_valid_post_id("loop-1738300800123-a1b2"));
        assert!(!is_valid_post_id("1738300800123-a1b2"));
    }

    #[test]
    fn test_is_valid_post_id_rejects_bad_suffix() {
        assert!(!is_valid_post_id("post-1738300800123-xyzq"));
        assert!(!is_valid_post_id("post-1738300800123-a1b"));
        assert!(!is_valid_post_id("post-1738300800123-a1b22"));
    }

    #[test]
    fn test_is_valid_post_id_rejects_non_numeric_timestamp() {
        assert!(!is_valid_post_id("post-notamillis-a1b2"));
        assert!(!is_valid_post_id("post--a1b2"));
    }

    #[test]
    fn test_is_valid_post_id_rejects_empty() {
        assert!(!is_valid_post_id(""));
        assert!(!is_valid_post_id("post"));
    }
}
