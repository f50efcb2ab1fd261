//! Display helpers for product lists.

/// Default number of characters kept by [`truncate_default`].
pub const DEFAULT_TRUNCATE_LIMIT: usize = 50;

/// Default trail appended by [`truncate_default`].
pub const DEFAULT_TRUNCATE_TRAIL: &str = "...";

/// Cuts `value` to `limit` characters and appends `trail` when it was longer.
///
/// ```rust
/// use catalog_core::text::truncate;
///
/// assert_eq!(truncate("Short text", 20, "..."), "Short text");
/// assert_eq!(
///     truncate("This is a very long text that needs to be truncated", 20, "..."),
///     "This is a very long ..."
/// );
/// ```
pub fn truncate(value: &str, limit: usize, trail: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    if value.chars().count() <= limit {
        return value.to_string();
    }

    let mut cut: String = value.chars().take(limit).collect();
    cut.push_str(trail);
    cut
}

/// [`truncate`] with a 50 character limit and `"..."` trail.
pub fn truncate_default(value: &str) -> String {
    truncate(value, DEFAULT_TRUNCATE_LIMIT, DEFAULT_TRUNCATE_TRAIL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(truncate_default(""), "");
    }

    #[test]
    fn test_exact_limit_is_kept() {
        let text = "a".repeat(50);
        assert_eq!(truncate_default(&text), text);
    }

    #[test]
    fn test_default_limit() {
        let text = "b".repeat(60);
        let result = truncate_default(&text);
        assert_eq!(result, format!("{}...", "b".repeat(50)));
    }

    #[test]
    fn test_custom_trail_and_multibyte() {
        assert_eq!(truncate("produto ótimo", 9, "…"), "produto ó…");
    }
}
