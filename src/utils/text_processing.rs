//! Text processing utilities.
//!
//! This module contains utilities for preparing text for terminal rendering,
//! such as truncating list entries and masking secret input.

/// Longest run of mask characters rendered for a secret value.
const MASK_LIMIT: usize = 50;

/// Truncate text to the given width, appending an ellipsis when content was
/// dropped. Widths under the ellipsis length fall back to a hard cut.
///
pub fn truncate_text(text: &str, max_width: usize) -> String {
    let length = text.chars().count();
    if length <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return text.chars().take(max_width).collect();
    }
    let kept: String = text.chars().take(max_width - 3).collect();
    format!("{}...", kept)
}

/// Replace every character of a secret value with an asterisk, capped so a
/// long password cannot stretch the layout.
///
pub fn mask_secret(text: &str) -> String {
    "*".repeat(text.chars().count().min(MASK_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_short_input_unchanged() {
        assert_eq!(truncate_text("ada", 10), "ada");
        assert_eq!(truncate_text("ada", 3), "ada");
    }

    #[test]
    fn test_truncate_text_appends_ellipsis() {
        assert_eq!(truncate_text("ada lovelace", 7), "ada ...");
    }

    #[test]
    fn test_truncate_text_tiny_width_hard_cuts() {
        assert_eq!(truncate_text("ada lovelace", 2), "ad");
    }

    #[test]
    fn test_mask_secret_matches_length() {
        assert_eq!(mask_secret("secret"), "******");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn test_mask_secret_is_capped() {
        let long = "x".repeat(200);
        assert_eq!(mask_secret(&long).chars().count(), 50);
    }
}
