//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds `max_width` display columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// One bullet per character, so the field length is visible but not the text.
pub fn mask_secret(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis_short() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_with_ellipsis_long() {
        assert_eq!(truncate_with_ellipsis("ann@example.com", 8), "ann@exa…");
    }

    #[test]
    fn test_truncate_with_ellipsis_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(truncate_with_ellipsis("日本語テキスト", 7), "日本語…");
    }

    #[test]
    fn test_mask_secret_counts_chars() {
        assert_eq!(mask_secret(""), "");
        assert_eq!(mask_secret("pässwd"), "••••••");
    }
}
