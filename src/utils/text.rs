#[must_use]
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            let truncated = &s[..idx];
            format!("{}...", truncated.trim_end())
        }
        None => s.to_string(),
    }
}

/// Strip surrounding whitespace and any straight or curly quote characters.
#[must_use]
pub fn strip_quotes(s: &str) -> &str {
    s.trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '`' | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}'))
        .trim()
}

#[must_use]
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_without_truncation() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
    }

    #[test]
    fn truncate_with_truncation() {
        assert_eq!(
            truncate_with_ellipsis("This is a long message", 10),
            "This is a..."
        );
    }

    #[test]
    fn strip_quotes_handles_mixed_styles() {
        assert_eq!(strip_quotes("  \"Winter gutter care\"  "), "Winter gutter care");
        assert_eq!(strip_quotes("\u{201C}Roof checks\u{201D}"), "Roof checks");
        assert_eq!(strip_quotes("'It's fine'"), "It's fine");
        assert_eq!(strip_quotes("plain"), "plain");
    }

    #[test]
    fn word_count_ignores_repeated_whitespace() {
        assert_eq!(word_count("  one two\n\nthree\tfour "), 4);
        assert_eq!(word_count(""), 0);
    }
}
