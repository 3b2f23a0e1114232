/// Helper utilities for dcon

use regex::Regex;
use std::sync::OnceLock;

/// Strip ANSI escape codes (colors, cursor moves) from engine output
pub fn strip_ansi_codes(s: &str) -> String {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();

    match ANSI.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").ok()) {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// Truncate string with ellipsis, on a character boundary
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_codes() {
        assert_eq!(strip_ansi_codes("\x1b[32mINFO\x1b[0m ready"), "INFO ready");
        assert_eq!(strip_ansi_codes("\x1b[2Kplain"), "plain");
        assert_eq!(strip_ansi_codes("no escapes"), "no escapes");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a-very-long-image-name", 10), "a-very-...");
        assert_eq!(truncate_string("ünïcödé-name", 8), "ünïcö...");
    }
}
