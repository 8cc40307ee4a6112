//! Small utility helpers used across modules.

use std::sync::LazyLock;

use regex::Regex;

/// Exactly one character of the Han script. The anchors make the
/// single-character requirement structural, so no separate length check
/// is needed.
pub static HAN_CHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{Han}$").unwrap());

/// True if the input is a single Han-script character.
/// This is the accepted-guess rule for both game modes.
pub fn is_single_han(s: &str) -> bool {
    HAN_CHAR.is_match(s)
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}… ({} bytes total)", &s[..end], s.len())
    }
}
