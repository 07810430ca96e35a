//! Terminal escape sequence removal.

use regex::Regex;
use std::sync::LazyLock;

/// Color, cursor and charset sequences, introduced by ESC or CSI (0x9b).
static ANSI_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"[\x1b\x{9b}][\[()#;?]*(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-ORZcf-nqry=><]").ok()
});

/// Removes terminal escape sequences, leaving the visible characters.
pub fn strip_ansi(input: &str) -> String {
    match ANSI_REGEX.as_ref() {
        Some(re) => re.replace_all(input, "").into_owned(),
        None => input.to_string(),
    }
}
