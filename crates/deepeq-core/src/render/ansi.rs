//! ANSI escape sequences used by the renderer

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

pub const BOLD: &str = "\x1b[1m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const RESET: &str = "\x1b[0m";

/// Any CSI or OSC-style escape sequence, including the single-byte CSI
/// introducer U+009B.
static ESCAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(
        r"[\x1b\x{9b}][\[\]()#;?]*(?:(?:(?:[a-zA-Z\d]*(?:;[a-zA-Z\d]*)*)?\x07)|(?:(?:\d{1,4}(?:;\d{0,4})*)?[\dA-PRZcf-ntqry=><~]))",
    )
    .expect("escape sequence regex pattern is invalid")
});

/// SGR (Select Graphic Rendition) sequences only
static SGR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\x1b\[[0-9;]*m").expect("SGR regex pattern is invalid")
});

/// Remove every escape sequence from `input`
pub fn strip_ansi(input: &str) -> String {
    ESCAPE_REGEX.replace_all(input, "").into_owned()
}

/// Terminal column width of `input` once escape sequences are removed
pub fn visible_width(input: &str) -> usize {
    strip_ansi(input).width()
}

/// Make every line carry its own styling
///
/// A style left open at the end of a line is reset there and reopened at the
/// start of the next line, so lines can be rearranged (as the side-by-side
/// composer does) without styles leaking between them.
pub fn balance_lines(lines: &mut [String]) {
    let mut carried: Option<String> = None;
    for line in lines.iter_mut() {
        let mut active = carried.clone();
        for sgr in SGR_REGEX.find_iter(line) {
            active = match sgr.as_str() {
                RESET | "\x1b[m" => None,
                code => Some(code.to_string()),
            };
        }
        if let Some(code) = &carried {
            line.insert_str(0, code);
        }
        if active.is_some() {
            line.push_str(RESET);
        }
        carried = active;
    }
}
