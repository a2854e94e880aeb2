//! Filename stem normalization

use unicode_normalization::UnicodeNormalization;

/// Narrow no-break space, written by macOS into screenshot names
pub const NARROW_NO_BREAK_SPACE: char = '\u{202F}';

/// No-break space
pub const NO_BREAK_SPACE: char = '\u{00A0}';

/// Normalize a raw filename stem
///
/// Null bytes and every whitespace variant become a plain space, runs of
/// spaces collapse to one, and the ends are trimmed. The result is NFC so a
/// decomposed name and its precomposed twin normalize identically.
pub fn normalize(raw_stem: &str) -> String {
    let mut result = String::with_capacity(raw_stem.len());
    let mut pending_space = false;

    for c in raw_stem.nfc() {
        if is_blank(c) {
            pending_space = !result.is_empty();
            continue;
        }
        if pending_space {
            result.push(' ');
            pending_space = false;
        }
        result.push(c);
    }

    result
}

/// Fold a stem down to ASCII by dropping combining marks and anything else
/// outside the ASCII range
pub fn fold_ascii(stem: &str) -> String {
    stem.nfd().filter(|c| c.is_ascii()).collect()
}

fn is_blank(c: char) -> bool {
    c == '\0' || c == NARROW_NO_BREAK_SPACE || c == NO_BREAK_SPACE || c.is_whitespace()
}
