//! Naming styles

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static REPEATED_HYPHENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("hyphen pattern is valid"));

static REPEATED_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{2,}").expect("underscore pattern is valid"));

static WORD_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s.\-_]+").expect("separator pattern is valid"));

/// Naming convention applied to a file stem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// lowercase, hyphens, underscores kept (URL-safe)
    #[default]
    Web,
    /// lowercase, underscores
    Snake,
    /// lowercase, hyphens only
    Kebab,
    /// camelCase, no separators
    Camel,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Web, Style::Snake, Style::Kebab, Style::Camel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Web => "web",
            Style::Snake => "snake",
            Style::Kebab => "kebab",
            Style::Camel => "camel",
        }
    }

    /// Apply this style to an already normalized stem
    pub fn apply(&self, stem: &str) -> String {
        match self {
            Style::Web => delimited(stem, '-', &['.'], &['_']),
            Style::Snake => delimited(stem, '_', &['.', '-'], &[]),
            Style::Kebab => delimited(stem, '-', &['.', '_'], &[]),
            Style::Camel => camel(stem),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply a naming style to a normalized stem
pub fn apply_style(normalized_stem: &str, style: Style) -> String {
    style.apply(normalized_stem)
}

/// Lowercase, turn whitespace and `converted` into `delim`, drop anything that
/// is not alphanumeric or a kept separator, then collapse and trim `delim`.
fn delimited(stem: &str, delim: char, converted: &[char], kept: &[char]) -> String {
    let filtered: String = stem
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || converted.contains(&c) { delim } else { c })
        .filter(|c| c.is_alphanumeric() || *c == delim || kept.contains(c))
        .collect();

    let repeated = if delim == '-' { &REPEATED_HYPHENS } else { &REPEATED_UNDERSCORES };
    let collapsed = repeated.replace_all(&filtered, delim.to_string());

    collapsed.trim_matches(delim).to_string()
}

fn camel(stem: &str) -> String {
    WORD_SEPARATORS
        .split(stem)
        .map(|part| part.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|word| !word.is_empty())
        .enumerate()
        .map(|(i, word)| camel_word(&word, i == 0))
        .collect()
}

fn camel_word(word: &str, first: bool) -> String {
    // An all-capitals word ("README", "HELLO") is lowercased before casing
    let shouting = word.chars().next().is_some_and(char::is_uppercase)
        && !word.chars().any(char::is_lowercase);
    let base: String = if shouting {
        word.to_lowercase().chars().filter(|c| c.is_alphanumeric()).collect()
    } else {
        word.to_string()
    };

    let mut chars = base.chars();
    match chars.next() {
        None => String::new(),
        Some(head) => {
            let head = if first {
                single_char(head.to_lowercase(), head)
            } else {
                single_char(head.to_uppercase(), head)
            };
            let mut out = String::with_capacity(base.len());
            out.push(head);
            out.push_str(chars.as_str());
            out
        }
    }
}

/// Case mappings that expand to several characters ('ß' → "SS") would make
/// the style unstable on a second pass, so those characters are kept as is.
fn single_char(mut mapped: impl Iterator<Item = char>, original: char) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(c), None) => c,
        _ => original,
    }
}
