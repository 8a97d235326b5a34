//! Locale-aware string ordering for block names.
//!
//! Primary comparison ignores case and diacritics and ranks whitespace and
//! punctuation before digits and digits before letters; ties are broken with
//! lowercase before uppercase, then by code point so the order is total.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two strings the way a locale collator would for display ordering.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| case_key(a).cmp(case_key(b)))
        .then_with(|| a.cmp(b))
}

fn primary_key(s: &str) -> Vec<(u8, char)> {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
        .collect()
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() || c.is_ascii_punctuation() {
        0
    } else if c.is_numeric() {
        1
    } else {
        2
    }
}

fn case_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().filter(|c| c.is_alphabetic()).map(char::is_uppercase)
}
