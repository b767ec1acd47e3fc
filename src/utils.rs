// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text helpers shared by the ranker.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalize text for matching: strip diacritics, lowercase, collapse whitespace.
///
/// Both the query and the entry fields go through this, so "Café  Crème" and
/// "cafe creme" compare equal.
///
/// Without the `unicode-normalization` feature only the lowercase and
/// whitespace steps run.
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unicode category Mn ranges that show up after NFD decomposition.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

/// Split already-normalized text into query tokens, dropping duplicates.
///
/// Order of first appearance is kept so results don't depend on hashing.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = Vec::new();
    for word in normalized.split(' ').filter(|w| !w.is_empty()) {
        if !tokens.contains(&word) {
            tokens.push(word);
        }
    }
    tokens
}

/// Character offset of the first occurrence of `needle` in `haystack`.
///
/// Offsets are counted in chars, not bytes, so the position bonus treats
/// "crème" and "creme" the same.
pub fn find_char_offset(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count())
}

/// Character offset of the first occurrence of `needle` that starts a word.
///
/// A word starts at the beginning of `haystack` or right after a space, so a
/// multi-word needle like "red mug" counts when "red" starts a word.
pub fn word_start_offset(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .match_indices(needle)
        .map(|(byte_idx, _)| byte_idx)
        .find(|&byte_idx| byte_idx == 0 || haystack[..byte_idx].ends_with(' '))
        .map(|byte_idx| haystack[..byte_idx].chars().count())
}
