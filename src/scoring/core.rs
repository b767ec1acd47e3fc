// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The numbers behind product ranking.
//!
//! Match kind dominates everything else. A name-token match with the worst
//! possible bonus still beats a description phrase match with the best bonus.
//! The bonus only orders entries within one kind.
//!
//! # Key Invariant: Kind Dominance
//!
//! ```text
//! base(k) - 0 > base(k + 1) + MAX_BONUS   for adjacent kinds k, k + 1
//! ```
//!
//! The smallest gap is 5 (DescriptionPhrase → DescriptionTokens) and
//! `MAX_BONUS` is 1.0, so the hierarchy holds with room to spare.
//!
//! # Constants
//!
//! | Kind              | Base  |
//! |-------------------|-------|
//! | NameExact         | 100.0 |
//! | NamePrefix        | 80.0  |
//! | NameWord          | 60.0  |
//! | NameSubstring     | 40.0  |
//! | NameTokens        | 20.0  |
//! | DescriptionPhrase | 10.0  |
//! | DescriptionTokens | 5.0   |
//!
//! Keep `tests::test_kind_dominance` passing when changing any of these.

use crate::types::MatchKind;

pub const NAME_EXACT_SCORE: f64 = 100.0;
pub const NAME_PREFIX_SCORE: f64 = 80.0;
pub const NAME_WORD_SCORE: f64 = 60.0;
pub const NAME_SUBSTRING_SCORE: f64 = 40.0;
pub const NAME_TOKENS_SCORE: f64 = 20.0;
pub const DESCRIPTION_PHRASE_SCORE: f64 = 10.0;
pub const DESCRIPTION_TOKENS_SCORE: f64 = 5.0;

/// Maximum position bonus (match at offset 0 gets all of it).
pub const MAX_POSITION_BONUS: f64 = 0.5;

/// Maximum coverage bonus (every query token present in the field).
pub const MAX_COVERAGE_BONUS: f64 = 0.5;

/// Upper bound on the combined bonus.
pub const MAX_BONUS: f64 = MAX_POSITION_BONUS + MAX_COVERAGE_BONUS;

/// Base score by match kind.
pub fn kind_base_score(kind: MatchKind) -> f64 {
    match kind {
        MatchKind::NameExact => NAME_EXACT_SCORE,
        MatchKind::NamePrefix => NAME_PREFIX_SCORE,
        MatchKind::NameWord => NAME_WORD_SCORE,
        MatchKind::NameSubstring => NAME_SUBSTRING_SCORE,
        MatchKind::NameTokens => NAME_TOKENS_SCORE,
        MatchKind::DescriptionPhrase => DESCRIPTION_PHRASE_SCORE,
        MatchKind::DescriptionTokens => DESCRIPTION_TOKENS_SCORE,
        MatchKind::Unfiltered => 0.0,
    }
}

/// Position bonus: earlier first occurrence scores slightly higher.
///
/// Range `[0, MAX_POSITION_BONUS]`, monotonically non-increasing in `offset`.
/// An offset at or past the end of the text gets nothing.
pub fn position_bonus(offset: usize, text_len: usize) -> f64 {
    if text_len == 0 || offset >= text_len {
        return 0.0;
    }
    MAX_POSITION_BONUS * (1.0 - (offset as f64 / text_len as f64))
}

/// Coverage bonus: fraction of query tokens found in the matched field.
pub fn coverage_bonus(matched_tokens: usize, total_tokens: usize) -> f64 {
    if total_tokens == 0 {
        return 0.0;
    }
    let matched = matched_tokens.min(total_tokens);
    MAX_COVERAGE_BONUS * (matched as f64 / total_tokens as f64)
}

/// Combine the kind's base score with both bonuses.
pub fn final_score(kind: MatchKind, position: f64, coverage: f64) -> f64 {
    kind_base_score(kind) + position.clamp(0.0, MAX_POSITION_BONUS)
        + coverage.clamp(0.0, MAX_COVERAGE_BONUS)
}
