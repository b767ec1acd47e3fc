// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ordering.
//!
//! Matches are ordered by score, highest first. Ties keep the order in which
//! the store returned the entries: `sort_matches` uses a stable sort and
//! `compare_matches` never looks past the score.

use crate::types::ScoredMatch;
use std::cmp::Ordering;

/// Compare two matches for ranking (descending score).
///
/// Uses `total_cmp`, so the ordering is total even for NaN scores, which the
/// scorer never produces but a hand-built `ScoredMatch` could.
pub fn compare_matches(a: &ScoredMatch, b: &ScoredMatch) -> Ordering {
    b.score.total_cmp(&a.score)
}

/// Sort matches in place, best first, preserving input order for equal scores.
pub fn sort_matches(matches: &mut [ScoredMatch]) {
    matches.sort_by(compare_matches);
}
