//! Scoring formula properties.
//!
//! - Bonuses stay inside their bounds
//! - The bonus never lets a weaker kind reach a stronger one
//! - Earlier positions never score lower

use catalog_search::scoring::{
    coverage_bonus, final_score, kind_base_score, position_bonus, MAX_BONUS,
    MAX_COVERAGE_BONUS, MAX_POSITION_BONUS,
};
use catalog_search::MatchKind;
use proptest::prelude::*;

const RANKED_KINDS: [MatchKind; 7] = [
    MatchKind::NameExact,
    MatchKind::NamePrefix,
    MatchKind::NameWord,
    MatchKind::NameSubstring,
    MatchKind::NameTokens,
    MatchKind::DescriptionPhrase,
    MatchKind::DescriptionTokens,
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: position bonus is in [0, MAX_POSITION_BONUS].
    #[test]
    fn prop_position_bonus_bounded(offset in 0usize..500, len in 0usize..500) {
        let bonus = position_bonus(offset, len);
        prop_assert!((0.0..=MAX_POSITION_BONUS).contains(&bonus));
    }

    /// Property: position bonus never increases as the offset moves right.
    #[test]
    fn prop_position_bonus_monotone(a in 0usize..200, b in 0usize..200, len in 1usize..200) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(position_bonus(near, len) >= position_bonus(far, len));
    }

    /// Property: coverage bonus is in [0, MAX_COVERAGE_BONUS], even when
    /// more tokens are reported than exist.
    #[test]
    fn prop_coverage_bonus_bounded(matched in 0usize..20, total in 0usize..20) {
        let bonus = coverage_bonus(matched, total);
        prop_assert!((0.0..=MAX_COVERAGE_BONUS).contains(&bonus));
    }

    /// Property: with any bonus, a kind never reaches the next stronger kind's base.
    #[test]
    fn prop_kind_dominates_bonus(
        idx in 1usize..7,
        position in -1.0f64..2.0,
        coverage in -1.0f64..2.0,
    ) {
        let weaker = RANKED_KINDS[idx];
        let stronger = RANKED_KINDS[idx - 1];
        let best_weaker = final_score(weaker, position, coverage);
        prop_assert!(best_weaker < kind_base_score(stronger));
        prop_assert!(best_weaker <= kind_base_score(weaker) + MAX_BONUS);
    }
}
