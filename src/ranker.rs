// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Relevance ranking over one fetched batch of catalog entries.
//!
//! The ranker is a pure function: entries and a query go in, an ordered list of
//! `ScoredMatch` comes out. No I/O, no caching, no shared state. The caller
//! (usually `ProductSearch`) decides where the batch comes from and what to do
//! with the result.
//!
//! # Pipeline
//!
//! ```text
//! query ──normalize──▶ phrase + tokens
//!                           │
//! entries ──────────────────┼──▶ score_entry (per entry, best MatchKind wins)
//!                           │          │
//!                           │          ▼
//!                           │    drop non-matches
//!                           │          │
//!                           │          ▼
//!                           │    sort_matches (stable, score desc)
//!                           │          │
//!                           └──────────▼
//!                              resolve_matches (join back to the same batch)
//! ```
//!
//! # Empty queries
//!
//! A query that normalizes to nothing is not scored. `EmptyQueryPolicy::All`
//! passes every entry through in fetch order with score 0;
//! `EmptyQueryPolicy::Nothing` returns no matches.

use std::collections::HashMap;

use tracing::debug;

use crate::scoring::{coverage_bonus, final_score, position_bonus, sort_matches};
use crate::types::{CatalogEntry, EmptyQueryPolicy, EntryId, MatchKind, ScoredMatch};
use crate::utils::{find_char_offset, normalize, tokenize, word_start_offset};

/// A query after normalization: the whole phrase plus its distinct tokens.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    phrase: String,
}

impl PreparedQuery {
    pub fn new(query: &str) -> Self {
        Self {
            phrase: normalize(query),
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn tokens(&self) -> Vec<&str> {
        tokenize(&self.phrase)
    }

    pub fn is_empty(&self) -> bool {
        self.phrase.is_empty()
    }
}

/// Rank `entries` against `query`, best match first.
///
/// Every returned id comes from `entries`. Entries that don't match at all are
/// left out. Equal scores keep fetch order.
pub fn rank(entries: &[CatalogEntry], query: &str, policy: EmptyQueryPolicy) -> Vec<ScoredMatch> {
    let prepared = PreparedQuery::new(query);

    if prepared.is_empty() {
        return match policy {
            EmptyQueryPolicy::All => entries
                .iter()
                .map(|entry| ScoredMatch {
                    id: entry.id,
                    score: 0.0,
                    kind: MatchKind::Unfiltered,
                })
                .collect(),
            EmptyQueryPolicy::Nothing => Vec::new(),
        };
    }

    let tokens = prepared.tokens();
    let mut matches: Vec<ScoredMatch> = entries
        .iter()
        .filter_map(|entry| score_entry(entry, prepared.phrase(), &tokens))
        .collect();

    sort_matches(&mut matches);
    matches
}

/// Score one entry. `None` means neither name nor description matched.
///
/// Name rules are tried strongest first and the first hit wins; the
/// description is only consulted when the name has nothing.
pub fn score_entry(entry: &CatalogEntry, phrase: &str, tokens: &[&str]) -> Option<ScoredMatch> {
    let name = normalize(&entry.name);
    let scored = score_name(&name, phrase, tokens).or_else(|| {
        entry
            .description
            .as_deref()
            .map(normalize)
            .and_then(|description| score_description(&description, phrase, tokens))
    })?;

    let (kind, position, coverage) = scored;
    Some(ScoredMatch {
        id: entry.id,
        score: final_score(kind, position, coverage),
        kind,
    })
}

type FieldScore = (MatchKind, f64, f64);

fn score_name(name: &str, phrase: &str, tokens: &[&str]) -> Option<FieldScore> {
    let len = name.chars().count();
    let full = coverage_bonus(tokens.len(), tokens.len());

    if name == phrase {
        return Some((MatchKind::NameExact, position_bonus(0, len), full));
    }
    if name.starts_with(phrase) {
        return Some((MatchKind::NamePrefix, position_bonus(0, len), full));
    }
    if let Some(offset) = word_start_offset(name, phrase) {
        return Some((MatchKind::NameWord, position_bonus(offset, len), full));
    }
    if let Some(offset) = find_char_offset(name, phrase) {
        return Some((MatchKind::NameSubstring, position_bonus(offset, len), full));
    }

    token_match(name, tokens).map(|(position, coverage)| (MatchKind::NameTokens, position, coverage))
}

fn score_description(description: &str, phrase: &str, tokens: &[&str]) -> Option<FieldScore> {
    let len = description.chars().count();

    if let Some(offset) = find_char_offset(description, phrase) {
        return Some((
            MatchKind::DescriptionPhrase,
            position_bonus(offset, len),
            coverage_bonus(tokens.len(), tokens.len()),
        ));
    }

    token_match(description, tokens)
        .map(|(position, coverage)| (MatchKind::DescriptionTokens, position, coverage))
}

/// Position and coverage bonus for a partial token match, if any token hits.
fn token_match(field: &str, tokens: &[&str]) -> Option<(f64, f64)> {
    let offsets: Vec<usize> = tokens
        .iter()
        .filter_map(|token| find_char_offset(field, token))
        .collect();
    let earliest = offsets.iter().copied().min()?;
    let len = field.chars().count();
    Some((
        position_bonus(earliest, len),
        coverage_bonus(offsets.len(), tokens.len()),
    ))
}

/// Join ranked ids back to the entries they were scored from.
///
/// Output follows `matches` order. Ids that aren't in `entries` are skipped.
/// If `entries` repeats an id, the first occurrence is used.
pub fn resolve_matches(entries: &[CatalogEntry], matches: &[ScoredMatch]) -> Vec<CatalogEntry> {
    let mut by_id: HashMap<EntryId, &CatalogEntry> = HashMap::with_capacity(entries.len());
    for entry in entries {
        by_id.entry(entry.id).or_insert(entry);
    }

    matches
        .iter()
        .filter_map(|m| match by_id.get(&m.id) {
            Some(entry) => Some((*entry).clone()),
            None => {
                debug!(id = m.id, "dropping scored id with no fetched entry");
                None
            }
        })
        .collect()
}

/// Rank a batch and join the result back to full entries in one step.
pub fn search_entries(
    entries: &[CatalogEntry],
    query: &str,
    policy: EmptyQueryPolicy,
) -> Vec<CatalogEntry> {
    let matches = rank(entries, query, policy);
    resolve_matches(entries, &matches)
}
