// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the catalog-search CLI.
//!
//! OneDark colors on a TTY, plain text everywhere else. `NO_COLOR` turns
//! colors off unconditionally.

use std::time::Duration;

use catalog_search::{CacheStats, CatalogEntry, MatchKind, ScoredMatch};

/// Width between the box borders.
pub const BOX_WIDTH: usize = 78;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

// OneDark: https://github.com/joshdick/onedark.vim
const GREEN: (u8, u8, u8) = (152, 195, 121);
const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
const YELLOW: (u8, u8, u8) = (229, 192, 123);
const BLUE: (u8, u8, u8) = (97, 175, 239);
const CYAN: (u8, u8, u8) = (86, 182, 194);
const GRAY: (u8, u8, u8) = (92, 99, 112);

/// Colors only when stdout is a terminal and `NO_COLOR` is unset.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

fn paint(color: (u8, u8, u8), bold: bool, text: &str) -> String {
    if !use_colors() {
        return text.to_string();
    }
    let weight = if bold { BOLD } else { "" };
    format!("{}{}{}{}", weight, rgb(color), text, RESET)
}

/// Visible length, skipping ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut to `max` visible chars, marking the cut with an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

// ─── box drawing ────────────────────────────────────────────────────────────

fn border(text: &str) -> String {
    paint(GRAY, false, text)
}

pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", paint(CYAN, true, label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

pub fn row(content: &str) {
    println!(
        "{}{}{}",
        border("│"),
        pad_right(content, BOX_WIDTH),
        border("│")
    );
}

pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ─── semantic formatters ────────────────────────────────────────────────────

/// Cents as a price, e.g. `12.50`.
pub fn format_price(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

pub fn kind_label(kind: MatchKind) -> String {
    let color = match kind {
        MatchKind::NameExact | MatchKind::NamePrefix => BRIGHT_GREEN,
        MatchKind::NameWord | MatchKind::NameSubstring | MatchKind::NameTokens => GREEN,
        MatchKind::DescriptionPhrase | MatchKind::DescriptionTokens => BLUE,
        MatchKind::Unfiltered => GRAY,
    };
    paint(color, false, kind.label())
}

/// Score colored by strength: exact-ish, name, description.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>7.2}", score);
    let color = if score >= 80.0 {
        BRIGHT_GREEN
    } else if score >= 20.0 {
        GREEN
    } else if score > 0.0 {
        YELLOW
    } else {
        GRAY
    };
    paint(color, false, &text)
}

pub fn timing_ms(elapsed: Duration) -> String {
    let ms = elapsed.as_secs_f64() * 1000.0;
    let color = if ms < 1.0 {
        GREEN
    } else if ms < 20.0 {
        YELLOW
    } else {
        (224, 108, 117)
    };
    paint(color, false, &format!("{:.3} ms", ms))
}

// ─── screens ────────────────────────────────────────────────────────────────

pub fn print_search_results(query: &str, results: &[CatalogEntry], limit: usize) {
    section_top(&format!("SEARCH \"{}\" ({} results)", query, results.len()));
    if results.is_empty() {
        row(&paint(GRAY, false, " no matching products"));
    }
    for (rank, entry) in results.iter().take(limit).enumerate() {
        let price = entry
            .min_price_cents()
            .map(format_price)
            .unwrap_or_else(|| "-".to_string());
        let category = entry
            .category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        row(&format!(
            " {:>3}. {:>6}  {}  {}  {}",
            rank + 1,
            entry.id,
            pad_right(&truncate(&entry.name, 36), 36),
            pad_right(&truncate(category, 14), 14),
            pad_right(&price, 10),
        ));
    }
    if results.len() > limit {
        row(&paint(
            GRAY,
            false,
            &format!(" … {} more", results.len() - limit),
        ));
    }
    section_bot();
}

pub fn print_matches(query: &str, matches: &[ScoredMatch], entries: &[CatalogEntry]) {
    section_top(&format!("RANK \"{}\"", query));
    for m in matches {
        let name = entries
            .iter()
            .find(|e| e.id == m.id)
            .map(|e| e.name.as_str())
            .unwrap_or("?");
        row(&format!(
            " {}  {}  {:>6}  {}",
            score_value(m.score),
            pad_right(&kind_label(m.kind), 10),
            m.id,
            truncate(name, 44),
        ));
    }
    section_bot();
}

pub fn print_run_timing(run: usize, elapsed: Duration, stats: CacheStats) {
    println!(
        "run {:>2}: {}  (hits {}, misses {})",
        run,
        timing_ms(elapsed),
        stats.hits,
        stats.misses
    );
}

/// Counts shown by `inspect`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub entries: usize,
    pub variants: usize,
    pub images: usize,
    pub categories: usize,
    pub missing_description: usize,
    pub without_variants: usize,
}

impl CatalogSummary {
    pub fn from_entries(entries: &[CatalogEntry]) -> Self {
        let mut categories: Vec<u64> = entries
            .iter()
            .filter_map(|e| e.category.as_ref().map(|c| c.id))
            .collect();
        categories.sort_unstable();
        categories.dedup();

        Self {
            entries: entries.len(),
            variants: entries.iter().map(|e| e.variants.len()).sum(),
            images: entries.iter().map(CatalogEntry::image_count).sum(),
            categories: categories.len(),
            missing_description: entries
                .iter()
                .filter(|e| e.description.as_deref().map_or(true, str::is_empty))
                .count(),
            without_variants: entries.iter().filter(|e| e.variants.is_empty()).count(),
        }
    }
}

pub fn print_summary(path: &str, summary: &CatalogSummary) {
    section_top("CATALOG");
    row(&format!(" file                 {}", truncate(path, 54)));
    row(&format!(" entries              {}", summary.entries));
    row(&format!(" variants             {}", summary.variants));
    row(&format!(" images               {}", summary.images));
    row(&format!(" categories           {}", summary.categories));
    row(&format!(" no description       {}", summary.missing_description));
    row(&format!(" no variants          {}", summary.without_variants));
    section_bot();
}
