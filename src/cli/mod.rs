// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the catalog-search command-line interface.
//!
//! Three subcommands over a JSON catalog file: `search` runs the cached search
//! path end to end, `rank` shows raw scores without the cache, and `inspect`
//! summarizes what the file contains.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "catalog-search",
    about = "Relevance-ranked product search over a catalog file",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Knobs shared by the commands that rank.
#[derive(Args, Clone)]
pub struct RankArgs {
    /// Path to the catalog JSON (array of products or {"products": [...]})
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Maximum number of catalog rows fetched per search (env: CATALOG_SEARCH_FETCH_LIMIT)
    #[arg(long)]
    pub fetch_limit: Option<usize>,

    /// What an empty query returns: `all` or `nothing` (env: CATALOG_SEARCH_EMPTY_QUERY)
    #[arg(long)]
    pub empty_query: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a cached product search and print the ordered results
    Search {
        #[command(flatten)]
        rank: RankArgs,

        /// Search query (may be empty)
        query: String,

        /// Maximum number of results to display
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Run the same search this many times (later runs should hit the cache)
        #[arg(long, default_value = "1")]
        repeat: usize,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show match kinds and scores for a query, bypassing the cache
    Rank {
        #[command(flatten)]
        rank: RankArgs,

        /// Search query
        query: String,
    },

    /// Summarize a catalog file
    Inspect {
        /// Path to the catalog JSON
        #[arg(short, long)]
        catalog: PathBuf,
    },
}
