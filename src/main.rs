// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_search::config::parse_empty_query;
use catalog_search::{rank, CatalogStore, JsonCatalogStore, ProductSearch, SearchConfig};

mod cli;
use cli::display::{self, CatalogSummary};
use cli::{Cli, Commands, RankArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Search {
            rank,
            query,
            limit,
            repeat,
            json,
        } => run_search(&rank, &query, limit, repeat, json).await,
        Commands::Rank { rank, query } => run_rank(&rank, &query).await,
        Commands::Inspect { catalog } => run_inspect(&catalog).await,
    };

    if let Err(e) = outcome {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Environment config with command-line flags layered on top.
fn load_config(args: &RankArgs) -> catalog_search::Result<SearchConfig> {
    let mut config = SearchConfig::from_env()?;
    if let Some(limit) = args.fetch_limit {
        config.fetch_limit = limit;
    }
    if let Some(raw) = &args.empty_query {
        config.empty_query = parse_empty_query(raw)?;
    }
    Ok(config)
}

async fn run_search(
    args: &RankArgs,
    query: &str,
    limit: usize,
    repeat: usize,
    json: bool,
) -> Result<()> {
    let config = load_config(args).context("invalid configuration")?;
    let search = ProductSearch::new(JsonCatalogStore::new(&args.catalog), &config);
    info!(catalog = %args.catalog.display(), ?config, "searching");

    let show_timing = repeat > 1 && !json;
    let mut run = 1;
    let mut start = Instant::now();
    let mut results = search
        .search_products(query)
        .await
        .with_context(|| format!("search over {} failed", args.catalog.display()))?;
    loop {
        if show_timing {
            display::print_run_timing(run, start.elapsed(), search.cache_stats());
        }
        if run >= repeat {
            break;
        }
        run += 1;
        start = Instant::now();
        results = search.search_products(query).await?;
    }

    if json {
        let shown: Vec<_> = results.iter().take(limit).collect();
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        display::print_search_results(query, &results, limit);
    }
    Ok(())
}

async fn run_rank(args: &RankArgs, query: &str) -> Result<()> {
    let config = load_config(args).context("invalid configuration")?;
    let store = JsonCatalogStore::new(&args.catalog);
    let entries = store
        .fetch_catalog(config.fetch_limit)
        .await
        .with_context(|| format!("failed to read {}", args.catalog.display()))?;

    let matches = rank(&entries, query, config.empty_query);
    display::print_matches(query, &matches, &entries);
    Ok(())
}

async fn run_inspect(catalog: &Path) -> Result<()> {
    let store = JsonCatalogStore::new(catalog);
    let entries = store
        .fetch_catalog(usize::MAX)
        .await
        .with_context(|| format!("failed to read {}", catalog.display()))?;

    let summary = CatalogSummary::from_entries(&entries);
    display::print_summary(&catalog.display().to_string(), &summary);
    Ok(())
}
