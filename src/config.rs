// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search configuration from the environment.
//!
//! | Variable                          | Default | Meaning                         |
//! |-----------------------------------|---------|---------------------------------|
//! | `CATALOG_SEARCH_FETCH_LIMIT`      | 100     | rows fetched per search         |
//! | `CATALOG_SEARCH_CACHE_TTL_SECS`   | unset   | validity window, 0 = no TTL     |
//! | `CATALOG_SEARCH_CACHE_MAX_ENTRIES`| 1024    | cached queries, 0 = no caching  |
//! | `CATALOG_SEARCH_EMPTY_QUERY`      | all     | `all` or `nothing`              |
//! | `CATALOG_SEARCH_COALESCE`         | false   | one fetch per key at a time     |
//!
//! Unset variables fall back to the default. Set-but-invalid ones are an error
//! rather than a silent fallback.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::error::ConfigError;
use crate::store::DEFAULT_FETCH_LIMIT;
use crate::types::EmptyQueryPolicy;

pub const ENV_FETCH_LIMIT: &str = "CATALOG_SEARCH_FETCH_LIMIT";
pub const ENV_CACHE_TTL_SECS: &str = "CATALOG_SEARCH_CACHE_TTL_SECS";
pub const ENV_CACHE_MAX_ENTRIES: &str = "CATALOG_SEARCH_CACHE_MAX_ENTRIES";
pub const ENV_EMPTY_QUERY: &str = "CATALOG_SEARCH_EMPTY_QUERY";
pub const ENV_COALESCE: &str = "CATALOG_SEARCH_COALESCE";

pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Upper bound on rows fetched from the store per search.
    pub fetch_limit: usize,
    /// How long a cached result stays valid. `None` = until invalidated.
    pub cache_ttl: Option<Duration>,
    pub max_cache_entries: usize,
    pub empty_query: EmptyQueryPolicy,
    /// Serialize concurrent misses for the same query.
    pub coalesce_misses: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fetch_limit: DEFAULT_FETCH_LIMIT,
            cache_ttl: None,
            max_cache_entries: DEFAULT_CACHE_MAX_ENTRIES,
            empty_query: EmptyQueryPolicy::All,
            coalesce_misses: false,
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key → value source. `from_env` is this over `std::env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let ttl_secs: u64 = try_load(&lookup, ENV_CACHE_TTL_SECS, 0)?;
        let empty_query = match lookup(ENV_EMPTY_QUERY) {
            None => defaults.empty_query,
            Some(raw) => parse_empty_query(&raw)?,
        };
        let coalesce_misses = match lookup(ENV_COALESCE) {
            None => defaults.coalesce_misses,
            Some(raw) => parse_bool(ENV_COALESCE, &raw)?,
        };

        Ok(Self {
            fetch_limit: try_load(&lookup, ENV_FETCH_LIMIT, defaults.fetch_limit)?,
            cache_ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
            max_cache_entries: try_load(&lookup, ENV_CACHE_MAX_ENTRIES, defaults.max_cache_entries)?,
            empty_query,
            coalesce_misses,
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

pub fn parse_empty_query(raw: &str) -> Result<EmptyQueryPolicy, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "all" => Ok(EmptyQueryPolicy::All),
        "nothing" | "none" => Ok(EmptyQueryPolicy::Nothing),
        _ => Err(ConfigError::Invalid {
            key: ENV_EMPTY_QUERY.to_string(),
            value: raw.to_string(),
            reason: "expected `all` or `nothing`".to_string(),
        }),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key: key.to_string(),
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
