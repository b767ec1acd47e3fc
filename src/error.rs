// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! `StoreError` is what a catalog fetch can fail with. The search service hands
//! it back to the caller exactly as the store produced it.

use thiserror::Error;

/// A catalog fetch failed.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be reached or refused the request.
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),

    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store answered, but the rows did not decode into catalog entries.
    #[error("malformed catalog data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A configuration value could not be used.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Crate-level error for callers that deal with both stores and configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
