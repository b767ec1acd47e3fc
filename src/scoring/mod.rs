// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how product matches get their numbers and their order.
//!
//! Match kind dominates. An exact name hit beats a name prefix, any name hit
//! beats a description hit, and the position/coverage bonus only breaks ties
//! inside a kind.

mod core;
pub mod ranking;

pub use self::core::*;
pub use self::ranking::{compare_matches, sort_matches};
