//! Lodestar Harness: sample worlds and a strategy runner for the engines.
//!
//! The harness runs a world through one of the search engines
//! (`A*`, beam, MCTS) and packages the result as a canonical JSON run report
//! with a content digest, so repeated runs can be compared byte for byte.
//!
//! The harness does NOT implement search logic; it delegates to
//! `lodestar_search`. Worlds provide domain data only; the runner owns
//! orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod report;
pub mod runner;
pub mod worlds;
