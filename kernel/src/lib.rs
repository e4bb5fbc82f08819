//! Lodestar Kernel: the domain-agnostic core shared by every search engine.
//!
//! # API Surface
//!
//! - [`contract`] -- the domain collaborator traits every engine consumes
//! - [`budget`] -- the wall-clock / iteration / node-count termination controller
//! - [`proof`] -- canonical JSON bytes and domain-separated SHA-256 digests
//!
//! # Module Dependency Direction
//!
//! `contract` and `budget` are leaves. `proof` depends on nothing internal.
//! The kernel never depends on `lodestar_search` or `lodestar_harness`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod budget;
pub mod contract;
pub mod proof;
