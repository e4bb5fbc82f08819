//! Shared fixtures for the lock tests and the `search_fixture` binary.

#![forbid(unsafe_code)]

pub mod brute_force;
pub mod scenarios;
