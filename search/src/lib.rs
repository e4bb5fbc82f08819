//! Lodestar Search: three interchangeable search strategies over a
//! caller-supplied domain.
//!
//! This crate depends only on `lodestar_kernel`. It does NOT depend on
//! `lodestar_harness`; sample domains live there.
//!
//! # Crate dependency graph
//!
//! ```text
//! lodestar_kernel  ←  lodestar_search  ←  lodestar_harness
//! (contract, budget)   (engines, arenas)    (worlds, runner, reports)
//! ```
//!
//! # Choosing a strategy
//!
//! - [`astar::AStar`] finds a cost-optimal path between two states when the
//!   heuristic is admissible. Memory grows with the explored region.
//! - [`beam::BeamSearch`] keeps only the best `width` states per round for a
//!   fixed number of rounds. Memory is O(width); the answer is greedy.
//! - [`mcts::Mcts`] estimates the best *next action* from a root state by
//!   sampling, under an iteration / wall-clock / node budget.
//!
//! Every engine call owns its node store for the duration of the call and
//! retains nothing afterwards. Calls are synchronous and single-threaded.
//!
//! # Outcomes vs errors
//!
//! "Nothing found" is a normal outcome ([`astar::PathOutcome::NoPath`],
//! [`beam::BeamTermination::Collapsed`], [`mcts::Decision::Fallback`]).
//! [`error::SearchError`] is reserved for rejected configuration and domain
//! contract violations.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod astar;
pub mod beam;
pub mod dijkstra;
pub mod error;
pub mod frontier;
pub mod mcts;
pub mod node;
pub mod policy;
pub mod selection;
pub mod tree;
