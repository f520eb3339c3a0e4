//! # Queens Solver Library
//!
//! This library provides the algorithmic core of an N-queens-style placement
//! puzzle (one movable queen per board column) and two local-search solvers
//! that try to drive a placement down to zero conflicts.
//!
//! It is used by two binaries:
//! - `solve`: Runs a single solver on a single placement and prints the
//!   outcome.
//! - `bulk_eval`: Runs a solver repeatedly over randomized placements and
//!   reports aggregate pass/latency/node-count statistics.
//!
//! Both solvers are incomplete local searches: a returned `Solution` without
//! a placement means the search failed to converge, which is a normal
//! outcome rather than an error.
//!
//! ## Modules
//! - `engine`: Contains the board state representation (`Placement`), the
//!   queen threat predicate, and random placement generation.
//! - `heuristics`: Defines the `Heuristic` scoring interface and its two
//!   variants, `LocalThreats` and `GlobalThreats`.
//! - `solver`: Provides the search-state representation, the bounded tabu
//!   memory, solver parameters, and the `BeamSearch` and `TabuSearch`
//!   algorithms.
//! - `stats`: Provides `BulkRunner`, an iteration-at-a-time statistical
//!   harness over randomized placements.
//! - `utils`: Provides parsing helpers, such as reading a placement from a
//!   command-line string.

pub mod engine;
pub mod heuristics;
pub mod solver;
pub mod stats;
pub mod utils;
