//! Statistical bulk evaluation of solver configurations.
//!
//! `BulkRunner` drives one solver/heuristic combination over a stream of
//! randomized placements, one iteration per call, so an interactive host can
//! spread a long evaluation across ticks instead of blocking. Latency and
//! node-count totals accumulate over passing runs only; failures are merely
//! counted.
use crate::engine::Placement;
use crate::heuristics::Heuristic;
use crate::solver::{Solver, SolverParam};
use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

/// Iteration-at-a-time statistics harness.
///
/// The runner owns a seeded random source, so a fixed seed reproduces the
/// same sequence of initial placements (and, for deterministic solvers, the
/// same results).
#[derive(Debug)]
pub struct BulkRunner {
    board_size: usize,
    rng: SmallRng,
    passed: u64,
    failed: u64,
    total_elapsed: Duration,
    total_generated: u64,
}

impl BulkRunner {
    /// Creates a runner producing random placements of `board_size`.
    ///
    /// # Panics
    /// Panics if `board_size` is zero.
    pub fn new(board_size: usize, seed: u64) -> Self {
        assert!(board_size > 0, "board size must be at least 1");
        BulkRunner {
            board_size,
            rng: SmallRng::seed_from_u64(seed),
            passed: 0,
            failed: 0,
            total_elapsed: Duration::ZERO,
            total_generated: 0,
        }
    }

    /// Runs one iteration: fresh random placement, one solve, one
    /// pass/fail classification.
    ///
    /// # Returns
    /// `true` when the solver converged on this iteration.
    pub fn run_iteration(
        &mut self,
        solver: &dyn Solver,
        param: &SolverParam,
        heuristic: &dyn Heuristic,
    ) -> bool {
        let initial = Placement::random(self.board_size, &mut self.rng);
        let solution = solver.solve(&initial, param, heuristic, &mut self.rng);

        let passed = solution.is_solved();
        if passed {
            self.passed += 1;
            self.total_elapsed += solution.elapsed;
            self.total_generated += solution.generated_states;
        } else {
            self.failed += 1;
        }

        debug!(
            "iteration {}: {} in {:?}, {} states",
            self.iterations(),
            if passed { "pass" } else { "fail" },
            solution.elapsed,
            solution.generated_states
        );
        passed
    }

    /// Number of iterations that converged.
    pub fn passed(&self) -> u64 {
        self.passed
    }

    /// Number of iterations that failed to converge.
    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// Total iterations run so far.
    pub fn iterations(&self) -> u64 {
        self.passed + self.failed
    }

    /// Total wall time across passing iterations.
    pub fn total_elapsed(&self) -> Duration {
        self.total_elapsed
    }

    /// Total generated states across passing iterations.
    pub fn total_generated(&self) -> u64 {
        self.total_generated
    }

    /// Mean wall time per passing iteration, if any passed.
    pub fn mean_duration(&self) -> Option<Duration> {
        if self.passed == 0 {
            return None;
        }
        Some(self.total_elapsed / self.passed as u32)
    }

    /// Mean generated states per passing iteration, if any passed.
    pub fn mean_generated(&self) -> Option<f64> {
        if self.passed == 0 {
            return None;
        }
        Some(self.total_generated as f64 / self.passed as f64)
    }
}
