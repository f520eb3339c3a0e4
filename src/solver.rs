//! Local-search solvers over queen placements.
//!
//! Both algorithms walk the space of single-queen moves, guided by a
//! [`Heuristic`]: `BeamSearch` keeps a fixed-width frontier of the best
//! candidates per layer, `TabuSearch` follows strict improvements and
//! diversifies through a bounded memory of rejected states. Both are
//! incomplete searches; failure to converge is reported as a [`Solution`]
//! without a placement, never as an error.
use crate::engine::Placement;
use crate::heuristics::Heuristic;
use log::debug;
use rand::{Rng, RngCore};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Upper bound on generated states per `solve` call unless overridden.
///
/// A `solve` call is synchronous and cannot be interrupted, so a pathological
/// configuration degrades into a reported failure instead of blocking the
/// caller indefinitely. Orders of magnitude above any run observed on board
/// sizes 4 through 18.
pub const DEFAULT_MAX_GENERATED: u64 = 1_000_000;

/// Errors produced when configuring a solver.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// A parameter value fell outside the parameter's declared bounds.
    #[error("value {value} for parameter '{name}' is outside [{min}, {max}]")]
    ParamOutOfRange {
        /// Display name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: i64,
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },
}

/// A bounds-checked, host-adjustable solver parameter.
///
/// The meaning depends on the solver: beam width for [`BeamSearch`], tabu
/// memory capacity for [`TabuSearch`]. Bounds are enforced when the value is
/// configured, so solvers read [`SolverParam::value`] unchecked at use time.
#[derive(Clone, Debug)]
pub struct SolverParam {
    /// Whether a host should currently offer this parameter for adjustment.
    pub enabled: bool,
    name: &'static str,
    min: u32,
    max: u32,
    default: u32,
    value: u32,
}

impl SolverParam {
    /// Creates a parameter with `value` preset to `default`.
    ///
    /// # Panics
    /// Panics if `default` lies outside `[min, max]`.
    pub fn new(name: &'static str, min: u32, max: u32, default: u32) -> Self {
        assert!(
            min <= default && default <= max,
            "default {} for '{}' outside [{}, {}]",
            default,
            name,
            min,
            max
        );
        SolverParam {
            enabled: true,
            name,
            min,
            max,
            default,
            value: default,
        }
    }

    /// Display name of the parameter.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Inclusive lower bound.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Inclusive upper bound.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Value restored by [`SolverParam::reset`].
    pub fn default_value(&self) -> u32 {
        self.default
    }

    /// The configured value, always within `[min, max]`.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Sets the value, rejecting anything outside `[min, max]`.
    ///
    /// Rejection happens here, at configuration time; a zero or negative
    /// beam width can never reach a `solve` call.
    pub fn set_value(&mut self, value: i64) -> Result<(), SolverError> {
        if value < i64::from(self.min) || value > i64::from(self.max) {
            return Err(SolverError::ParamOutOfRange {
                name: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        self.value = value as u32;
        Ok(())
    }

    /// Restores the default value.
    pub fn reset(&mut self) {
        self.value = self.default;
    }
}

/// A placement bundled with its aggregate heuristic score.
///
/// States order ascending by score (lower is better, `0` is the goal); ties
/// break on the row vector so the order is total and deterministic. Set
/// membership in visited/tabu collections keys on the placement alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    /// The scored board state.
    pub placement: Placement,
    /// `evaluate_board` result for `placement`.
    pub score: u32,
}

impl SearchState {
    /// Scores an existing placement.
    pub fn scored(placement: Placement, heuristic: &dyn Heuristic) -> Self {
        let score = heuristic.evaluate_board(&placement);
        SearchState { placement, score }
    }

    /// Whether this state is conflict-free.
    pub fn is_goal(&self) -> bool {
        self.score == 0
    }
}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.placement.rows().cmp(other.placement.rows()))
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Generates the state reached by moving one queen of `parent` to `position`.
///
/// Copies the parent, applies the move, and scores the copy. Every call
/// counts once toward a solver's generated-state instrumentation; callers
/// increment their counter alongside each call.
pub fn generate_state(
    parent: &Placement,
    position: (usize, usize),
    heuristic: &dyn Heuristic,
) -> SearchState {
    let placement = parent.with_queen_moved(position.0, position.1);
    SearchState::scored(placement, heuristic)
}

/// The outcome of one `solve` call.
#[derive(Clone, Debug)]
pub struct Solution {
    /// The conflict-free placement, or `None` when the search failed to
    /// converge. Failure is a normal outcome of these incomplete searches.
    pub placement: Option<Placement>,
    /// Wall time spent inside `solve`.
    pub elapsed: Duration,
    /// Number of candidate states generated and scored during the search.
    pub generated_states: u64,
}

impl Solution {
    fn solved(placement: Placement, elapsed: Duration, generated_states: u64) -> Self {
        Solution {
            placement: Some(placement),
            elapsed,
            generated_states,
        }
    }

    fn unsolved(elapsed: Duration, generated_states: u64) -> Self {
        Solution {
            placement: None,
            elapsed,
            generated_states,
        }
    }

    /// Whether the search reached a conflict-free placement.
    pub fn is_solved(&self) -> bool {
        self.placement.is_some()
    }
}

/// Bounded memory of rejected placements with strict oldest-first eviction.
///
/// Insertion order is tracked beside the membership set so that exceeding
/// the capacity always evicts the oldest entry. Re-inserting a current
/// member leaves the memory unchanged.
#[derive(Debug)]
pub struct TabuMemory {
    capacity: usize,
    members: HashSet<Placement>,
    order: VecDeque<Placement>,
}

impl TabuMemory {
    /// Creates an empty memory holding at most `capacity` placements.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "tabu capacity must be at least 1");
        TabuMemory {
            capacity,
            members: HashSet::new(),
            order: VecDeque::new(),
        }
    }

    /// Records a placement, evicting the oldest entry once over capacity.
    pub fn insert(&mut self, placement: Placement) {
        if !self.members.insert(placement.clone()) {
            return;
        }
        self.order.push_back(placement);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
            }
        }
    }

    /// Whether `placement` is currently held.
    pub fn contains(&self, placement: &Placement) -> bool {
        self.members.contains(placement)
    }

    /// Number of placements currently held.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the memory holds nothing.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A local-search algorithm over queen placements.
///
/// Implementations are stateless across calls: frontier, tabu memory, and
/// any scratch structures live inside one `solve` invocation and are
/// discarded on return. The random source is injected so tests can fix the
/// seed; only [`BeamSearch`] consumes randomness.
pub trait Solver {
    /// Display name of the algorithm.
    fn name(&self) -> &'static str;

    /// The solver's tunable parameter with its bounds and default.
    fn default_param(&self) -> SolverParam;

    /// Runs the search from `initial` to completion, success or failure.
    fn solve(
        &self,
        initial: &Placement,
        param: &SolverParam,
        heuristic: &dyn Heuristic,
        rng: &mut dyn RngCore,
    ) -> Solution;
}

/// Beam search: a fixed-width, deduplicated, layer-by-layer frontier.
#[derive(Clone, Debug)]
pub struct BeamSearch {
    max_generated: u64,
}

impl BeamSearch {
    pub fn new() -> Self {
        BeamSearch {
            max_generated: DEFAULT_MAX_GENERATED,
        }
    }

    /// Overrides the generated-state budget, for hosts that want a tighter
    /// bound on one synchronous call.
    pub fn with_max_generated(max_generated: u64) -> Self {
        BeamSearch { max_generated }
    }
}

impl Default for BeamSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for BeamSearch {
    fn name(&self) -> &'static str {
        "Beam Search"
    }

    fn default_param(&self) -> SolverParam {
        SolverParam::new("Beam width", 1, 100, 8)
    }

    fn solve(
        &self,
        initial: &Placement,
        param: &SolverParam,
        heuristic: &dyn Heuristic,
        rng: &mut dyn RngCore,
    ) -> Solution {
        let start = Instant::now();
        let mut generated: u64 = 0;

        if heuristic.evaluate_board(initial) == 0 {
            return Solution::solved(initial.clone(), start.elapsed(), generated);
        }

        let beam_width = param.value() as usize;
        let size = initial.size();

        let mut frontier: BinaryHeap<Reverse<SearchState>> = BinaryHeap::new();
        let mut visited: HashSet<Placement> = HashSet::new();

        // Seed the frontier with random single-queen moves of the initial
        // placement. This is the only point randomness enters the search.
        for _ in 0..beam_width {
            let col = rng.gen_range(0..size);
            let row = rng.gen_range(0..size);

            let state = generate_state(initial, (col, row), heuristic);
            generated += 1;

            if state.is_goal() {
                return Solution::solved(state.placement, start.elapsed(), generated);
            }

            visited.insert(state.placement.clone());
            frontier.push(Reverse(state));
        }

        while !frontier.is_empty() && generated < self.max_generated {
            // Expand the whole layer into a scratch pool of candidates.
            let mut pool: Vec<SearchState> = Vec::new();

            while let Some(Reverse(state)) = frontier.pop() {
                if state.is_goal() {
                    return Solution::solved(state.placement, start.elapsed(), generated);
                }

                for col in 0..size {
                    for value in heuristic.evaluate_column(col, &state.placement) {
                        pool.push(generate_state(&state.placement, value.position, heuristic));
                        generated += 1;
                    }
                }
            }

            // Refill with the best unvisited candidates, ascending by score.
            pool.sort();

            let mut accepted = 0;
            for state in pool {
                if accepted == beam_width {
                    break;
                }
                if visited.contains(&state.placement) {
                    continue;
                }
                visited.insert(state.placement.clone());
                frontier.push(Reverse(state));
                accepted += 1;
            }

            debug!(
                "beam layer refilled: {} of {} slots, {} states generated",
                accepted, beam_width, generated
            );
        }

        Solution::unsolved(start.elapsed(), generated)
    }
}

/// Tabu search: strict-improvement descent with bounded-memory
/// diversification out of local optima.
#[derive(Clone, Debug)]
pub struct TabuSearch {
    max_generated: u64,
}

impl TabuSearch {
    pub fn new() -> Self {
        TabuSearch {
            max_generated: DEFAULT_MAX_GENERATED,
        }
    }

    /// Overrides the generated-state budget, for hosts that want a tighter
    /// bound on one synchronous call.
    pub fn with_max_generated(max_generated: u64) -> Self {
        TabuSearch { max_generated }
    }
}

impl Default for TabuSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Pops the best candidate whose placement is not currently tabu.
///
/// Entries may have been pushed before their placement was recorded in the
/// memory; such stale entries are discarded here so a tabu placement can
/// never be re-accepted until evicted.
fn pop_non_tabu(
    frontier: &mut BinaryHeap<Reverse<SearchState>>,
    tabu: &TabuMemory,
) -> Option<SearchState> {
    while let Some(Reverse(state)) = frontier.pop() {
        if !tabu.contains(&state.placement) {
            return Some(state);
        }
    }
    None
}

impl Solver for TabuSearch {
    fn name(&self) -> &'static str {
        "Tabu Search"
    }

    fn default_param(&self) -> SolverParam {
        SolverParam::new("Tabu capacity", 1, 1000, 50)
    }

    fn solve(
        &self,
        initial: &Placement,
        param: &SolverParam,
        heuristic: &dyn Heuristic,
        _rng: &mut dyn RngCore,
    ) -> Solution {
        let start = Instant::now();
        let mut generated: u64 = 0;
        let size = initial.size();

        let mut best_fit = SearchState::scored(initial.clone(), heuristic);

        let mut tabu = TabuMemory::new(param.value() as usize);
        tabu.insert(best_fit.placement.clone());

        let mut frontier: BinaryHeap<Reverse<SearchState>> = BinaryHeap::new();

        while !best_fit.is_goal() && generated < self.max_generated {
            // Expand every single-queen move of the current state; anything
            // currently tabu is not regenerated.
            for col in 0..size {
                for value in heuristic.evaluate_column(col, &best_fit.placement) {
                    let candidate = generate_state(&best_fit.placement, value.position, heuristic);
                    generated += 1;

                    if tabu.contains(&candidate.placement) {
                        continue;
                    }
                    frontier.push(Reverse(candidate));
                }
            }

            let local_best = match pop_non_tabu(&mut frontier, &tabu) {
                Some(state) => state,
                None => break,
            };

            if local_best.score < best_fit.score {
                best_fit = local_best;
            } else {
                // Local optimum: reject the best candidate, remember it, and
                // move to the next viable one regardless of its score.
                tabu.insert(local_best.placement);

                let next_best = match pop_non_tabu(&mut frontier, &tabu) {
                    Some(state) => state,
                    None => break,
                };

                debug!(
                    "diversifying from score {} to {}, tabu holds {}",
                    best_fit.score,
                    next_best.score,
                    tabu.len()
                );
                best_fit = next_best;
            }
        }

        if best_fit.is_goal() {
            Solution::solved(best_fit.placement, start.elapsed(), generated)
        } else {
            Solution::unsolved(start.elapsed(), generated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{GlobalThreats, LocalThreats};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn solved_4() -> Placement {
        Placement::new(vec![1, 3, 0, 2]).unwrap()
    }

    #[test]
    fn test_param_accepts_in_range_values() {
        let mut param = SolverParam::new("Beam width", 1, 100, 8);
        assert_eq!(param.value(), 8);

        param.set_value(1).unwrap();
        assert_eq!(param.value(), 1);

        param.set_value(100).unwrap();
        assert_eq!(param.value(), 100);

        param.reset();
        assert_eq!(param.value(), param.default_value());
    }

    #[test]
    fn test_param_rejects_zero_and_negative_beam_width() {
        let beam = BeamSearch::new();
        let mut param = beam.default_param();

        assert!(matches!(
            param.set_value(0),
            Err(SolverError::ParamOutOfRange { value: 0, .. })
        ));
        assert!(matches!(
            param.set_value(-3),
            Err(SolverError::ParamOutOfRange { value: -3, .. })
        ));
        assert!(matches!(
            param.set_value(101),
            Err(SolverError::ParamOutOfRange { value: 101, .. })
        ));

        // A rejected value leaves the previous configuration in place.
        assert_eq!(param.value(), 8);
    }

    #[test]
    fn test_default_params_are_within_bounds() {
        let solvers: Vec<Box<dyn Solver>> = vec![Box::new(BeamSearch::new()), Box::new(TabuSearch::new())];
        for solver in &solvers {
            let param = solver.default_param();
            assert!(param.min() >= 1, "{} allows a zero parameter", solver.name());
            assert!(param.min() <= param.default_value());
            assert!(param.default_value() <= param.max());
        }
    }

    #[test]
    fn test_tabu_memory_evicts_oldest_first() {
        let a = Placement::new(vec![0, 0]).unwrap();
        let b = Placement::new(vec![0, 1]).unwrap();
        let c = Placement::new(vec![1, 0]).unwrap();

        let mut memory = TabuMemory::new(2);
        memory.insert(a.clone());
        memory.insert(b.clone());
        assert!(memory.contains(&a));
        assert!(memory.contains(&b));

        memory.insert(c.clone());
        assert!(!memory.contains(&a), "oldest entry must be evicted");
        assert!(memory.contains(&b));
        assert!(memory.contains(&c));
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_tabu_memory_ignores_duplicate_inserts() {
        let a = Placement::new(vec![0, 0]).unwrap();
        let b = Placement::new(vec![0, 1]).unwrap();

        let mut memory = TabuMemory::new(2);
        memory.insert(a.clone());
        memory.insert(a.clone());
        memory.insert(b.clone());

        assert_eq!(memory.len(), 2);
        // The duplicate did not refresh a's age: inserting one more entry
        // still evicts a first.
        memory.insert(Placement::new(vec![1, 1]).unwrap());
        assert!(!memory.contains(&a));
        assert!(memory.contains(&b));
    }

    #[test]
    fn test_search_state_orders_by_score_then_rows() {
        let heuristic = GlobalThreats;
        let low = SearchState::scored(solved_4(), &heuristic);
        let high = SearchState::scored(Placement::new((0..4).collect()).unwrap(), &heuristic);

        assert!(low < high);

        // Equal scores fall back to the row vectors, keeping the order total.
        let a = SearchState {
            placement: Placement::new(vec![0, 2]).unwrap(),
            score: 3,
        };
        let b = SearchState {
            placement: Placement::new(vec![1, 0]).unwrap(),
            score: 3,
        };
        assert!(a < b);
    }

    #[test]
    fn test_generate_state_moves_one_queen_and_scores() {
        let parent = solved_4();
        let state = generate_state(&parent, (0, 3), &GlobalThreats);

        assert_eq!(state.placement.rows(), &[3, 3, 0, 2]);
        assert_eq!(state.score, 1);
        assert_eq!(parent.rows(), &[1, 3, 0, 2], "parent must not alias the child");
    }

    #[test]
    fn test_beam_returns_solved_input_with_zero_generated_states() {
        let beam = BeamSearch::new();
        let param = beam.default_param();
        let mut rng = SmallRng::seed_from_u64(0);

        let solution = beam.solve(&solved_4(), &param, &GlobalThreats, &mut rng);
        assert_eq!(solution.placement, Some(solved_4()));
        assert_eq!(solution.generated_states, 0);
    }

    #[test]
    fn test_beam_is_reproducible_for_a_fixed_seed() {
        let beam = BeamSearch::new();
        let param = beam.default_param();
        let initial = Placement::new((0..8).collect()).unwrap();

        let mut first = SmallRng::seed_from_u64(42);
        let mut second = SmallRng::seed_from_u64(42);

        let a = beam.solve(&initial, &param, &GlobalThreats, &mut first);
        let b = beam.solve(&initial, &param, &GlobalThreats, &mut second);

        assert_eq!(a.placement, b.placement);
        assert_eq!(a.generated_states, b.generated_states);
    }

    #[test]
    fn test_beam_success_rescored_to_zero_across_sizes() {
        let beam = BeamSearch::with_max_generated(40_000);
        let param = beam.default_param();

        for size in 4..=16 {
            let initial = Placement::new((0..size).collect()).unwrap();
            let mut rng = SmallRng::seed_from_u64(size as u64);

            let solution = beam.solve(&initial, &param, &GlobalThreats, &mut rng);
            assert!(solution.generated_states <= 40_000 + (16 * 16 * 16));

            if let Some(placement) = solution.placement {
                assert_eq!(
                    GlobalThreats.evaluate_board(&placement),
                    0,
                    "reported success must rescore to zero at size {}",
                    size
                );
                assert_eq!(placement.size(), size);
            }
        }
    }

    #[test]
    fn test_beam_terminates_on_the_identity_placement() {
        let beam = BeamSearch::with_max_generated(40_000);
        let mut param = beam.default_param();
        param.set_value(8).unwrap();

        let initial = Placement::new((0..8).collect()).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);

        let before = GlobalThreats.evaluate_board(&initial);
        assert!(before > 0);

        let solution = beam.solve(&initial, &param, &GlobalThreats, &mut rng);
        assert!(solution.generated_states >= 8, "seeding alone generates beam-width states");
        if let Some(placement) = &solution.placement {
            assert_eq!(GlobalThreats.evaluate_board(placement), 0);
        }
    }

    #[test]
    fn test_tabu_returns_solved_input_with_zero_generated_states() {
        let tabu = TabuSearch::new();
        let param = tabu.default_param();
        let mut rng = SmallRng::seed_from_u64(0);

        let solution = tabu.solve(&solved_4(), &param, &GlobalThreats, &mut rng);
        assert_eq!(solution.placement, Some(solved_4()));
        assert_eq!(solution.generated_states, 0);
    }

    #[test]
    fn test_tabu_success_rescored_to_zero_across_sizes() {
        let tabu = TabuSearch::with_max_generated(40_000);
        let param = tabu.default_param();

        for size in 4..=10 {
            let mut rng = SmallRng::seed_from_u64(100 + size as u64);
            let initial = Placement::random(size, &mut rng);

            let solution = tabu.solve(&initial, &param, &GlobalThreats, &mut rng);
            if let Some(placement) = solution.placement {
                assert_eq!(
                    GlobalThreats.evaluate_board(&placement),
                    0,
                    "reported success must rescore to zero at size {}",
                    size
                );
            }
        }
    }

    #[test]
    fn test_tabu_works_under_the_local_heuristic_too() {
        let tabu = TabuSearch::with_max_generated(40_000);
        let param = tabu.default_param();
        let mut rng = SmallRng::seed_from_u64(11);
        let initial = Placement::new((0..8).collect()).unwrap();

        let solution = tabu.solve(&initial, &param, &LocalThreats, &mut rng);
        if let Some(placement) = solution.placement {
            assert_eq!(LocalThreats.evaluate_board(&placement), 0);
        }
    }
}
