//! Conflict-scoring heuristics for candidate queen moves.
//!
//! The two variants share one interface so the solvers stay
//! heuristic-agnostic:
//! - `LocalThreats` scores a square by how many other queens threaten it
//!   directly; the whole-board score sums these per-queen counts and so
//!   counts every conflicting pair twice, once per queen.
//! - `GlobalThreats` scores a square by the total number of threatening
//!   unordered pairs the whole board would contain if that column's queen
//!   moved there; every pair is counted exactly once.
//!
//! Interactive hosts use the same interface to render diagnostic overlays:
//! `evaluate_position` for a hovered square, `evaluate_column` for a full
//! column of alternatives.
use crate::engine::{threatens, Placement};

/// The score a heuristic assigned to one candidate square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeuristicValue {
    /// The scored `(column, row)` square.
    pub position: (usize, usize),
    /// Non-negative conflict count; `0` means locally conflict-free.
    pub score: u32,
}

/// Scoring interface consumed by the solvers and by diagnostic overlays.
pub trait Heuristic {
    /// Display name of this heuristic.
    fn name(&self) -> &'static str;

    /// Scores the hypothetical move of `candidate.0`'s queen to `candidate`.
    ///
    /// The queen currently occupying the candidate's column is treated as
    /// relocated to the candidate square; it never threatens itself.
    fn evaluate_position(&self, candidate: (usize, usize), placement: &Placement) -> HeuristicValue;

    /// Aggregate conflict score of the whole placement; `0` is the goal.
    fn evaluate_board(&self, placement: &Placement) -> u32;

    /// Scores every row alternative for the queen in column `col`.
    ///
    /// Returns one entry per row, in row order, each produced by
    /// [`Heuristic::evaluate_position`]. Solvers use this to enumerate all
    /// single-queen moves for one column.
    fn evaluate_column(&self, col: usize, placement: &Placement) -> Vec<HeuristicValue> {
        (0..placement.size())
            .map(|row| self.evaluate_position((col, row), placement))
            .collect()
    }
}

/// Per-queen threat counting.
///
/// The score of a square is the number of *other* queens that would threaten
/// a queen standing there. The board score is the sum over all queens, which
/// double-counts each conflicting pair.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalThreats;

impl Heuristic for LocalThreats {
    fn name(&self) -> &'static str {
        "Local Threats"
    }

    fn evaluate_position(&self, candidate: (usize, usize), placement: &Placement) -> HeuristicValue {
        let score = (0..placement.size())
            .filter(|&col| threatens(placement.queen(col), candidate))
            .count() as u32;
        HeuristicValue {
            position: candidate,
            score,
        }
    }

    fn evaluate_board(&self, placement: &Placement) -> u32 {
        (0..placement.size())
            .map(|col| self.evaluate_position(placement.queen(col), placement).score)
            .sum()
    }
}

/// Whole-board pair counting.
///
/// The score of a square is the total number of threatening unordered pairs
/// the board would contain with that column's queen relocated to the square.
/// Evaluating any one queen's current square therefore already yields the
/// whole-board score.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalThreats;

impl Heuristic for GlobalThreats {
    fn name(&self) -> &'static str {
        "Global Threats"
    }

    fn evaluate_position(&self, candidate: (usize, usize), placement: &Placement) -> HeuristicValue {
        let target_col = candidate.0;
        let size = placement.size();
        let mut pairs = 0;

        for i in 0..size {
            let a = if i == target_col {
                candidate
            } else {
                placement.queen(i)
            };

            for j in (i + 1)..size {
                let b = if j == target_col {
                    candidate
                } else {
                    placement.queen(j)
                };

                if threatens(a, b) {
                    pairs += 1;
                }
            }
        }

        HeuristicValue {
            position: candidate,
            score: pairs,
        }
    }

    fn evaluate_board(&self, placement: &Placement) -> u32 {
        self.evaluate_position(placement.queen(0), placement).score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_known_solution_scores_zero_under_both_variants() {
        let solved = Placement::new(vec![1, 3, 0, 2]).unwrap();
        assert_eq!(LocalThreats.evaluate_board(&solved), 0);
        assert_eq!(GlobalThreats.evaluate_board(&solved), 0);
    }

    #[test]
    fn test_main_diagonal_pair_counts() {
        // All eight queens share the main diagonal: C(8, 2) = 28 pairs.
        let diagonal = Placement::new((0..8).collect()).unwrap();
        assert_eq!(GlobalThreats.evaluate_board(&diagonal), 28);
        assert_eq!(LocalThreats.evaluate_board(&diagonal), 56);
    }

    #[test]
    fn test_local_board_score_is_twice_the_global_pair_count() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let placement = Placement::random(8, &mut rng);
            assert_eq!(
                LocalThreats.evaluate_board(&placement),
                2 * GlobalThreats.evaluate_board(&placement),
                "pair double-counting mismatch for {:?}",
                placement.rows()
            );
        }
    }

    #[test]
    fn test_local_position_counts_only_other_queens() {
        // Two queens on the same row threaten each other once each.
        let placement = Placement::new(vec![0, 0]).unwrap();
        let value = LocalThreats.evaluate_position((0, 0), &placement);
        assert_eq!(value.score, 1);
        assert_eq!(value.position, (0, 0));
    }

    #[test]
    fn test_global_position_substitutes_the_candidate_column() {
        // Solved board; moving column 0's queen to row 3 leaves queens at
        // (0,3) (1,3) (2,0) (3,2). The only threatening pair is the shared
        // row between columns 0 and 1.
        let solved = Placement::new(vec![1, 3, 0, 2]).unwrap();
        let value = GlobalThreats.evaluate_position((0, 3), &solved);
        assert_eq!(value.score, 1);

        // Evaluating the queen's current square is the plain board score.
        let unchanged = GlobalThreats.evaluate_position((0, 1), &solved);
        assert_eq!(unchanged.score, 0);
    }

    #[test]
    fn test_evaluate_column_covers_every_row_in_order() {
        let placement = Placement::new(vec![0, 2, 4, 1, 3]).unwrap();
        for heuristic in [&LocalThreats as &dyn Heuristic, &GlobalThreats] {
            for col in 0..placement.size() {
                let values = heuristic.evaluate_column(col, &placement);
                assert_eq!(values.len(), placement.size());
                for (row, value) in values.iter().enumerate() {
                    assert_eq!(value.position, (col, row));
                }
            }
        }
    }
}
