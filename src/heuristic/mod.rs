//! Admissible distance estimates for the sliding-tile puzzle.
//!
//! All three heuristics are evaluated against a fixed goal through a
//! `GoalLookup`, a per-tile table of target coordinates built once per
//! solve. Manhattan and linear-conflict never overestimate the true
//! distance and change by at most one across a single slide, which is
//! what the search's early-termination rule relies on.

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::error::PuzzleError;

/// Target coordinates of every tile value in a fixed goal board.
///
/// `row[t]` and `col[t]` give the goal position of tile value `t`.
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct GoalLookup {
    size: usize,
    row: Box<[u8]>,
    col: Box<[u8]>,
}

impl GoalLookup {
    /// Build the lookup tables from a goal board.
    pub fn new(goal: &Board) -> Self {
        let size = goal.size();
        let mut row = vec![0u8; size * size].into_boxed_slice();
        let mut col = vec![0u8; size * size].into_boxed_slice();
        for (index, &tile) in goal.tiles().iter().enumerate() {
            let (r, c) = goal.coords(index);
            row[tile as usize] = r as u8;
            col[tile as usize] = c as u8;
        }
        GoalLookup { size, row, col }
    }

    /// Grid side length of the goal this lookup was built from.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Goal row of tile value `tile`.
    pub fn row(&self, tile: u8) -> usize {
        self.row[tile as usize] as usize
    }

    /// Goal column of tile value `tile`.
    pub fn col(&self, tile: u8) -> usize {
        self.col[tile as usize] as usize
    }

    /// Goal flat index of tile value `tile`.
    pub fn index(&self, tile: u8) -> usize {
        self.row(tile) * self.size + self.col(tile)
    }
}

/// Heuristic function selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Sum of per-tile grid distances to the goal position.
    #[default]
    Manhattan,
    /// Number of tiles away from their goal position.
    Misplaced,
    /// Manhattan plus 2 per pair of tiles blocking each other in their
    /// own goal row or column.
    LinearConflict,
}

impl Heuristic {
    /// Estimate the remaining distance from `board` to the goal.
    pub fn evaluate(&self, board: &Board, lookup: &GoalLookup) -> u32 {
        match self {
            Heuristic::Manhattan => manhattan(board, lookup),
            Heuristic::Misplaced => misplaced(board, lookup),
            Heuristic::LinearConflict => {
                manhattan(board, lookup) + 2 * conflict_pairs(board, lookup)
            }
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "manhattan"),
            Heuristic::Misplaced => write!(f, "misplaced"),
            Heuristic::LinearConflict => write!(f, "linear"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "misplaced" => Ok(Heuristic::Misplaced),
            "linear" | "linear-conflict" => Ok(Heuristic::LinearConflict),
            _ => Err(PuzzleError::InvalidHeuristic(s.to_string())),
        }
    }
}

fn manhattan(board: &Board, lookup: &GoalLookup) -> u32 {
    let mut total = 0u32;
    for (index, &tile) in board.tiles().iter().enumerate() {
        if tile == 0 {
            continue;
        }
        let (r, c) = board.coords(index);
        total += r.abs_diff(lookup.row(tile)) as u32;
        total += c.abs_diff(lookup.col(tile)) as u32;
    }
    total
}

fn misplaced(board: &Board, lookup: &GoalLookup) -> u32 {
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(index, &tile)| tile != 0 && lookup.index(tile) != index)
        .count() as u32
}

/// Count pairs of tiles that sit in their shared goal line in inverted
/// order. Each such pair forces at least two extra moves on top of the
/// Manhattan distance.
fn conflict_pairs(board: &Board, lookup: &GoalLookup) -> u32 {
    let size = board.size();
    let mut pairs = 0u32;

    for r in 0..size {
        // Tiles in row r whose goal row is also r, in column order.
        let mut goal_cols: Vec<usize> = Vec::new();
        for c in 0..size {
            let tile = board.tile_at(r, c);
            if tile != 0 && lookup.row(tile) == r {
                goal_cols.push(lookup.col(tile));
            }
        }
        pairs += inversions_in(&goal_cols);
    }

    for c in 0..size {
        let mut goal_rows: Vec<usize> = Vec::new();
        for r in 0..size {
            let tile = board.tile_at(r, c);
            if tile != 0 && lookup.col(tile) == c {
                goal_rows.push(lookup.row(tile));
            }
        }
        pairs += inversions_in(&goal_rows);
    }

    pairs
}

fn inversions_in(positions: &[usize]) -> u32 {
    let mut count = 0u32;
    for i in 0..positions.len() {
        for j in i + 1..positions.len() {
            if positions[i] > positions[j] {
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MOVES;

    fn snail_3x3() -> Board {
        Board::from_tiles(3, vec![1, 2, 3, 8, 0, 4, 7, 6, 5]).unwrap()
    }

    fn sorted_goal_3x3() -> Board {
        Board::from_tiles(3, vec![1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap()
    }

    #[test]
    fn test_goal_lookup_positions() {
        let goal = sorted_goal_3x3();
        let lookup = GoalLookup::new(&goal);
        assert_eq!((lookup.row(1), lookup.col(1)), (0, 0));
        assert_eq!((lookup.row(5), lookup.col(5)), (1, 1));
        assert_eq!((lookup.row(8), lookup.col(8)), (2, 1));
        assert_eq!(lookup.index(4), 3);
    }

    #[test]
    fn test_all_heuristics_zero_at_goal() {
        for goal in [snail_3x3(), sorted_goal_3x3()] {
            let lookup = GoalLookup::new(&goal);
            for h in [
                Heuristic::Manhattan,
                Heuristic::Misplaced,
                Heuristic::LinearConflict,
            ] {
                assert_eq!(h.evaluate(&goal, &lookup), 0, "{h} at goal");
            }
        }
    }

    #[test]
    fn test_manhattan_known_value() {
        let goal = sorted_goal_3x3();
        let lookup = GoalLookup::new(&goal);
        // 8 and 0 swapped relative to the goal: 8 is one step away.
        let board = Board::from_tiles(3, vec![1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
        assert_eq!(Heuristic::Manhattan.evaluate(&board, &lookup), 1);

        // Reversed first row: 3 and 1 are each two columns off.
        let board = Board::from_tiles(3, vec![3, 2, 1, 4, 5, 6, 7, 8, 0]).unwrap();
        assert_eq!(Heuristic::Manhattan.evaluate(&board, &lookup), 4);
    }

    #[test]
    fn test_misplaced_known_value() {
        let goal = sorted_goal_3x3();
        let lookup = GoalLookup::new(&goal);
        let board = Board::from_tiles(3, vec![2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        assert_eq!(Heuristic::Misplaced.evaluate(&board, &lookup), 2);
    }

    #[test]
    fn test_linear_conflict_counts_pairs() {
        let goal = sorted_goal_3x3();
        let lookup = GoalLookup::new(&goal);
        // 2 and 1 are both in their goal row but inverted: one pair.
        let board = Board::from_tiles(3, vec![2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        let manhattan = Heuristic::Manhattan.evaluate(&board, &lookup);
        assert_eq!(
            Heuristic::LinearConflict.evaluate(&board, &lookup),
            manhattan + 2
        );

        // Fully reversed goal row: three inverted pairs.
        let board = Board::from_tiles(3, vec![3, 2, 1, 4, 5, 6, 7, 8, 0]).unwrap();
        let manhattan = Heuristic::Manhattan.evaluate(&board, &lookup);
        assert_eq!(
            Heuristic::LinearConflict.evaluate(&board, &lookup),
            manhattan + 6
        );
    }

    #[test]
    fn test_column_conflicts_detected() {
        let goal = sorted_goal_3x3();
        let lookup = GoalLookup::new(&goal);
        // 4 and 1 share their goal column 0 and are inverted vertically.
        let board = Board::from_tiles(3, vec![4, 2, 3, 1, 5, 6, 7, 8, 0]).unwrap();
        let manhattan = Heuristic::Manhattan.evaluate(&board, &lookup);
        assert_eq!(
            Heuristic::LinearConflict.evaluate(&board, &lookup),
            manhattan + 2
        );
    }

    #[test]
    fn test_linear_conflict_dominates_manhattan() {
        let goal = snail_3x3();
        let lookup = GoalLookup::new(&goal);
        let mut board = sorted_goal_3x3();
        // Walk a few boards and compare on each.
        for _ in 0..20 {
            for mv in MOVES {
                if let Some(next) = board.slide(mv) {
                    board = next;
                    break;
                }
            }
            assert!(
                Heuristic::LinearConflict.evaluate(&board, &lookup)
                    >= Heuristic::Manhattan.evaluate(&board, &lookup)
            );
        }
    }

    #[test]
    fn test_manhattan_changes_by_at_most_one_per_slide() {
        let goal = snail_3x3();
        let lookup = GoalLookup::new(&goal);
        let board = sorted_goal_3x3();
        for mv in MOVES {
            let Some(next) = board.slide(mv) else {
                continue;
            };
            let before = Heuristic::Manhattan.evaluate(&board, &lookup);
            let after = Heuristic::Manhattan.evaluate(&next, &lookup);
            assert!(before.abs_diff(after) <= 1);
        }
    }

    #[test]
    fn test_heuristic_from_str() {
        assert_eq!(
            "manhattan".parse::<Heuristic>().unwrap(),
            Heuristic::Manhattan
        );
        assert_eq!(
            "misplaced".parse::<Heuristic>().unwrap(),
            Heuristic::Misplaced
        );
        assert_eq!(
            "linear".parse::<Heuristic>().unwrap(),
            Heuristic::LinearConflict
        );
        assert!("euclid".parse::<Heuristic>().is_err());
    }

    #[test]
    fn test_heuristic_display() {
        assert_eq!(format!("{}", Heuristic::Manhattan), "manhattan");
        assert_eq!(format!("{}", Heuristic::Misplaced), "misplaced");
        assert_eq!(format!("{}", Heuristic::LinearConflict), "linear");
    }
}
