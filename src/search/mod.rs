//! Best-first search over board states.
//!
//! This module provides the solver entry point and the pieces shared
//! by its two engines:
//! - Sequential: classical A*/UCS/greedy with lazy duplicate handling
//! - Parallel: per-worker queues with batched work stealing, sharded
//!   duplicate maps, and an optimality-preserving early stop

pub mod config;
mod parallel;
mod queue;
pub mod result;
mod sequential;

pub use config::{SearchMode, SolverConfig};
pub use result::{SearchStatistics, Solution};

use std::sync::Arc;
use std::time::Instant;

use crate::board::{Board, MOVES};
use crate::heuristic::{GoalLookup, Heuristic};

/// Find a shortest path (under `astar`/`ucs`) from `initial` to `goal`.
///
/// Takes ownership of `initial`; `goal` and `lookup` must share its
/// side length. Returns `None` exactly when no path exists, which the
/// usual solvability pre-check rules out up front.
pub fn solve(
    initial: Board,
    goal: &Board,
    lookup: &GoalLookup,
    config: &SolverConfig,
) -> Option<Solution> {
    debug_assert_eq!(initial.size(), goal.size());
    debug_assert_eq!(initial.size(), lookup.size());

    if config.verbose {
        println!(
            "Searching: mode={} heuristic={} threads={}",
            config.mode, config.heuristic, config.threads
        );
    }

    let start = Instant::now();
    let mut solution = if config.threads <= 1 {
        sequential::search(initial, goal, lookup, config.heuristic, config.mode)
    } else {
        parallel::search(initial, goal, lookup, config)
    };
    let elapsed = start.elapsed();
    if let Some(ref mut solution) = solution {
        solution.statistics.elapsed_time = elapsed;
    }

    if config.verbose {
        match &solution {
            Some(solution) => println!(
                "Search finished in {:.2?}: {} states selected, path length {}",
                elapsed,
                solution.statistics.states_selected,
                solution.statistics.solution_length
            ),
            None => println!("Search exhausted in {elapsed:.2?} without finding a path"),
        }
    }
    solution
}

/// Set the cost fields of the initial node for the given mode.
pub(crate) fn initial_costs(
    initial: &mut Board,
    lookup: &GoalLookup,
    heuristic: Heuristic,
    mode: SearchMode,
) {
    let h = match mode {
        SearchMode::Ucs => 0,
        _ => heuristic.evaluate(initial, lookup),
    };
    initial.g_cost = 0;
    initial.h_cost = h;
    initial.f_cost = mode.priority(0, h);
    initial.parent = None;
}

/// Generate the successors of a node: one board per legal slide of the
/// empty cell, in the fixed up/down/left/right order, with costs set
/// for the given mode and the parent reference pointing at `node`.
pub(crate) fn expand(
    node: &Arc<Board>,
    lookup: &GoalLookup,
    heuristic: Heuristic,
    mode: SearchMode,
) -> Vec<Board> {
    let mut successors = Vec::with_capacity(4);
    for mv in MOVES {
        let Some(mut successor) = node.slide(mv) else {
            continue;
        };
        let g = node.g_cost + 1;
        let h = match mode {
            SearchMode::Ucs => 0,
            _ => heuristic.evaluate(&successor, lookup),
        };
        successor.g_cost = g;
        successor.h_cost = h;
        successor.f_cost = mode.priority(g, h);
        successor.parent = Some(Arc::clone(node));
        successors.push(successor);
    }
    successors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::snail_goal;

    fn center_node() -> (Arc<Board>, GoalLookup) {
        let goal = snail_goal(3).unwrap();
        let lookup = GoalLookup::new(&goal);
        let mut board = Board::from_tiles(3, vec![1, 2, 3, 0, 8, 4, 7, 6, 5]).unwrap();
        initial_costs(&mut board, &lookup, Heuristic::Manhattan, SearchMode::AStar);
        (Arc::new(board), lookup)
    }

    #[test]
    fn test_expand_produces_legal_successors() {
        let (node, lookup) = center_node();
        let successors = expand(&node, &lookup, Heuristic::Manhattan, SearchMode::AStar);
        // Empty at (1, 0): up, down, and right are legal.
        assert_eq!(successors.len(), 3);
        for successor in &successors {
            assert_eq!(successor.g_cost, node.g_cost + 1);
            assert_eq!(successor.f_cost, successor.g_cost + successor.h_cost);
            assert_eq!(successor.parent.as_deref(), Some(&*node));
        }
    }

    #[test]
    fn test_expand_order_is_fixed() {
        let (node, lookup) = center_node();
        let successors = expand(&node, &lookup, Heuristic::Manhattan, SearchMode::AStar);
        // up first, then down, then right.
        assert_eq!(successors[0].empty_index(), 0);
        assert_eq!(successors[1].empty_index(), 6);
        assert_eq!(successors[2].empty_index(), 4);
    }

    #[test]
    fn test_expand_ucs_zeroes_heuristic() {
        let (node, lookup) = center_node();
        for successor in expand(&node, &lookup, Heuristic::Manhattan, SearchMode::Ucs) {
            assert_eq!(successor.h_cost, 0);
            assert_eq!(successor.f_cost, successor.g_cost);
        }
    }

    #[test]
    fn test_expand_greedy_priority_is_heuristic() {
        let (node, lookup) = center_node();
        for successor in expand(&node, &lookup, Heuristic::Manhattan, SearchMode::Greedy) {
            assert_eq!(successor.f_cost, successor.h_cost);
        }
    }

    #[test]
    fn test_solve_dispatches_sequential_and_parallel() {
        let goal = snail_goal(3).unwrap();
        let lookup = GoalLookup::new(&goal);
        let tiles = vec![1, 2, 3, 0, 8, 4, 7, 6, 5];

        for threads in [1, 4] {
            let config = SolverConfig::default().with_threads(threads);
            let initial = Board::from_tiles(3, tiles.clone()).unwrap();
            let solution = solve(initial, &goal, &lookup, &config).unwrap();
            assert_eq!(solution.statistics.solution_length, 1, "{threads} threads");
        }
    }
}
