//! Single-threaded best-first search.
//!
//! Classical A* (or UCS/greedy, depending on the mode) with lazy
//! duplicate handling: instead of a decrease-key operation, stale queue
//! entries are discarded when popped if a cheaper path to the same
//! state has been recorded since. The first goal node popped is the
//! answer; with a consistent heuristic its cost is optimal.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::Board;
use crate::heuristic::{GoalLookup, Heuristic};
use crate::search::config::SearchMode;
use crate::search::queue::OpenSet;
use crate::search::result::{SearchStatistics, Solution};
use crate::search::{expand, initial_costs};

pub(crate) fn search(
    initial: Board,
    goal: &Board,
    lookup: &GoalLookup,
    heuristic: Heuristic,
    mode: SearchMode,
) -> Option<Solution> {
    let mut open = OpenSet::new();
    let mut closed: FxHashSet<Box<[u8]>> = FxHashSet::default();
    let mut best_g: FxHashMap<Box<[u8]>, u32> = FxHashMap::default();

    let mut statistics = SearchStatistics::default();

    let mut initial = initial;
    initial_costs(&mut initial, lookup, heuristic, mode);
    best_g.insert(initial.key(), 0);
    open.push(Arc::new(initial));
    statistics.max_states_in_memory = 1;

    while let Some(node) = open.pop() {
        statistics.states_selected += 1;

        // A cheaper path to this state has been queued since this entry
        // was pushed; the entry is stale.
        if let Some(&known) = best_g.get(node.tiles()) {
            if known < node.g_cost {
                continue;
            }
        }

        if *node == *goal {
            return Some(Solution::from_goal_node(node, statistics));
        }

        if !closed.insert(node.key()) {
            continue;
        }

        for successor in expand(&node, lookup, heuristic, mode) {
            match best_g.get(successor.tiles()) {
                Some(&known) if successor.g_cost >= known => continue,
                _ => {
                    best_g.insert(successor.key(), successor.g_cost);
                    open.push(Arc::new(successor));
                }
            }
        }

        let live = (open.len() + closed.len()) as u64;
        statistics.max_states_in_memory = statistics.max_states_in_memory.max(live);
    }

    None
}
