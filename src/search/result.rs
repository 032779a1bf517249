//! Solve results and search statistics.

use std::sync::Arc;
use std::time::Duration;

use crate::board::Board;

/// Counters describing a finished search.
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Nodes popped from any open set.
    pub states_selected: u64,
    /// High-water mark of open plus closed nodes.
    pub max_states_in_memory: u64,
    /// Number of moves in the returned path.
    pub solution_length: u32,
    /// Wall-clock time spent searching.
    pub elapsed_time: Duration,
}

/// A solved puzzle: the board sequence from the initial state to the
/// goal, plus search statistics.
///
/// The path holds its boards by shared handle; parent links inside the
/// path keep every referenced predecessor alive for as long as the
/// solution exists.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Boards from the initial state to the goal, in move order.
    pub path: Vec<Arc<Board>>,
    pub statistics: SearchStatistics,
}

impl Solution {
    /// Reconstruct the path by walking parent references back from the
    /// goal node.
    pub(crate) fn from_goal_node(goal: Arc<Board>, mut statistics: SearchStatistics) -> Self {
        let mut path = Vec::new();
        let mut current = Some(goal);
        while let Some(node) = current {
            current = node.parent.clone();
            path.push(node);
        }
        path.reverse();
        statistics.solution_length = (path.len() - 1) as u32;
        Solution { path, statistics }
    }

    /// The initial board of the path.
    pub fn initial(&self) -> &Board {
        self.path.first().expect("a solution path is never empty")
    }

    /// The goal board of the path.
    pub fn goal(&self) -> &Board {
        self.path.last().expect("a solution path is never empty")
    }
}
