//! Solver configuration types.

use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;
use crate::heuristic::Heuristic;

/// Search algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Best-first on g + h; optimal with an admissible heuristic.
    #[default]
    AStar,
    /// Uniform-cost search: best-first on g alone, ignoring the
    /// heuristic. Optimal but expands far more states.
    Ucs,
    /// Best-first on h alone. Fast but not optimal.
    Greedy,
}

impl SearchMode {
    /// Composite priority of a node with the given costs.
    pub fn priority(self, g: u32, h: u32) -> u32 {
        match self {
            SearchMode::AStar => g + h,
            SearchMode::Ucs => g,
            SearchMode::Greedy => h,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::AStar => write!(f, "astar"),
            SearchMode::Ucs => write!(f, "ucs"),
            SearchMode::Greedy => write!(f, "greedy"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "astar" | "a*" => Ok(SearchMode::AStar),
            "ucs" => Ok(SearchMode::Ucs),
            "greedy" => Ok(SearchMode::Greedy),
            _ => Err(PuzzleError::InvalidSearchMode(s.to_string())),
        }
    }
}

/// Configuration for a solve run.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Search algorithm.
    pub mode: SearchMode,
    /// Heuristic function.
    pub heuristic: Heuristic,
    /// Number of worker threads; 1 selects the sequential solver.
    pub threads: usize,
    /// Print a one-line summary of the run before searching.
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            heuristic: Heuristic::default(),
            threads: num_cpus::get(),
            verbose: false,
        }
    }
}

impl SolverConfig {
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
