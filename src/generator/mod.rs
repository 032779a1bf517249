//! Random puzzle generation.
//!
//! Generated puzzles start from the snail goal and are shuffled by a
//! random walk of the empty cell, so they are solvable by construction;
//! an explicit parity flip produces provably unsolvable instances on
//! demand.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, MAX_SIZE, MIN_SIZE, MOVES};
use crate::error::PuzzleError;

/// Configuration for the puzzle generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Grid side length.
    pub size: usize,
    /// Number of random slides applied to the goal.
    pub iterations: u32,
    /// Whether the result must be solvable.
    pub solvable: bool,
    /// Seed for the random walk (None = nondeterministic).
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: 3,
            iterations: 10_000,
            solvable: true,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_solvable(mut self, solvable: bool) -> Self {
        self.solvable = solvable;
        self
    }

    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Build the conventional goal board: 1..N*N-1 laid out clockwise in an
/// inward spiral from the top-left, with the empty cell at the spiral's
/// terminus.
pub fn snail_goal(size: usize) -> Result<Board, PuzzleError> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(PuzzleError::InvalidSize(size));
    }

    let cell_count = size * size;
    let mut tiles = vec![0u8; cell_count];
    let mut visited = vec![false; cell_count];
    let (mut row, mut col) = (0isize, 0isize);
    let (mut dr, mut dc) = (0isize, 1isize);

    for step in 0..cell_count {
        let value = if step + 1 == cell_count { 0 } else { step + 1 };
        let index = row as usize * size + col as usize;
        tiles[index] = value as u8;
        visited[index] = true;

        let next_row = row + dr;
        let next_col = col + dc;
        let out_of_bounds = next_row < 0
            || next_row >= size as isize
            || next_col < 0
            || next_col >= size as isize;
        let filled =
            !out_of_bounds && visited[next_row as usize * size + next_col as usize];
        if out_of_bounds || filled {
            // Turn clockwise.
            (dr, dc) = (dc, -dr);
        }
        row += dr;
        col += dc;
    }

    Board::from_tiles(size, tiles)
}

/// Generate a random puzzle according to `config`.
pub fn generate(config: &GeneratorConfig) -> Result<Board, PuzzleError> {
    let mut board = snail_goal(config.size)?;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };

    for _ in 0..config.iterations {
        let mut legal: Vec<Board> = MOVES.iter().filter_map(|&mv| board.slide(mv)).collect();
        let pick = rng.random_range(0..legal.len());
        board = legal.swap_remove(pick);
    }

    if !config.solvable {
        board = flip_parity(&board)?;
    }

    Ok(board)
}

/// Swap two adjacent non-empty tiles, flipping the inversion parity and
/// making the board unreachable from its previous goal.
fn flip_parity(board: &Board) -> Result<Board, PuzzleError> {
    let mut tiles = board.tiles().to_vec();
    let last = tiles.len() - 1;
    if board.empty_index() <= 1 {
        tiles.swap(last - 1, last);
    } else {
        tiles.swap(0, 1);
    }
    Board::from_tiles(board.size(), tiles)
}

/// Render a generated puzzle in the input-file format, including a
/// comment header describing its solvability.
pub fn puzzle_file(board: &Board, solvable: bool) -> String {
    let state = if solvable { "solvable" } else { "unsolvable" };
    format!("# This puzzle is {}\n{}\n{}", state, board.size(), board)
}
