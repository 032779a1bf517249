//! Puzzle file parser.
//!
//! The input format is line oriented: `#` starts a comment running to
//! the end of the line, blank lines are skipped, the first payload line
//! is the grid side N, and the following lines carry the N*N tile
//! values in row-major order, whitespace separated and split across any
//! number of lines.

use std::fs;
use std::path::Path;

use crate::board::{Board, MAX_SIZE, MIN_SIZE};
use crate::error::PuzzleError;

/// Read and validate a puzzle from a file.
pub fn parse_file(path: &Path) -> Result<Board, PuzzleError> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parse and validate a puzzle from its textual form.
pub fn parse_str(input: &str) -> Result<Board, PuzzleError> {
    let mut size: Option<usize> = None;
    let mut values: Vec<u16> = Vec::new();

    for line in input.lines() {
        let payload = line.split('#').next().unwrap_or("").trim();
        if payload.is_empty() {
            continue;
        }

        if size.is_none() {
            let n: usize = payload
                .parse()
                .map_err(|_| PuzzleError::InvalidNumber(payload.to_string()))?;
            if !(MIN_SIZE..=MAX_SIZE).contains(&n) {
                return Err(PuzzleError::InvalidSize(n));
            }
            size = Some(n);
        } else {
            for token in payload.split_whitespace() {
                let value: u16 = token
                    .parse()
                    .map_err(|_| PuzzleError::InvalidNumber(token.to_string()))?;
                values.push(value);
            }
        }
    }

    let size = size.ok_or(PuzzleError::MissingSize)?;
    let expected = size * size;
    if values.len() != expected {
        return Err(PuzzleError::InvalidDimensions {
            size,
            expected,
            found: values.len(),
        });
    }

    let tiles = validate_tiles(size, &values)?;
    Board::from_tiles(size, tiles)
}

/// Check that `values` form a permutation of 0..size*size and narrow
/// them to bytes.
pub fn validate_tiles(size: usize, values: &[u16]) -> Result<Vec<u8>, PuzzleError> {
    let cell_count = size * size;
    let mut seen = vec![false; cell_count];
    let mut tiles = Vec::with_capacity(values.len());

    for &value in values {
        if (value as usize) >= cell_count {
            return Err(PuzzleError::InvalidTileValue { size, found: value });
        }
        if seen[value as usize] {
            return Err(PuzzleError::DuplicateTile(value));
        }
        seen[value as usize] = true;
        tiles.push(value as u8);
    }

    if values.len() < cell_count {
        if let Some(missing) = seen.iter().position(|&present| !present) {
            return Err(PuzzleError::MissingTile(missing as u16));
        }
    }

    Ok(tiles)
}
