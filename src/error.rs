//! Error types shared across the crate.

use thiserror::Error;

/// Errors that can occur while reading, generating, or solving a puzzle.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("invalid puzzle size {0}: expected 3..=16")]
    InvalidSize(usize),

    #[error("expected {expected} tiles for a {size}x{size} puzzle, found {found}")]
    InvalidDimensions {
        size: usize,
        expected: usize,
        found: usize,
    },

    #[error("input contains no size line")]
    MissingSize,

    #[error("puzzle has no empty cell (no tile with value 0)")]
    NoEmptyTile,

    #[error("tile value {0} appears more than once")]
    DuplicateTile(u16),

    #[error("tile value {found} out of range for a {size}x{size} puzzle")]
    InvalidTileValue { size: usize, found: u16 },

    #[error("tile value {0} is missing")]
    MissingTile(u16),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("conflicting options: {0}")]
    ConflictingOptions(&'static str),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("unknown heuristic '{0}': valid options are manhattan, misplaced, linear")]
    InvalidHeuristic(String),

    #[error("unknown search mode '{0}': valid options are astar, ucs, greedy")]
    InvalidSearchMode(String),

    #[error("invalid thread count {0}: must be at least 1")]
    InvalidThreads(usize),

    #[error("failed to read puzzle file: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PuzzleError::InvalidSize(17);
        assert_eq!(err.to_string(), "invalid puzzle size 17: expected 3..=16");

        let err = PuzzleError::InvalidDimensions {
            size: 3,
            expected: 9,
            found: 8,
        };
        assert_eq!(
            err.to_string(),
            "expected 9 tiles for a 3x3 puzzle, found 8"
        );

        let err = PuzzleError::DuplicateTile(5);
        assert_eq!(err.to_string(), "tile value 5 appears more than once");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PuzzleError = io.into();
        assert!(matches!(err, PuzzleError::Io(_)));
    }
}
