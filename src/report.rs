//! Solution presentation: ANSI pretty printing and the JSON report.

use serde::Serialize;

use crate::board::Board;
use crate::search::{SearchStatistics, Solution};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const BLUE: &str = "\x1b[34m";
const ORANGE: &str = "\x1b[38;5;208m";

fn bold(text: &str) -> String {
    format!("{BOLD}{text}{RESET}")
}

fn blue(text: &str) -> String {
    format!("{BLUE}{text}{RESET}")
}

fn orange(text: &str) -> String {
    format!("{ORANGE}{text}{RESET}")
}

/// Print the full solution: every board along the path with its costs,
/// followed by the statistics block.
pub fn print_solution(solution: &Solution) {
    for (step, state) in solution.path.iter().enumerate() {
        let (moved_out, moved_in) = if step > 0 {
            moved_tiles(&solution.path[step - 1], state)
        } else {
            (None, None)
        };
        println!("\nStep {step}");
        println!(
            "g={}  h={}  f={}",
            state.g_cost, state.h_cost, state.f_cost
        );
        print!("{}", render_grid(state, moved_in, moved_out));
    }
    print_statistics(&solution.statistics);
}

/// The tiles that changed cells between two consecutive boards:
/// `moved_out` now occupies the previously empty cell, `moved_in` used
/// to occupy the newly empty cell. For a single legal slide both name
/// the same tile.
fn moved_tiles(previous: &Board, current: &Board) -> (Option<u8>, Option<u8>) {
    let moved_out = current.tiles()[previous.empty_index()];
    let moved_in = previous.tiles()[current.empty_index()];
    (
        (moved_out != 0).then_some(moved_out),
        (moved_in != 0).then_some(moved_in),
    )
}

/// Render a board as a boxed grid. Tiles print bold; the tile that
/// slid in prints blue, the one that slid out orange; the empty cell
/// prints blank.
fn render_grid(board: &Board, moved_in: Option<u8>, moved_out: Option<u8>) -> String {
    let size = board.size();
    let width = (size * size).to_string().len();
    let horizontal = format!("+{}", format!("{}+", "-".repeat(width + 2)).repeat(size));

    let mut out = String::new();
    out.push_str(&horizontal);
    out.push('\n');
    for row in 0..size {
        let cells: Vec<String> = (0..size)
            .map(|col| {
                let value = board.tile_at(row, col);
                if value == 0 {
                    format!(" {} ", " ".repeat(width))
                } else {
                    let text = format!("{value:>width$}");
                    let text = if moved_in == Some(value) {
                        blue(&bold(&text))
                    } else if moved_out == Some(value) {
                        orange(&bold(&text))
                    } else {
                        bold(&text)
                    };
                    format!(" {text} ")
                }
            })
            .collect();
        out.push('|');
        out.push_str(&cells.join("|"));
        out.push_str("|\n");
        out.push_str(&horizontal);
        out.push('\n');
    }
    out
}

/// Print the statistics block and the solver's wall-clock time.
pub fn print_statistics(statistics: &SearchStatistics) {
    println!("\nStatistics");
    println!("States selected      : {}", statistics.states_selected);
    println!("Max states in memory : {}", statistics.max_states_in_memory);
    println!("Solution length      : {}", statistics.solution_length);
    let seconds = statistics.elapsed_time.as_secs();
    let millis = statistics.elapsed_time.subsec_millis();
    println!("Solver execution time: {seconds}s{millis}ms");
}

/// Print the fixed infeasibility notice.
pub fn print_unsolvable() {
    println!("This puzzle is unsolvable.");
}

/// Machine-readable solve outcome.
#[derive(Debug, Serialize)]
pub struct SolveReport {
    success: bool,
    path: Vec<StateReport>,
    statistics: StatsReport,
}

#[derive(Debug, Serialize)]
struct StateReport {
    tiles: Vec<u8>,
    g_cost: u32,
    h_cost: u32,
    f_cost: u32,
}

#[derive(Debug, Serialize, Default)]
struct StatsReport {
    states_selected: u64,
    max_states_in_memory: u64,
    solution_length: u32,
}

impl SolveReport {
    /// Report for a solved puzzle.
    pub fn solved(solution: &Solution) -> Self {
        SolveReport {
            success: true,
            path: solution
                .path
                .iter()
                .map(|state| StateReport {
                    tiles: state.tiles().to_vec(),
                    g_cost: state.g_cost,
                    h_cost: state.h_cost,
                    f_cost: state.f_cost,
                })
                .collect(),
            statistics: StatsReport {
                states_selected: solution.statistics.states_selected,
                max_states_in_memory: solution.statistics.max_states_in_memory,
                solution_length: solution.statistics.solution_length,
            },
        }
    }

    /// Report for a puzzle the parity check rejected.
    pub fn unsolvable() -> Self {
        SolveReport {
            success: false,
            path: Vec::new(),
            statistics: StatsReport::default(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("report serialization is infallible")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::search::result::Solution;

    fn two_step_solution() -> Solution {
        let mut first = Board::from_tiles(3, vec![1, 2, 3, 0, 8, 4, 7, 6, 5]).unwrap();
        first.set_costs(0, 1);
        let first = Arc::new(first);

        let mut second = Board::from_tiles(3, vec![1, 2, 3, 8, 0, 4, 7, 6, 5]).unwrap();
        second.set_costs(1, 0);
        second.parent = Some(Arc::clone(&first));

        Solution::from_goal_node(Arc::new(second), SearchStatistics::default())
    }

    #[test]
    fn test_moved_tiles_between_steps() {
        let solution = two_step_solution();
        let (moved_out, moved_in) = moved_tiles(&solution.path[0], &solution.path[1]);
        // One slide moves one tile, so both views name the 8.
        assert_eq!(moved_out, Some(8));
        assert_eq!(moved_in, Some(8));
    }

    #[test]
    fn test_render_grid_shape() {
        let board = Board::from_tiles(3, vec![1, 2, 3, 8, 0, 4, 7, 6, 5]).unwrap();
        let grid = render_grid(&board, None, None);
        let lines: Vec<&str> = grid.lines().collect();
        // Three cell rows interleaved with four separators.
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "+---+---+---+");
        // The empty cell renders as spaces, not a zero.
        assert!(!grid.contains('0'));
        assert!(grid.contains('8'));
    }

    #[test]
    fn test_render_grid_highlights_moved_tile() {
        let board = Board::from_tiles(3, vec![1, 2, 3, 8, 0, 4, 7, 6, 5]).unwrap();
        let grid = render_grid(&board, Some(8), Some(8));
        // The moved-in colour wins when both name the same tile.
        assert!(grid.contains(BLUE));
        assert!(!grid.contains(ORANGE));
    }

    #[test]
    fn test_render_grid_orange_for_moved_out_only() {
        let board = Board::from_tiles(3, vec![1, 2, 3, 8, 0, 4, 7, 6, 5]).unwrap();
        let grid = render_grid(&board, None, Some(8));
        assert!(grid.contains(ORANGE));
        assert!(!grid.contains(BLUE));
    }

    #[test]
    fn test_json_report_schema() {
        let solution = two_step_solution();
        let report = SolveReport::solved(&solution);
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["path"].as_array().unwrap().len(), 2);
        assert_eq!(value["path"][1]["g_cost"], 1);
        assert_eq!(
            value["path"][0]["tiles"],
            serde_json::json!([1, 2, 3, 0, 8, 4, 7, 6, 5])
        );
        assert_eq!(value["statistics"]["solution_length"], 1);
    }

    #[test]
    fn test_json_report_unsolvable() {
        let value: serde_json::Value =
            serde_json::from_str(&SolveReport::unsolvable().to_json()).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["path"].as_array().unwrap().is_empty());
    }
}
