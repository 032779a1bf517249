use clap::Parser;
use std::path::PathBuf;

use npuzzle::report::{self, SolveReport};
use npuzzle::{
    GeneratorConfig, GoalLookup, Heuristic, PuzzleError, SearchMode, SolverConfig, generator,
    is_solvable, parser, snail_goal, solve,
};

#[derive(Parser)]
#[command(name = "npuzzle")]
#[command(about = "Parallel optimal solver for the sliding-tile N-puzzle")]
#[command(version)]
struct Args {
    /// Puzzle file to solve (omit to generate one with -g)
    #[arg(value_name = "FILE", conflicts_with = "generate")]
    file: Option<PathBuf>,

    /// Generate a random N x N puzzle instead of reading a file
    #[arg(short = 'g', long = "generate", value_name = "N")]
    generate: Option<usize>,

    /// Heuristic function: manhattan, misplaced, or linear
    #[arg(long, default_value = "manhattan")]
    heuristic: Heuristic,

    /// Search algorithm: astar, ucs, or greedy
    #[arg(long = "search", value_name = "MODE", default_value = "astar")]
    search: SearchMode,

    /// Worker thread count (default: detected CPU count)
    #[arg(short = 't', long = "threads", value_name = "N")]
    threads: Option<usize>,

    /// Force generation of a solvable puzzle (default)
    #[arg(short = 's', long = "solvable", conflicts_with = "unsolvable")]
    solvable: bool,

    /// Force generation of an unsolvable puzzle
    #[arg(short = 'u', long = "unsolvable")]
    unsolvable: bool,

    /// Number of random slides applied by the generator
    #[arg(
        short = 'i',
        long = "iterations",
        value_name = "N",
        default_value_t = 10_000
    )]
    iterations: u32,

    /// Seed for the generator's random walk
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Emit the result as JSON instead of the pretty printer
    #[arg(long)]
    json: bool,

    /// Print a summary of the search configuration
    #[arg(long)]
    verbose: bool,
}

fn obtain_puzzle(args: &Args) -> Result<npuzzle::Board, PuzzleError> {
    match (&args.file, args.generate) {
        (Some(path), None) => {
            if args.unsolvable {
                return Err(PuzzleError::ConflictingOptions(
                    "-u only applies to generated puzzles",
                ));
            }
            parser::parse_file(path)
        }
        (None, Some(size)) => {
            let solvable = args.solvable || !args.unsolvable;
            let config = GeneratorConfig::default()
                .with_size(size)
                .with_iterations(args.iterations)
                .with_solvable(solvable)
                .with_seed_option(args.seed);
            let board = generator::generate(&config)?;
            if !args.json {
                println!("{}", generator::puzzle_file(&board, solvable));
            }
            Ok(board)
        }
        (None, None) => Err(PuzzleError::MissingArgument(
            "provide a puzzle file or -g N",
        )),
        (Some(_), Some(_)) => Err(PuzzleError::ConflictingOptions(
            "a puzzle file and -g cannot be combined",
        )),
    }
}

fn run(args: &Args) -> Result<(), PuzzleError> {
    let threads = match args.threads {
        Some(0) => return Err(PuzzleError::InvalidThreads(0)),
        Some(threads) => threads,
        None => num_cpus::get(),
    };

    let initial = obtain_puzzle(args)?;
    let goal = snail_goal(initial.size())?;
    let lookup = GoalLookup::new(&goal);

    // An infeasible puzzle is a normal outcome, not an error: report it
    // and exit cleanly without invoking the search engine.
    if !is_solvable(&initial, &goal) {
        if args.json {
            println!("{}", SolveReport::unsolvable().to_json());
        } else {
            report::print_unsolvable();
        }
        return Ok(());
    }

    let config = SolverConfig::default()
        .with_mode(args.search)
        .with_heuristic(args.heuristic)
        .with_threads(threads)
        .with_verbose(args.verbose && !args.json);

    match solve(initial, &goal, &lookup, &config) {
        Some(solution) => {
            if args.json {
                println!("{}", SolveReport::solved(&solution).to_json());
            } else {
                report::print_solution(&solution);
            }
        }
        None => {
            // Unreachable past the parity gate, but reported the same
            // way if it ever happens.
            if args.json {
                println!("{}", SolveReport::unsolvable().to_json());
            } else {
                report::print_unsolvable();
            }
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(error) = run(&args) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
