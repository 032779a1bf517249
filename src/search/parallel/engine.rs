//! Parallel search driver: seeding, worker spawning, and result
//! extraction.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::thread;

use crate::board::Board;
use crate::heuristic::GoalLookup;
use crate::search::config::SolverConfig;
use crate::search::initial_costs;
use crate::search::parallel::shared::SharedSearch;
use crate::search::parallel::worker::{SearchContext, WorkerQueue, run_worker};
use crate::search::result::Solution;

/// Run the multi-worker search and return the best path found.
///
/// The initial node is seeded into worker 0's queue; every other
/// worker starts empty and immediately steals. After all workers have
/// joined, the cheapest recorded goal (if any) is walked back through
/// its parent references to produce the solution path.
pub(crate) fn search(
    initial: Board,
    goal: &Board,
    lookup: &GoalLookup,
    config: &SolverConfig,
) -> Option<Solution> {
    let workers = config.threads;
    let shared = Arc::new(SharedSearch::new(workers));
    let queues: Vec<Arc<WorkerQueue>> = (0..workers)
        .map(|_| Arc::new(WorkerQueue::new()))
        .collect();
    let ctx = Arc::new(SearchContext {
        goal: goal.clone(),
        lookup: lookup.clone(),
        heuristic: config.heuristic,
        mode: config.mode,
    });

    let mut initial = initial;
    initial_costs(&mut initial, lookup, config.heuristic, config.mode);
    shared.seed_best_g(&initial);
    let seed = Arc::new(initial);
    // The seed counts as worker 0's claimed work from the very start;
    // otherwise the idle-quiescence rule could fire before the first
    // pop.
    shared.set_min_f(0, seed.f_cost as u64);
    {
        let mut heap = queues[0].heap.lock().unwrap();
        heap.push(seed);
        queues[0].open_count.store(1, Ordering::SeqCst);
    }
    shared.update_max_states(1);

    if config.verbose {
        println!("Spawning {workers} search workers");
    }
    let handles: Vec<_> = (0..workers)
        .map(|id| {
            let shared = Arc::clone(&shared);
            let queues = queues.clone();
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || run_worker(id, &queues, &shared, &ctx))
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }
    if config.verbose {
        let statistics = shared.statistics();
        println!(
            "Workers joined: {} states selected, {} states in memory at peak",
            statistics.states_selected, statistics.max_states_in_memory
        );
    }

    let best = shared.take_best()?;
    Some(Solution::from_goal_node(best, shared.statistics()))
}
