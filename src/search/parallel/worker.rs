//! Worker loop for the parallel search.
//!
//! Each worker owns a mutex-protected priority queue and services it in
//! best-first order. A worker whose queue runs dry steals a batch from
//! its neighbours before declaring itself idle. Every node taken for
//! processing is first checked against the solution bound and the
//! best-known cost for its state, then closed, then either recognised
//! as the goal or expanded into its successors.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::board::Board;
use crate::heuristic::{GoalLookup, Heuristic};
use crate::search::config::SearchMode;
use crate::search::expand;
use crate::search::parallel::shared::{IDLE, SharedSearch};
use crate::search::queue::OpenSet;

/// Number of nodes a stealer drains from a victim in one grab. The
/// best of the batch is processed immediately; the rest migrate to the
/// stealer's own queue.
pub(crate) const STEAL_BATCH_SIZE: usize = 16;

/// A worker's open set plus a lock-free size hint for stealers.
pub(crate) struct WorkerQueue {
    pub heap: Mutex<OpenSet>,
    pub open_count: AtomicU64,
}

impl WorkerQueue {
    pub fn new() -> Self {
        WorkerQueue {
            heap: Mutex::new(OpenSet::new()),
            open_count: AtomicU64::new(0),
        }
    }
}

/// Read-only inputs shared by every worker.
pub(crate) struct SearchContext {
    pub goal: Board,
    pub lookup: GoalLookup,
    pub heuristic: Heuristic,
    pub mode: SearchMode,
}

pub(crate) fn run_worker(
    id: usize,
    queues: &[Arc<WorkerQueue>],
    shared: &SharedSearch,
    ctx: &SearchContext,
) {
    while !shared.should_stop() {
        let node = match pop_own(id, queues, shared) {
            Some(node) => Some(node),
            None => steal(id, queues, shared),
        };

        match node {
            Some(node) => process(node, id, queues, shared, ctx),
            None => {
                // Nothing here and nothing to steal. If every worker
                // reports the same, the search space is exhausted.
                if shared.all_idle() {
                    break;
                }
                thread::yield_now();
            }
        }
    }
}

/// Pop the best node from the worker's own queue. The worker's min-f
/// slot is updated while the queue lock is still held, so the claim is
/// never stale with respect to a concurrent termination check.
fn pop_own(id: usize, queues: &[Arc<WorkerQueue>], shared: &SharedSearch) -> Option<Arc<Board>> {
    let mut heap = queues[id].heap.lock().unwrap();
    let node = heap.pop();
    queues[id].open_count.store(heap.len() as u64, Ordering::SeqCst);
    match &node {
        Some(node) => shared.set_min_f(id, node.f_cost as u64),
        None => shared.set_min_f(id, IDLE),
    }
    node
}

/// Try each other worker in round-robin order and grab a batch from the
/// first one whose queue can be locked without blocking. Returns the
/// best stolen node; the remainder is pushed onto the stealer's queue.
fn steal(id: usize, queues: &[Arc<WorkerQueue>], shared: &SharedSearch) -> Option<Arc<Board>> {
    let workers = queues.len();
    for offset in 1..workers {
        let victim = (id + offset) % workers;
        if queues[victim].open_count.load(Ordering::SeqCst) == 0 {
            continue;
        }
        let Ok(mut victim_heap) = queues[victim].heap.try_lock() else {
            // A contended victim is skipped, not waited on.
            continue;
        };
        let mut batch = victim_heap.pop_batch(STEAL_BATCH_SIZE);
        queues[victim]
            .open_count
            .store(victim_heap.len() as u64, Ordering::SeqCst);
        if batch.is_empty() {
            continue;
        }
        // Claim the batch before releasing the victim's lock: from the
        // termination protocol's point of view these nodes must never
        // be unaccounted for.
        let retained = batch.remove(0);
        shared.set_min_f(id, retained.f_cost as u64);
        drop(victim_heap);

        if !batch.is_empty() {
            let mut own = queues[id].heap.lock().unwrap();
            for node in batch {
                own.push(node);
            }
            queues[id].open_count.store(own.len() as u64, Ordering::SeqCst);
        }
        return Some(retained);
    }
    None
}

fn process(
    node: Arc<Board>,
    id: usize,
    queues: &[Arc<WorkerQueue>],
    shared: &SharedSearch,
    ctx: &SearchContext,
) {
    shared.note_selected();

    if let Some(bound) = shared.bound() {
        if node.f_cost >= bound {
            return;
        }
    }

    if shared.is_superseded(&node) {
        return;
    }

    if !shared.try_close(&node) {
        return;
    }
    shared.update_max_states(total_open(queues));

    if *node == ctx.goal {
        shared.record_goal(node);
        return;
    }

    let mut promoted = Vec::new();
    for successor in expand(&node, &ctx.lookup, ctx.heuristic, ctx.mode) {
        if let Some(bound) = shared.bound() {
            if successor.f_cost >= bound {
                continue;
            }
        }
        if !shared.try_improve(&successor) {
            continue;
        }
        promoted.push(Arc::new(successor));
    }

    if !promoted.is_empty() {
        let mut own = queues[id].heap.lock().unwrap();
        for successor in promoted {
            own.push(successor);
        }
        queues[id].open_count.store(own.len() as u64, Ordering::SeqCst);
        drop(own);
        shared.update_max_states(total_open(queues));
    }
}

fn total_open(queues: &[Arc<WorkerQueue>]) -> u64 {
    queues
        .iter()
        .map(|queue| queue.open_count.load(Ordering::SeqCst))
        .sum()
}
