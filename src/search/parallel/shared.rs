//! State shared by all search workers.
//!
//! The duplicate bookkeeping (closed set and best-known g per state) is
//! split over independently locked stripes selected by board hash, so
//! concurrent workers rarely contend on the same lock. Everything else
//! is a handful of sequentially consistent atomics: the solution bound,
//! the statistics counters, the stop flag, and one "minimum f in hand"
//! slot per worker that drives the termination rules.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::Board;
use crate::search::result::SearchStatistics;

/// Number of stripes in the closed and best-g maps. Large enough to
/// amortise contention, small enough to stay cache friendly.
pub(crate) const SHARD_COUNT: usize = 16;

/// `min_f` value of a worker that holds no node.
pub(crate) const IDLE: u64 = u64::MAX;

pub(crate) struct SharedSearch {
    closed_shards: Vec<Mutex<FxHashSet<Box<[u8]>>>>,
    best_g_shards: Vec<Mutex<FxHashMap<Box<[u8]>, u32>>>,
    /// Lowest goal cost found so far; `u64::MAX` until a goal is seen.
    best_cost: AtomicU64,
    /// The goal node realising `best_cost`.
    best_node: Mutex<Option<Arc<Board>>>,
    /// Per-worker f-cost of the node most recently taken for
    /// processing, or `IDLE`.
    min_f: Vec<AtomicU64>,
    stop: AtomicBool,
    states_selected: AtomicU64,
    closed_count: AtomicU64,
    max_states: AtomicU64,
}

impl SharedSearch {
    pub fn new(workers: usize) -> Self {
        SharedSearch {
            closed_shards: (0..SHARD_COUNT)
                .map(|_| Mutex::new(FxHashSet::default()))
                .collect(),
            best_g_shards: (0..SHARD_COUNT)
                .map(|_| Mutex::new(FxHashMap::default()))
                .collect(),
            best_cost: AtomicU64::new(u64::MAX),
            best_node: Mutex::new(None),
            min_f: (0..workers).map(|_| AtomicU64::new(IDLE)).collect(),
            stop: AtomicBool::new(false),
            states_selected: AtomicU64::new(0),
            closed_count: AtomicU64::new(0),
            max_states: AtomicU64::new(0),
        }
    }

    fn shard(&self, board: &Board) -> usize {
        (board.hash64() % SHARD_COUNT as u64) as usize
    }

    /// Record the seed's cost before any worker starts.
    pub fn seed_best_g(&self, board: &Board) {
        let mut shard = self.best_g_shards[self.shard(board)].lock().unwrap();
        shard.insert(board.key(), board.g_cost);
    }

    /// Whether some other path has already reached this state cheaper
    /// than the node in hand.
    pub fn is_superseded(&self, node: &Board) -> bool {
        let shard = self.best_g_shards[self.shard(node)].lock().unwrap();
        matches!(shard.get(node.tiles()), Some(&known) if known < node.g_cost)
    }

    /// Claim this state for `node`'s cost if it is the best seen so
    /// far. Returns false when an equal or cheaper path is already
    /// recorded, in which case the successor must be discarded.
    pub fn try_improve(&self, node: &Board) -> bool {
        let mut shard = self.best_g_shards[self.shard(node)].lock().unwrap();
        match shard.get(node.tiles()) {
            Some(&known) if node.g_cost >= known => false,
            _ => {
                shard.insert(node.key(), node.g_cost);
                true
            }
        }
    }

    /// Move a node into the closed set. Returns false if the state was
    /// already closed by some worker.
    pub fn try_close(&self, node: &Board) -> bool {
        let mut shard = self.closed_shards[self.shard(node)].lock().unwrap();
        if shard.insert(node.key()) {
            self.closed_count.fetch_add(1, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    /// Current solution bound, if any goal has been reached.
    pub fn bound(&self) -> Option<u32> {
        let raw = self.best_cost.load(Ordering::SeqCst);
        (raw != u64::MAX).then_some(raw as u32)
    }

    /// Record a goal node. The cheapest goal wins; ties keep the
    /// earlier winner's cost with the latest node, which is equivalent.
    /// When no worker holds a node cheaper than the bound any more, the
    /// stop flag is raised: every remaining path would cost at least as
    /// much as the solution in hand.
    pub fn record_goal(&self, node: Arc<Board>) {
        let cost = node.g_cost as u64;
        {
            let mut best = self.best_node.lock().unwrap();
            let previous = self.best_cost.fetch_min(cost, Ordering::SeqCst);
            if cost <= previous {
                *best = Some(node);
            }
        }
        if self.best_cost.load(Ordering::SeqCst) <= self.min_f_floor() {
            self.signal_stop();
        }
    }

    /// The cheapest goal node seen, if any.
    pub fn take_best(&self) -> Option<Arc<Board>> {
        self.best_node.lock().unwrap().take()
    }

    pub fn set_min_f(&self, worker: usize, value: u64) {
        self.min_f[worker].store(value, Ordering::SeqCst);
    }

    /// Smallest f-cost currently claimed by any worker.
    pub fn min_f_floor(&self) -> u64 {
        self.min_f
            .iter()
            .map(|slot| slot.load(Ordering::SeqCst))
            .min()
            .unwrap_or(IDLE)
    }

    /// True when every worker reports no node in hand.
    pub fn all_idle(&self) -> bool {
        self.min_f
            .iter()
            .all(|slot| slot.load(Ordering::SeqCst) == IDLE)
    }

    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    pub fn signal_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn note_selected(&self) {
        self.states_selected.fetch_add(1, Ordering::SeqCst);
    }

    /// Raise the live-state high-water mark given the current total of
    /// queued nodes across all workers.
    pub fn update_max_states(&self, open_total: u64) {
        let live = open_total + self.closed_count.load(Ordering::SeqCst);
        self.max_states.fetch_max(live, Ordering::SeqCst);
    }

    /// Snapshot the statistics counters. The solution length is filled
    /// in during path reconstruction.
    pub fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            states_selected: self.states_selected.load(Ordering::SeqCst),
            max_states_in_memory: self.max_states.load(Ordering::SeqCst),
            solution_length: 0,
            elapsed_time: Default::default(),
        }
    }
}
