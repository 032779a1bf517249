//! Multi-threaded best-first search.
//!
//! # Architecture
//!
//! - Each **worker** owns a mutex-protected `(f, h)`-ordered queue and
//!   a lock-free size hint, and expands nodes in best-first order.
//! - Idle workers **steal** a batch from a neighbour's queue with a
//!   non-blocking lock attempt, keeping the best node and re-queueing
//!   the rest locally.
//! - Duplicate detection goes through **sharded** closed and best-g
//!   maps, one lock per stripe, selected by board hash.
//! - A **solution bound** (atomic minimum over all goal costs found)
//!   prunes nodes that can no longer lead to a cheaper path.
//! - Termination is two-fold: a goal finder raises the stop flag once
//!   no worker holds a node below the bound, and workers exit on their
//!   own when every queue has drained.
//!
//! With an admissible, consistent heuristic the first condition only
//! fires when no cheaper path can still exist, so the returned path is
//! optimal.

mod engine;
mod shared;
mod worker;

pub(crate) use engine::search;
