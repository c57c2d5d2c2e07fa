//! # memokit
//!
//! Two interchangeable memoization substrates.
//!
//! ## Architecture
//! - **RecencyCache**: fixed-capacity LRU, AHash index over an intrusive
//!   doubly-linked recency list (O(1) lookup, store and eviction)
//! - **SelfAdjustingTree**: splay tree in a node arena, restructured toward
//!   the target key on every search and insert (O(log n) amortized)
//! - **Memoizer**: the lookup-then-store contract both implement
//! - **SharedMemo**: one lock around either substrate, with hit/miss stats
//!
//! Neither substrate locks internally; all operations take `&mut self`.

#![warn(missing_docs)]

mod error;
mod lru;
mod memo;
mod shared;
mod splay;
mod stats;
pub mod workload;

pub use error::{Error, Result};
pub use lru::RecencyCache;
pub use memo::Memoizer;
pub use shared::SharedMemo;
pub use splay::SelfAdjustingTree;
pub use stats::{MemoStats, StatsSnapshot};
