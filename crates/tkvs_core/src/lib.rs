//! # tkvs Core
//!
//! In-memory transactional key-value engine with nested transactions.
//!
//! This crate provides the [`TransactionalStore`] contract and two
//! interchangeable engine implementations:
//!
//! - [`ChangeLogStore`] - one backing map plus a stack of per-transaction
//!   undo logs, with an O(1) value-occurrence counter cache
//! - [`SnapshotStackStore`] - a stack of full map snapshots, one per
//!   transaction level, with counts recomputed by scan
//!
//! Both support arbitrarily nested transactions and are externally
//! indistinguishable apart from algorithmic complexity and memory footprint.
//! Pick one at construction time via [`Strategy`]:
//!
//! ```rust
//! use tkvs_core::{Strategy, TransactionalStore};
//!
//! let mut store = Strategy::ChangeLog.new_store();
//! store.set("key", "value");
//! store.begin();
//! store.set("key", "other");
//! store.rollback().unwrap();
//! assert_eq!(store.get("key"), Some("value"));
//! ```
//!
//! # Thread Safety
//!
//! The engine is single-threaded by contract. It performs no locking;
//! callers that need concurrent access must serialize externally.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod change_log;
mod counters;
mod error;
mod snapshot;
mod store;

pub use change_log::ChangeLogStore;
pub use counters::ValueCounters;
pub use error::{EngineError, EngineResult};
pub use snapshot::SnapshotStackStore;
pub use store::{Strategy, TransactionalStore};
