//! # tkvs Testkit
//!
//! Test utilities for tkvs.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - A naive reference model used as a differential oracle
//! - A harness that checks any engine against the model, step by step
//!
//! ## Usage
//!
//! ```rust
//! use tkvs_core::Strategy;
//! use tkvs_testkit::prelude::*;
//!
//! let ops = vec![
//!     StoreOp::Set { key: "k".into(), value: "v".into() },
//!     StoreOp::Begin,
//!     StoreOp::Delete { key: "k".into() },
//!     StoreOp::Rollback,
//! ];
//! let mut store = Strategy::ChangeLog.new_store();
//! check_against_model(store.as_mut(), &ops);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod generators;
pub mod harness;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::generators::*;
    pub use crate::harness::*;
    pub use crate::model::*;
}

pub use generators::*;
pub use harness::*;
pub use model::*;
