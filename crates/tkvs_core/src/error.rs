//! Error types for the tkvs engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in engine operations.
///
/// All engine operations except `commit` and `rollback` are total over
/// their inputs: an unknown key yields "no value", never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// `commit` or `rollback` was called with no open transaction.
    #[error("no transaction")]
    NoActiveTransaction,
}
