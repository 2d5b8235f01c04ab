//! Error types for the decision engine.
//!
//! Everything here is recoverable: callers fall back to scan-based
//! selection or skip the operation, and the simulation carries on.

use thiserror::Error;

use vanguard_core::types::TargetId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetingError {
    #[error("unknown target id {0}")]
    UnknownTarget(TargetId),
}
