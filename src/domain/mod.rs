// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`.

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod block;
pub mod resolution;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Block Domain
pub use block::{validate_block_counts, BlockConstraint, BlockCounts, BlockKind};

// Resolution Domain
pub use resolution::{ProbeFailure, ResolutionOutcome, ResolutionRequest};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of invariants the filter and the engine
/// guarantee between them; they are never raised for expected conditions
/// such as missing optional sibling files.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
