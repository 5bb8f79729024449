// src/lib.rs
// vue-mfc - Multi-file component assembly engine for Vue SFC pipelines
//
// Architecture:
// - Domain-centric: block kinds, cardinality and resolution outcomes are
//   pure value objects in domain/
// - Seam-driven: filesystem access and event publication are injected
//   traits; no process-wide state
// - Deterministic: candidate slot order alone decides document order

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod application;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod services;

/// Plugin display name, prefixed to aggregated error messages.
pub const PLUGIN_NAME: &str = "vue-mfc";

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_block_counts,
    BlockConstraint,
    BlockCounts,
    BlockKind,
    DomainError,
    DomainResult,
    ProbeFailure,
    ResolutionOutcome,
    ResolutionRequest,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    ComponentResolved,
    DocumentLoaded,
    EventSink,
    LogEventSink,
    NullEventSink,
    PluginEvent,
    PluginEventRecord,
    ResolutionRejected,
};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::{FileAccess, HandoffCache, TokioFileAccess};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    BlockDefinition,
    BlockRules,
    FragmentKind,
    PartitionedRules,
    ResolverService,
    ScriptStrategy,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{MfcPlugin, PathFilter, PluginOptions};
