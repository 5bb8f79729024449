// src/domain/resolution/value_objects.rs
//
// Resolution Value Objects
//
// Pure, immutable data structures representing one resolution of a
// virtual source path. Constructed by the pipeline, read by the adapter,
// then discarded; nothing here performs I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::domain::block::BlockCounts;

// ============================================================================
// RESOLUTION REQUEST
// ============================================================================

/// One resolution attempt over a virtual source path.
///
/// `directory` and `base_name` are derived from the source path by the
/// pipeline (the base name has the recognized suffix and trailing dots
/// stripped). A request drives exactly one resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionRequest {
    pub source_path: PathBuf,
    pub directory: PathBuf,
    pub base_name: String,
    pub requested_at: DateTime<Utc>,
}

impl ResolutionRequest {
    pub fn new(source_path: PathBuf, directory: PathBuf, base_name: String) -> Self {
        Self {
            source_path,
            directory,
            base_name,
            requested_at: Utc::now(),
        }
    }
}

// ============================================================================
// PROBE FAILURE
// ============================================================================

/// A filesystem probe that did not produce a usable fragment.
///
/// Probe failures are never individually fatal: they accumulate and
/// surface only inside a validation error's detail, or are silently
/// tolerated when the found files already satisfy every constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl ProbeFailure {
    pub fn new(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            path,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// RESOLUTION OUTCOME
// ============================================================================

/// The outcome of one resolution.
///
/// The assembled document is always computed but only exposed when every
/// cardinality constraint holds; a caller never receives a usable
/// document alongside an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    /// Identifier of this resolution instance (for traceability)
    pub request_id: Uuid,

    /// The virtual source path this outcome answers for
    pub source_path: PathBuf,

    /// Files found per block kind
    pub found_counts: BlockCounts,

    /// Cardinality violations, in registry order; empty means valid
    pub validation_errors: Vec<String>,

    /// Probes that found nothing or failed to read, in slot order
    pub probe_failures: Vec<ProbeFailure>,

    /// When this resolution completed
    pub resolved_at: DateTime<Utc>,

    document: String,
}

impl ResolutionOutcome {
    pub fn new(
        source_path: PathBuf,
        document: String,
        found_counts: BlockCounts,
        validation_errors: Vec<String>,
        probe_failures: Vec<ProbeFailure>,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            source_path,
            found_counts,
            validation_errors,
            probe_failures,
            resolved_at: Utc::now(),
            document,
        }
    }

    /// True when every block kind's count lies within its constraint.
    pub fn is_valid(&self) -> bool {
        self.validation_errors.is_empty()
    }

    /// The assembled document, exposed only when validation passed.
    pub fn document(&self) -> Option<&str> {
        if self.is_valid() {
            Some(&self.document)
        } else {
            None
        }
    }

    /// Consumes the outcome, yielding the document when validation passed.
    pub fn into_document(self) -> Option<String> {
        if self.is_valid() {
            Some(self.document)
        } else {
            None
        }
    }

    /// Single aggregated message: every cardinality violation plus every
    /// probe failure encountered along the way. `None` when valid.
    pub fn combined_error(&self) -> Option<String> {
        if self.is_valid() {
            return None;
        }

        let mut message = format!(
            "{}: The following errors were found: {}",
            crate::PLUGIN_NAME,
            self.validation_errors.join(", ")
        );
        if !self.probe_failures.is_empty() {
            let details: Vec<String> = self
                .probe_failures
                .iter()
                .map(|failure| format!("{}: {}", failure.path.display(), failure.reason))
                .collect();
            message.push_str(" - file errors: ");
            message.push_str(&details.join(", "));
        }
        Some(message)
    }
}

// ============================================================================
// TESTS
// ============================================================================
