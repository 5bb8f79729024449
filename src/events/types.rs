// src/events/types.rs
//
// All plugin events.
// Each event represents an immutable fact that has already occurred and
// carries only the data a host needs to react.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Trait that all plugin events must implement
pub trait PluginEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// RESOLUTION EVENTS
// ============================================================================

/// Emitted when a virtual source resolves to a valid document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentResolved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub source_path: PathBuf,
    pub document_len: usize,
}

impl ComponentResolved {
    pub fn new(source_path: PathBuf, document_len: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            source_path,
            document_len,
        }
    }
}

impl PluginEvent for ComponentResolved {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ComponentResolved"
    }
}

/// Emitted when a resolution fails block-cardinality validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionRejected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub source_path: PathBuf,
    pub error: String,
}

impl ResolutionRejected {
    pub fn new(source_path: PathBuf, error: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            source_path,
            error,
        }
    }
}

impl PluginEvent for ResolutionRejected {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ResolutionRejected"
    }
}

// ============================================================================
// LOAD EVENTS
// ============================================================================

/// Emitted when `load` serves a document, either from the hand-off cache
/// or from a fresh resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub source_path: PathBuf,
    pub from_cache: bool,
}

impl DocumentLoaded {
    pub fn new(source_path: PathBuf, from_cache: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            source_path,
            from_cache,
        }
    }
}

impl PluginEvent for DocumentLoaded {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "DocumentLoaded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_instances_get_distinct_ids() {
        let a = ComponentResolved::new(PathBuf::from("/app/foo.vue"), 42);
        let b = ComponentResolved::new(PathBuf::from("/app/foo.vue"), 42);
        assert_ne!(a.event_id(), b.event_id());
    }

    #[test]
    fn test_event_type_names() {
        assert_eq!(
            ComponentResolved::new(PathBuf::from("/a"), 0).event_type(),
            "ComponentResolved"
        );
        assert_eq!(
            ResolutionRejected::new(PathBuf::from("/a"), "e".to_string()).event_type(),
            "ResolutionRejected"
        );
        assert_eq!(
            DocumentLoaded::new(PathBuf::from("/a"), true).event_type(),
            "DocumentLoaded"
        );
    }

    #[test]
    fn test_events_serialize() {
        let event = DocumentLoaded::new(PathBuf::from("/app/foo.vue"), false);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["source_path"], "/app/foo.vue");
        assert_eq!(json["from_cache"], false);
    }
}
