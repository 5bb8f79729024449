// src/events/sink.rs
//
// Event publication seam.
//
// Hosts install their own sink at construction; the default forwards to
// the `log` crate. The sink is injected, never a process-wide singleton.

use super::types::{ComponentResolved, DocumentLoaded, PluginEvent, ResolutionRejected};

/// Every fact the plugin can publish.
#[derive(Debug, Clone)]
pub enum PluginEventRecord {
    ComponentResolved(ComponentResolved),
    ResolutionRejected(ResolutionRejected),
    DocumentLoaded(DocumentLoaded),
}

impl PluginEventRecord {
    pub fn event_type(&self) -> &'static str {
        match self {
            PluginEventRecord::ComponentResolved(e) => e.event_type(),
            PluginEventRecord::ResolutionRejected(e) => e.event_type(),
            PluginEventRecord::DocumentLoaded(e) => e.event_type(),
        }
    }
}

/// Receives every event the plugin publishes.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: PluginEventRecord);
}

/// Default sink: forwards each event to the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn publish(&self, event: PluginEventRecord) {
        match &event {
            PluginEventRecord::ComponentResolved(e) => {
                log::debug!(
                    "[{}] {} resolved ({} bytes)",
                    e.event_type(),
                    e.source_path.display(),
                    e.document_len
                );
            }
            PluginEventRecord::ResolutionRejected(e) => {
                log::warn!("[{}] {}: {}", e.event_type(), e.source_path.display(), e.error);
            }
            PluginEventRecord::DocumentLoaded(e) => {
                log::debug!(
                    "[{}] {} served ({})",
                    e.event_type(),
                    e.source_path.display(),
                    if e.from_cache { "hand-off" } else { "re-resolved" }
                );
            }
        }
    }
}

/// Discards every event. For tests and hosts that do their own tracing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&self, _event: PluginEventRecord) {}
}
