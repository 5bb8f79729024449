// src/events/mod.rs
//
// Plugin Event System - Public API
//
// The engine only publishes facts; consuming them is the host's side of
// the seam.

pub mod sink;
pub mod types;

pub use types::PluginEvent;

pub use types::{ComponentResolved, DocumentLoaded, ResolutionRejected};

pub use sink::{EventSink, LogEventSink, NullEventSink, PluginEventRecord};
