use std::sync::Mutex;

// ---------------------------------------------------------------------------
// TraceSink trait — observability capability
// ---------------------------------------------------------------------------

/// Observability sink consumed by the pipeline components.
///
/// Implementations must be safe for concurrent append-only use. Emitting
/// never fails and never panics: a sink that cannot record an event drops
/// it, it does not take the observed operation down with it.
pub trait TraceSink: Send + Sync {
    /// Record a debug-level event.
    fn debug(&self, message: &str);

    /// Record a warning with its underlying cause.
    fn warning(&self, message: &str, cause: &str);
}

// ---------------------------------------------------------------------------
// TraceEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceLevel {
    Debug,
    Warning,
}

/// A recorded observability event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub level: TraceLevel,
    pub message: String,
    pub cause: Option<String>,
}

impl TraceEvent {
    pub fn debug(message: impl Into<String>) -> Self {
        Self {
            level: TraceLevel::Debug,
            message: message.into(),
            cause: None,
        }
    }

    pub fn warning(message: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            level: TraceLevel::Warning,
            message: message.into(),
            cause: Some(cause.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// TracingSink — forwards to the `tracing` macros
// ---------------------------------------------------------------------------

/// Production sink: forwards events to the `tracing` subscriber, if one is
/// installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn warning(&self, message: &str, cause: &str) {
        tracing::warn!(cause = %cause, "{}", message);
    }
}

// ---------------------------------------------------------------------------
// InMemoryTraceSink — records events for inspection
// ---------------------------------------------------------------------------

/// In-memory sink for tests and diagnostics. Thread-safe; a poisoned lock
/// is absorbed rather than propagated so emission stays panic-free.
#[derive(Debug, Default)]
pub struct InMemoryTraceSink {
    events: Mutex<Vec<TraceEvent>>,
}

impl InMemoryTraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, oldest first.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Snapshot of recorded warnings only.
    pub fn warnings(&self) -> Vec<TraceEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == TraceLevel::Warning)
            .collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    fn push(&self, event: TraceEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

impl TraceSink for InMemoryTraceSink {
    fn debug(&self, message: &str) {
        self.push(TraceEvent::debug(message));
    }

    fn warning(&self, message: &str, cause: &str) {
        self.push(TraceEvent::warning(message, cause));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_trace_sink_object_safe(_: &dyn TraceSink) {}

    #[test]
    fn test_in_memory_sink_records_in_order() {
        let sink = InMemoryTraceSink::new();
        sink.debug("first");
        sink.warning("second", "some cause");

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], TraceEvent::debug("first"));
        assert_eq!(events[1].level, TraceLevel::Warning);
        assert_eq!(events[1].cause.as_deref(), Some("some cause"));
    }

    #[test]
    fn test_in_memory_sink_warnings_filter() {
        let sink = InMemoryTraceSink::new();
        sink.debug("noise");
        sink.warning("signal", "cause");
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "signal");
    }

    #[test]
    fn test_in_memory_sink_clear() {
        let sink = InMemoryTraceSink::new();
        sink.debug("event");
        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_in_memory_sink_concurrent_append() {
        use std::sync::Arc;

        let sink = Arc::new(InMemoryTraceSink::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sink = sink.clone();
                std::thread::spawn(move || {
                    for j in 0..25 {
                        sink.debug(&format!("thread {} event {}", i, j));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(sink.events().len(), 100);
    }

    #[test]
    fn test_tracing_sink_emits_without_subscriber() {
        // No subscriber installed: the macros are no-ops, nothing panics.
        let sink = TracingSink;
        sink.debug("quiet");
        sink.warning("still quiet", "no cause");
    }
}
