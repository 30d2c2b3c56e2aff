// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Trace Hooks
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Opt-in observability for the engines.
//!
//! Engines stay pure functions: they report intermediate values to a
//! caller-supplied [`TraceSink`] and never log on their own.

use std::cell::RefCell;

/// One named stage of a computation with its key intermediate values.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEvent {
    pub stage: &'static str,
    pub values: Vec<(&'static str, f64)>,
}

impl TraceEvent {
    pub fn new(stage: &'static str) -> Self {
        TraceEvent {
            stage,
            values: Vec::new(),
        }
    }

    pub fn with(mut self, name: &'static str, value: f64) -> Self {
        self.values.push((name, value));
        self
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, v)| *v)
    }
}

pub trait TraceSink {
    fn record(&self, event: TraceEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn record(&self, _event: TraceEvent) {}
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn record(&self, event: TraceEvent) {
        tracing::debug!(stage = event.stage, values = ?event.values, "engine stage");
    }
}

/// Keeps events in memory, mostly for tests and teaching overlays.
#[derive(Debug, Default)]
pub struct CollectingTrace {
    events: RefCell<Vec<TraceEvent>>,
}

impl CollectingTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.borrow().clone()
    }

    pub fn stage(&self, stage: &str) -> Option<TraceEvent> {
        self.events
            .borrow()
            .iter()
            .find(|e| e.stage == stage)
            .cloned()
    }
}

impl TraceSink for CollectingTrace {
    fn record(&self, event: TraceEvent) {
        self.events.borrow_mut().push(event);
    }
}
