//! Logging setup and the evaluation observer.
//!
//! Binaries call [`init_tracing`] once. Library code reports pipeline progress through an
//! [`EvaluationObserver`] handed to the evaluator at construction, so tests can capture what a
//! run reported without installing a global subscriber.

use std::fmt;

use tracing::{Level, debug, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt as fmt_layer};

/// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// Logs go to stderr; stdout carries reports.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt_layer::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt_layer::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Structural,
    Similarity,
    Readiness,
    Aggregate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Extract => "extract",
            Stage::Structural => "structural",
            Stage::Similarity => "similarity",
            Stage::Readiness => "readiness",
            Stage::Aggregate => "aggregate",
        };
        f.write_str(name)
    }
}

/// Receives progress events from one evaluator.
pub trait EvaluationObserver: Send + Sync {
    fn stage_started(&self, stage: Stage);

    /// `findings` is the number of issues the stage produced (0 for stages without issues).
    fn stage_finished(&self, stage: Stage, findings: usize);

    /// The embedding path failed and the lexical method was used instead.
    fn similarity_degraded(&self, reason: &str);
}

/// Forwards observer events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl EvaluationObserver for TracingObserver {
    fn stage_started(&self, stage: Stage) {
        debug!(%stage, "Stage started");
    }

    fn stage_finished(&self, stage: Stage, findings: usize) {
        info!(%stage, findings, "Stage finished");
    }

    fn similarity_degraded(&self, reason: &str) {
        warn!(reason, "Embedding similarity failed, falling back to lexical similarity");
    }
}

/// Event captured by [`RecordingObserver`].
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    Started(Stage),
    Finished(Stage, usize),
    Degraded(String),
}

/// Observer that records every event, for assertions in tests.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: parking_lot::Mutex<Vec<ObservedEvent>>,
}

#[cfg(any(test, feature = "mock"))]
impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events.
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().clone()
    }

    /// Reasons passed to [`EvaluationObserver::similarity_degraded`].
    pub fn degradations(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                ObservedEvent::Degraded(reason) => Some(reason.clone()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(any(test, feature = "mock"))]
impl EvaluationObserver for RecordingObserver {
    fn stage_started(&self, stage: Stage) {
        self.events.lock().push(ObservedEvent::Started(stage));
    }

    fn stage_finished(&self, stage: Stage, findings: usize) {
        self.events.lock().push(ObservedEvent::Finished(stage, findings));
    }

    fn similarity_degraded(&self, reason: &str) {
        self.events
            .lock()
            .push(ObservedEvent::Degraded(reason.to_string()));
    }
}
