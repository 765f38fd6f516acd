// src/analytics/mod.rs
//! Elapsed-time bookkeeping for the phases of a run.

use indexmap::IndexMap;
use std::fmt;
use std::time::{Duration, Instant};

/// A timed stage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Session,
    Dispatch,
    Parse,
    Load,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Dispatch => "dispatch",
            Self::Parse => "parse",
            Self::Load => "load",
        }
    }
}

/// Durations per phase plus the wall time since the run started.
#[derive(Debug, Clone)]
pub struct PhaseTimings {
    started: Instant,
    phases: IndexMap<Phase, Duration>,
    total: Option<Duration>,
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self::start()
    }
}

impl PhaseTimings {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            phases: IndexMap::new(),
            total: None,
        }
    }

    /// Adds `elapsed` to `phase`; a phase entered twice accumulates.
    pub fn record(&mut self, phase: Phase, elapsed: Duration) {
        *self.phases.entry(phase).or_default() += elapsed;
    }

    /// Runs `f` and charges its wall time to `phase`.
    pub async fn time<T, F>(&mut self, phase: Phase, f: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        let started = Instant::now();
        let out = f.await;
        self.record(phase, started.elapsed());
        out
    }

    pub fn get(&self, phase: Phase) -> Option<Duration> {
        self.phases.get(&phase).copied()
    }

    /// Freezes the total at the current wall time.
    pub fn finish(&mut self) {
        self.total = Some(self.started.elapsed());
    }

    pub fn total(&self) -> Duration {
        self.total.unwrap_or_else(|| self.started.elapsed())
    }
}

impl fmt::Display for PhaseTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (phase, elapsed) in &self.phases {
            write!(f, "{} {:.2?}, ", phase.label(), elapsed)?;
        }
        write!(f, "total {:.2?}", self.total())
    }
}
