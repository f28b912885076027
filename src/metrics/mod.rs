//! Metrics collection module
//!
//! Tracks submissions, per-stage latency and per-stage failure counts.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Number of samples kept per stage for the rolling average
const LATENCY_WINDOW: usize = 100;

/// A step of the query pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Search,
    Transform,
    Generation,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Search, Stage::Transform, Stage::Generation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Search => "search",
            Stage::Transform => "transform",
            Stage::Generation => "generation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide counters for the query pipeline
pub struct Metrics {
    /// Accepted submissions
    submissions: AtomicU64,
    /// Submissions that produced an answer
    completed: AtomicU64,
    /// Submissions refused because another was running
    rejected_busy: AtomicU64,
    /// Recent latencies per stage in ms
    stage_latencies: RwLock<HashMap<Stage, VecDeque<u64>>>,
    /// Failure counts per stage
    stage_errors: RwLock<HashMap<Stage, u64>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            submissions: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            rejected_busy: AtomicU64::new(0),
            stage_latencies: RwLock::new(HashMap::new()),
            stage_errors: RwLock::new(HashMap::new()),
        }
    }

    pub fn inc_submission(&self) {
        self.submissions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_busy(&self) {
        self.rejected_busy.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a stage latency
    pub fn record_latency(&self, stage: Stage, time_ms: u64) {
        let mut latencies = self
            .stage_latencies
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = latencies.entry(stage).or_default();

        if entry.len() >= LATENCY_WINDOW {
            entry.pop_front();
        }
        entry.push_back(time_ms);
    }

    /// Record a stage failure
    pub fn record_error(&self, stage: Stage) {
        let mut errors = self
            .stage_errors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *errors.entry(stage).or_insert(0) += 1;
    }

    /// Average latency for a stage over the rolling window
    pub fn avg_latency(&self, stage: Stage) -> Option<u64> {
        let latencies = self
            .stage_latencies
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        latencies.get(&stage).and_then(|samples| {
            if samples.is_empty() {
                None
            } else {
                Some(samples.iter().sum::<u64>() / samples.len() as u64)
            }
        })
    }

    pub fn errors(&self, stage: Stage) -> u64 {
        let errors = self
            .stage_errors
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        errors.get(&stage).copied().unwrap_or(0)
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            submissions: self.submissions.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            rejected_busy: self.rejected_busy.load(Ordering::Relaxed),
            stages: Stage::ALL
                .iter()
                .map(|stage| StageStats {
                    stage: *stage,
                    avg_latency_ms: self.avg_latency(*stage),
                    errors: self.errors(*stage),
                })
                .collect(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for a single stage
#[derive(Debug, Clone, Serialize)]
pub struct StageStats {
    pub stage: Stage,
    pub avg_latency_ms: Option<u64>,
    pub errors: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub submissions: u64,
    pub completed: u64,
    pub rejected_busy: u64,
    pub stages: Vec<StageStats>,
}
