use maestro_core::TaskResult;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Aggregate figures over every retained ledger entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_executions: usize,
    pub successful: usize,
    pub failed: usize,
    /// Fraction of successful executions in `[0, 1]`; `0.0` when empty.
    pub success_rate: f64,
    pub avg_duration_ms: f64,
}

/// Per-agent aggregate figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStats {
    pub executions: usize,
    pub successes: usize,
    pub failures: usize,
    pub total_duration_ms: u64,
}

impl AgentStats {
    pub fn avg_duration_ms(&self) -> f64 {
        if self.executions == 0 {
            0.0
        } else {
            self.total_duration_ms as f64 / self.executions as f64
        }
    }
}

const INITIAL_SLOTS: usize = 256;

#[derive(Debug, Default)]
struct LedgerInner {
    entries: VecDeque<TaskResult>,
    capacity: Option<usize>,
    evicted: u64,
}

/// Append-only record of every task execution.
///
/// Unbounded by default. With a capacity, the oldest entries are evicted
/// once the limit is reached and statistics cover the retained window only.
#[derive(Debug, Default)]
pub struct ExecutionLedger {
    inner: Mutex<LedgerInner>,
}

impl ExecutionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger that retains at most `capacity` entries (minimum 1).
    ///
    /// The bound only drives eviction; storage grows as entries arrive.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(LedgerInner {
                entries: VecDeque::with_capacity(capacity.min(INITIAL_SLOTS)),
                capacity: Some(capacity),
                evicted: 0,
            }),
        }
    }

    /// Append a result. Prior entries are never modified.
    pub fn record(&self, result: TaskResult) {
        let mut inner = self.inner.lock();
        if let Some(capacity) = inner.capacity {
            while inner.entries.len() >= capacity {
                inner.entries.pop_front();
                inner.evicted += 1;
            }
        }
        inner.entries.push_back(result);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.inner.lock().capacity
    }

    /// Number of entries dropped to honour the capacity bound.
    pub fn evicted(&self) -> u64 {
        self.inner.lock().evicted
    }

    /// Copy of every retained entry, oldest first.
    pub fn snapshot(&self) -> Vec<TaskResult> {
        self.inner.lock().entries.iter().cloned().collect()
    }

    /// The `n` most recent entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<TaskResult> {
        let inner = self.inner.lock();
        let skip = inner.entries.len().saturating_sub(n);
        inner.entries.iter().skip(skip).cloned().collect()
    }

    pub fn global_stats(&self) -> GlobalStats {
        let inner = self.inner.lock();
        let total = inner.entries.len();
        if total == 0 {
            return GlobalStats::default();
        }
        let successful = inner.entries.iter().filter(|r| r.success).count();
        let total_duration: u64 = inner.entries.iter().map(|r| r.duration_ms).sum();
        GlobalStats {
            total_executions: total,
            successful,
            failed: total - successful,
            success_rate: successful as f64 / total as f64,
            avg_duration_ms: total_duration as f64 / total as f64,
        }
    }

    pub fn stats_by_agent(&self) -> BTreeMap<String, AgentStats> {
        let inner = self.inner.lock();
        let mut stats: BTreeMap<String, AgentStats> = BTreeMap::new();
        for result in &inner.entries {
            let entry = stats.entry(result.agent_name.clone()).or_default();
            entry.executions += 1;
            if result.success {
                entry.successes += 1;
            } else {
                entry.failures += 1;
            }
            entry.total_duration_ms += result.duration_ms;
        }
        stats
    }

    /// Serialize the current statistics as JSON (for dashboards).
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "global": self.global_stats(),
            "agents": self.stats_by_agent(),
            "evicted": self.evicted(),
        })
    }
}
