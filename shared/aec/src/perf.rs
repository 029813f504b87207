//! Per-block latency accounting against the real-time budget.
//!
//! A block of `block_size` samples at `sample_rate` Hz plays back in
//! `block_size / sample_rate` seconds; a process call that takes longer than
//! that (100%) cannot keep up with a live stream.

use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PerfRecorder {
    count: u64,
    sum: Duration,
    min: Duration,
    max: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerfSummary {
    pub block_size: usize,
    pub sample_rate: u32,
    pub blocks: u64,
    pub min_ns: u64,
    pub max_ns: u64,
    pub avg_ns: u64,
    pub min_pct: f64,
    pub max_pct: f64,
    pub avg_pct: f64,
}

impl PerfRecorder {
    pub fn begin() -> Self {
        Self {
            count: 0,
            sum: Duration::ZERO,
            min: Duration::MAX,
            max: Duration::ZERO,
        }
    }

    pub fn record(&mut self, d: Duration) {
        self.min = self.min.min(d);
        self.max = self.max.max(d);
        self.sum += d;
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// `None` until at least one block has been recorded.
    pub fn summary(&self, block_size: usize, sample_rate: u32) -> Option<PerfSummary> {
        if self.count == 0 {
            return None;
        }
        let avg = Duration::from_nanos(dur_ns(self.sum) / self.count);
        Some(PerfSummary {
            block_size,
            sample_rate,
            blocks: self.count,
            min_ns: dur_ns(self.min),
            max_ns: dur_ns(self.max),
            avg_ns: dur_ns(avg),
            min_pct: budget_percent(self.min, block_size, sample_rate),
            max_pct: budget_percent(self.max, block_size, sample_rate),
            avg_pct: budget_percent(avg, block_size, sample_rate),
        })
    }
}

impl Default for PerfRecorder {
    fn default() -> Self {
        Self::begin()
    }
}

/// Share of one block's playback time consumed by `d`, in percent.
///
/// The nanosecond count is scaled by `sample_rate / block_size` in integer
/// arithmetic first, then converted, so the result never decreases as `d`
/// grows.
pub fn budget_percent(d: Duration, block_size: usize, sample_rate: u32) -> f64 {
    if block_size == 0 {
        return 0.0;
    }
    let scaled = d.as_nanos() * sample_rate as u128 / block_size as u128;
    scaled as f64 / 1_000_000_000.0 * 100.0
}

pub fn dur_ns(d: Duration) -> u64 {
    d.as_nanos().min(u64::MAX as u128) as u64
}
