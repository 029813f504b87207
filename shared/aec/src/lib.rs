//! Offline acoustic echo cancellation: LMS / NLMS adaptive filters and the
//! block-streaming driver that evaluates them against recorded PCM.
//!
//! Processing chain:
//!   feedback + microphone PCM → fixed-size blocks → [`EchoCanceller`] → output PCM
//!
//! The driver optionally wraps every block call in a [`PerfRecorder`] to
//! express latency as a share of the real-time budget.

pub mod canceller;
pub mod driver;
pub mod error;
mod fir;
pub mod lms;
pub mod nlms;
pub mod perf;
#[cfg(test)]
mod test_utils;

pub use canceller::{AlgorithmConfig, Canceller, EchoCanceller, Variant};
pub use driver::{BlockDriver, RunOutput, DEFAULT_BLOCK_SIZE};
pub use error::{AecError, AecResult};
pub use lms::Lms;
pub use nlms::Nlms;
pub use perf::{budget_percent, PerfRecorder, PerfSummary};
