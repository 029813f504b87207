//! Block-streaming driver.
//!
//! Splits the feedback and microphone signals into fixed windows and feeds
//! them to an [`EchoCanceller`] one at a time, in order. The output buffer
//! is `min(len(feedback), len(microphone))` long; the tail shorter than one
//! block is never processed and stays zero.

use std::time::{Duration, Instant};

use tracing::{info, trace};

use crate::canceller::{AlgorithmConfig, Canceller, EchoCanceller};
use crate::error::{AecError, AecResult};
use crate::perf::{PerfRecorder, PerfSummary};

pub const DEFAULT_BLOCK_SIZE: usize = 256;
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;
/// Pause after each timed block so consecutive calls don't skew each other.
pub const DEFAULT_PERF_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy)]
pub struct PerfOptions {
    pub sample_rate: u32,
    pub inter_block_delay: Duration,
}

impl Default for PerfOptions {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            inter_block_delay: DEFAULT_PERF_DELAY,
        }
    }
}

pub struct RunOutput {
    pub output: Vec<i16>,
    pub coefficients: Vec<f32>,
    /// Present when performance mode was on and at least one block ran.
    pub perf: Option<PerfSummary>,
}

pub struct BlockDriver<A> {
    algo: A,
    block_size: usize,
    perf: Option<PerfOptions>,
}

impl BlockDriver<Canceller> {
    /// Build the configured variant and wrap it in a driver.
    pub fn configure(cfg: &AlgorithmConfig, block_size: usize) -> AecResult<Self> {
        Self::new(cfg.build()?, block_size)
    }
}

impl<A: EchoCanceller> BlockDriver<A> {
    pub fn new(algo: A, block_size: usize) -> AecResult<Self> {
        if block_size == 0 {
            return Err(AecError::InvalidArgument("block size must be > 0"));
        }
        Ok(Self { algo, block_size, perf: None })
    }

    /// Enable per-block latency measurement.
    pub fn with_perf(mut self, opts: PerfOptions) -> Self {
        self.perf = Some(opts);
        self
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn algorithm(&self) -> &A {
        &self.algo
    }

    pub fn into_algorithm(self) -> A {
        self.algo
    }

    pub fn run(&mut self, feedback: &[i16], microphone: &[i16]) -> AecResult<RunOutput> {
        let bs = self.block_size;
        let mut output = vec![0i16; feedback.len().min(microphone.len())];
        let blocks = output.len() / bs;
        let processed = blocks * bs;
        let mut recorder = self.perf.map(|_| PerfRecorder::begin());

        let mut last_percent = None;
        let windows = output
            .chunks_exact_mut(bs)
            .zip(feedback.chunks_exact(bs))
            .zip(microphone.chunks_exact(bs));
        for (i, ((out, fb), mic)) in windows.enumerate() {
            let percent = 100 * i / blocks;
            if last_percent != Some(percent) {
                last_percent = Some(percent);
                info!("process: {}/{} {}/100", i * bs, processed, percent);
            } else {
                trace!("process: {}/{}", i * bs, processed);
            }

            let t0 = Instant::now();
            self.algo.process(out, fb, mic)?;
            if let (Some(rec), Some(opts)) = (recorder.as_mut(), self.perf) {
                rec.record(t0.elapsed());
                if !opts.inter_block_delay.is_zero() {
                    std::thread::sleep(opts.inter_block_delay);
                }
            }
        }

        let perf = match (&recorder, self.perf) {
            (Some(rec), Some(opts)) => rec.summary(bs, opts.sample_rate),
            _ => None,
        };

        Ok(RunOutput {
            output,
            coefficients: self.algo.coefficients(),
            perf,
        })
    }
}
