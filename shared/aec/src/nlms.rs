//! Normalized LMS echo canceller.
//!
//! The effective step is derived from the power of the reference window,
//! `step = NLMS_STEP / (x·x + NLMS_DELTA)`, so there is no step-size knob.

use crate::canceller::EchoCanceller;
use crate::error::AecResult;
use crate::fir::AdaptiveFir;

pub const DEFAULT_FILTER_SIZE: usize = 256;

/// Normalized step, stable for 0 < step < 2 regardless of signal level.
const NLMS_STEP: f32 = 0.5;
/// Keeps the normalization finite on silence.
const NLMS_DELTA: f32 = 1e-6;

pub struct Nlms {
    fir: AdaptiveFir,
}

impl Nlms {
    pub fn new(filter_size: Option<usize>) -> AecResult<Self> {
        Ok(Self {
            fir: AdaptiveFir::new(filter_size.unwrap_or(DEFAULT_FILTER_SIZE))?,
        })
    }
}

impl EchoCanceller for Nlms {
    fn filter_size(&self) -> usize {
        self.fir.len()
    }

    fn process(&mut self, output: &mut [i16], reference: &[i16], input: &[i16]) -> AecResult<()> {
        self.fir
            .process(output, reference, input, |power| NLMS_STEP / (power + NLMS_DELTA))
    }

    fn coefficients(&self) -> Vec<f32> {
        self.fir.weights().to_vec()
    }
}
