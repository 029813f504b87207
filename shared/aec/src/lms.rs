//! Least Mean Squares echo canceller.
//!
//! ```text
//! y[n]  = w·x[n]          (estimated echo)
//! e[n]  = mic[n] - y[n]   (output: echo-free estimate)
//! w    += mu * e[n] * x[n]
//! ```
//!
//! `mu` is fixed for the whole run. Stability needs roughly
//! `mu < 2 / (filter_size * P_x)`, so loud references want a small step.

use crate::canceller::EchoCanceller;
use crate::error::AecResult;
use crate::fir::AdaptiveFir;

pub const DEFAULT_FILTER_SIZE: usize = 256;
pub const DEFAULT_MU: f32 = 0.03;

pub struct Lms {
    fir: AdaptiveFir,
    mu: f32,
}

impl Lms {
    /// Create an LMS canceller. `None` picks the default for that parameter.
    pub fn new(filter_size: Option<usize>, mu: Option<f32>) -> AecResult<Self> {
        Ok(Self {
            fir: AdaptiveFir::new(filter_size.unwrap_or(DEFAULT_FILTER_SIZE))?,
            mu: mu.unwrap_or(DEFAULT_MU),
        })
    }

    pub fn mu(&self) -> f32 {
        self.mu
    }
}

impl EchoCanceller for Lms {
    fn filter_size(&self) -> usize {
        self.fir.len()
    }

    fn process(&mut self, output: &mut [i16], reference: &[i16], input: &[i16]) -> AecResult<()> {
        let mu = self.mu;
        self.fir.process(output, reference, input, |_| mu)
    }

    fn coefficients(&self) -> Vec<f32> {
        self.fir.weights().to_vec()
    }
}
