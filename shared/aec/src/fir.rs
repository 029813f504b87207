//! Adaptive FIR state shared by the LMS and NLMS cancellers.
//!
//! Samples are handled in the normalized float domain (`i16 / 32768`). The
//! reference history is a ring buffer that persists across blocks, so every
//! block's adaptation depends on all blocks fed before it.

use crate::error::{AecError, AecResult};

const PCM_SCALE: f32 = 32768.0;

pub(crate) struct AdaptiveFir {
    /// Filter taps; tap `k` weights the reference sample `k` steps back.
    weights: Vec<f32>,
    /// Reference history (ring buffer, same length as `weights`).
    history: Vec<f32>,
    /// Next write position in `history`.
    pos: usize,
}

impl AdaptiveFir {
    pub(crate) fn new(filter_size: usize) -> AecResult<Self> {
        if filter_size == 0 {
            return Err(AecError::InvalidArgument("filter size must be > 0"));
        }
        Ok(Self {
            weights: vec![0.0; filter_size],
            history: vec![0.0; filter_size],
            pos: 0,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.weights.len()
    }

    pub(crate) fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Run one block through the filter. `step` maps the current reference
    /// window power (x·x) to the adaptation step for that sample.
    pub(crate) fn process<F>(
        &mut self,
        output: &mut [i16],
        reference: &[i16],
        input: &[i16],
        step: F,
    ) -> AecResult<()>
    where
        F: Fn(f32) -> f32,
    {
        if reference.len() != output.len() || input.len() != output.len() {
            return Err(AecError::InvalidArgument(
                "output, reference and input windows must have the same length",
            ));
        }

        for ((out, &r), &m) in output.iter_mut().zip(reference).zip(input) {
            self.push(r as f32 / PCM_SCALE);

            let (echo_est, ref_power) = self.estimate();
            let error = m as f32 / PCM_SCALE - echo_est;
            self.adapt(step(ref_power) * error);

            *out = to_pcm(error);
        }
        Ok(())
    }

    fn push(&mut self, sample: f32) {
        self.history[self.pos] = sample;
        self.pos = (self.pos + 1) % self.history.len();
    }

    fn tap(&self, k: usize) -> f32 {
        let len = self.history.len();
        self.history[(self.pos + len - 1 - k) % len]
    }

    /// Estimated echo (w·x) and reference power (x·x) in one pass.
    fn estimate(&self) -> (f32, f32) {
        let mut echo_est = 0.0f32;
        let mut ref_power = 0.0f32;
        for (k, &w) in self.weights.iter().enumerate() {
            let x = self.tap(k);
            echo_est += w * x;
            ref_power += x * x;
        }
        (echo_est, ref_power)
    }

    fn adapt(&mut self, scaled_error: f32) {
        if scaled_error == 0.0 {
            return;
        }
        for k in 0..self.weights.len() {
            let x = self.tap(k);
            self.weights[k] += scaled_error * x;
        }
    }
}

fn to_pcm(v: f32) -> i16 {
    (v.clamp(-1.0, 1.0) * PCM_SCALE).round().clamp(-32768.0, 32767.0) as i16
}
