//! The capability contract every adaptive filter implements, and the
//! variant selection that builds one from an [`AlgorithmConfig`].

use std::fmt;

use serde::Serialize;

use crate::error::{AecError, AecResult};
use crate::lms::Lms;
use crate::nlms::Nlms;

/// A stateful adaptive echo canceller.
///
/// Blocks must be fed in strictly increasing, contiguous order: the filter
/// state after each call depends on every block processed before it.
pub trait EchoCanceller {
    /// Effective number of filter taps.
    fn filter_size(&self) -> usize;

    /// Consume one block. `reference` is the loudspeaker feedback, `input`
    /// the microphone capture; the echo-free estimate is written to `output`.
    /// All three windows must have the same length.
    fn process(&mut self, output: &mut [i16], reference: &[i16], input: &[i16]) -> AecResult<()>;

    /// Snapshot of the current filter weights (`filter_size()` values).
    fn coefficients(&self) -> Vec<f32>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Variant {
    #[default]
    Lms,
    Nlms,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Lms => write!(f, "LMS"),
            Variant::Nlms => write!(f, "NLMS (power)"),
        }
    }
}

/// Algorithm selection and tuning. Zero means "use the algorithm default"
/// for both `filter_size` and `step_size`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlgorithmConfig {
    pub filter_size: usize,
    pub step_size: f32,
    pub variant: Variant,
}

impl AlgorithmConfig {
    pub fn validate(&self) -> AecResult<()> {
        if !self.step_size.is_finite() {
            return Err(AecError::InvalidArgument("step size must be finite"));
        }
        if self.variant == Variant::Nlms && self.step_size != 0.0 {
            return Err(AecError::StepSizeNotApplicable);
        }
        Ok(())
    }

    pub fn build(&self) -> AecResult<Canceller> {
        self.validate()?;
        let filter_size = (self.filter_size != 0).then_some(self.filter_size);
        let step_size = (self.step_size != 0.0).then_some(self.step_size);
        Ok(match self.variant {
            Variant::Lms => Canceller::Lms(Lms::new(filter_size, step_size)?),
            Variant::Nlms => Canceller::Nlms(Nlms::new(filter_size)?),
        })
    }
}

/// One of the concrete variants, chosen once at configuration time.
pub enum Canceller {
    Lms(Lms),
    Nlms(Nlms),
}

impl Canceller {
    pub fn variant(&self) -> Variant {
        match self {
            Canceller::Lms(_) => Variant::Lms,
            Canceller::Nlms(_) => Variant::Nlms,
        }
    }
}

impl EchoCanceller for Canceller {
    fn filter_size(&self) -> usize {
        match self {
            Canceller::Lms(a) => a.filter_size(),
            Canceller::Nlms(a) => a.filter_size(),
        }
    }

    fn process(&mut self, output: &mut [i16], reference: &[i16], input: &[i16]) -> AecResult<()> {
        match self {
            Canceller::Lms(a) => a.process(output, reference, input),
            Canceller::Nlms(a) => a.process(output, reference, input),
        }
    }

    fn coefficients(&self) -> Vec<f32> {
        match self {
            Canceller::Lms(a) => a.coefficients(),
            Canceller::Nlms(a) => a.coefficients(),
        }
    }
}
