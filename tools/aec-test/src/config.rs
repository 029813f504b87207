use aec_algo::driver::{PerfOptions, DEFAULT_BLOCK_SIZE, DEFAULT_SAMPLE_RATE};
use aec_algo::{AlgorithmConfig, Variant};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "aec-test", about = "Offline LMS/NLMS echo-cancellation test bench")]
pub struct Args {
    /// Feedback (loudspeaker reference) file, raw i16 PCM
    #[arg(long)]
    pub fb: Option<PathBuf>,

    /// Microphone capture file, raw i16 PCM
    #[arg(long)]
    pub mic: Option<PathBuf>,

    /// Adaptive filter length (0 = algorithm default)
    #[arg(long, default_value_t = 0)]
    pub filter_size: usize,

    /// LMS step size (0 = algorithm default); not accepted with --nlms
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub mu: f32,

    /// Use the NLMS (power-normalized) variant
    #[arg(long, default_value_t = false)]
    pub nlms: bool,

    /// Measure per-block latency (slower, with a pause between blocks)
    #[arg(long, default_value_t = false)]
    pub perf: bool,

    /// Signal sample rate, only used for the real-time budget
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: u32,

    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    #[arg(long, default_value = "output.raw")]
    pub output: PathBuf,

    #[arg(long, default_value = "filter.raw")]
    pub filter_output: PathBuf,

    /// Pause between timed blocks, e.g. "10ms"
    #[arg(long, default_value = "10ms")]
    pub perf_delay: String,

    /// Write the performance summary as JSON to this path
    #[arg(long)]
    pub report_json: Option<PathBuf>,
}

/// Everything a run needs, resolved once from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub feedback: PathBuf,
    pub microphone: PathBuf,
    pub algorithm: AlgorithmConfig,
    pub block_size: usize,
    pub perf: Option<PerfOptions>,
    pub output: PathBuf,
    pub filter_output: PathBuf,
    pub report_json: Option<PathBuf>,
}

impl RunConfig {
    pub fn resolve(args: Args) -> Result<Self> {
        let (Some(feedback), Some(microphone)) = (args.fb, args.mic) else {
            return Err(anyhow!("can not process, missing parameters: --fb and --mic are required"));
        };
        if args.block_size == 0 {
            return Err(anyhow!("--block-size must be > 0"));
        }
        if args.sample_rate == 0 {
            return Err(anyhow!("--sample-rate must be > 0"));
        }

        let algorithm = AlgorithmConfig {
            filter_size: args.filter_size,
            step_size: args.mu,
            variant: if args.nlms { Variant::Nlms } else { Variant::Lms },
        };
        algorithm.validate().context("invalid algorithm parameters")?;

        let perf = if args.perf {
            let inter_block_delay =
                humantime::parse_duration(&args.perf_delay).context("parse --perf-delay")?;
            Some(PerfOptions { sample_rate: args.sample_rate, inter_block_delay })
        } else {
            None
        };

        Ok(Self {
            feedback,
            microphone,
            algorithm,
            block_size: args.block_size,
            perf,
            output: args.output,
            filter_output: args.filter_output,
            report_json: args.report_json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("aec-test").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cfg = RunConfig::resolve(parse(&["--fb=a.raw", "--mic=b.raw"])).unwrap();
        assert_eq!(cfg.feedback, PathBuf::from("a.raw"));
        assert_eq!(cfg.microphone, PathBuf::from("b.raw"));
        assert_eq!(cfg.algorithm, AlgorithmConfig::default());
        assert_eq!(cfg.block_size, 256);
        assert!(cfg.perf.is_none());
        assert_eq!(cfg.output, PathBuf::from("output.raw"));
        assert_eq!(cfg.filter_output, PathBuf::from("filter.raw"));
    }

    #[test]
    fn all_flags() {
        let cfg = RunConfig::resolve(parse(&[
            "--fb=a.raw",
            "--mic=b.raw",
            "--filter-size=512",
            "--mu=-0.25",
            "--perf",
            "--sample-rate=16000",
            "--perf-delay=2ms",
        ]))
        .unwrap();
        assert_eq!(cfg.algorithm.filter_size, 512);
        assert_eq!(cfg.algorithm.step_size, -0.25);
        assert_eq!(cfg.algorithm.variant, Variant::Lms);
        let perf = cfg.perf.unwrap();
        assert_eq!(perf.sample_rate, 16000);
        assert_eq!(perf.inter_block_delay, std::time::Duration::from_millis(2));
    }

    #[test]
    fn missing_paths_are_fatal() {
        assert!(RunConfig::resolve(parse(&["--fb=a.raw"])).is_err());
        assert!(RunConfig::resolve(parse(&["--mic=b.raw"])).is_err());
    }

    #[test]
    fn nlms_rejects_mu() {
        let err = RunConfig::resolve(parse(&["--fb=a", "--mic=b", "--nlms", "--mu=0.5"])).unwrap_err();
        assert!(format!("{err:#}").contains("NLMS"));
        let cfg = RunConfig::resolve(parse(&["--fb=a", "--mic=b", "--nlms"])).unwrap();
        assert_eq!(cfg.algorithm.variant, Variant::Nlms);
    }

    #[test]
    fn bad_perf_delay() {
        assert!(RunConfig::resolve(parse(&["--fb=a", "--mic=b", "--perf", "--perf-delay=soon"])).is_err());
    }
}
