use aec_algo::{BlockDriver, PerfSummary};
use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser};
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

mod config;
mod pcm;

use config::{Args, RunConfig};

/// Exit status for every fatal error (bad flags, missing inputs, I/O).
const EXIT_FATAL: i32 = -1;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let args = match Args::try_parse() {
        Ok(a) => a,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(EXIT_FATAL);
        }
    };

    if let Err(e) = run(args) {
        error!("{e:#}");
        std::process::exit(EXIT_FATAL);
    }
}

fn run(args: Args) -> Result<()> {
    let cfg = RunConfig::resolve(args)?;

    info!("read feedback: {}", cfg.feedback.display());
    let fb = pcm::read_all::<i16>(&cfg.feedback)?;
    info!("    {} samples", fb.len());
    info!("read microphone: {}", cfg.microphone.display());
    let mic = pcm::read_all::<i16>(&cfg.microphone)?;
    info!("    {} samples", mic.len());

    let mut driver = BlockDriver::configure(&cfg.algorithm, cfg.block_size)?;
    if let Some(perf) = cfg.perf {
        driver = driver.with_perf(perf);
    }
    info!("***********************");
    info!("** {:^17} **", cfg.algorithm.variant.to_string());
    info!("***********************");

    let run = driver.run(&fb, &mic)?;

    match &run.perf {
        Some(summary) => {
            log_summary(summary);
            if let Some(path) = cfg.report_json.as_deref() {
                std::fs::write(path, serde_json::to_vec_pretty(summary)?)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("wrote {}", path.display());
            }
        }
        None if cfg.perf.is_some() => warn!("performance mode: no complete block was processed"),
        None => {}
    }

    pcm::write_all(&cfg.output, &run.output)?;
    info!("wrote {} ({} samples)", cfg.output.display(), run.output.len());
    pcm::write_all(&cfg.filter_output, &run.coefficients)?;
    info!("wrote {} ({} coefficients)", cfg.filter_output.display(), run.coefficients.len());
    Ok(())
}

fn log_summary(s: &PerfSummary) {
    info!("performance result:");
    info!("    blockSize={} sample", s.block_size);
    info!("    min={} ns", s.min_ns);
    info!("    max={} ns", s.max_ns);
    info!("    avg={} ns", s.avg_ns);
    info!("    min={:.3} %", s.min_pct);
    info!("    max={:.3} %", s.max_pct);
    info!("    avg={:.3} %", s.avg_pct);
}
