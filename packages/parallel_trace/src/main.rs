#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Runs the standard trace benchmark: 1000 matrices of 50x50 values, measured with
//! 1, 2, 4 and 8 worker threads.
//!
//! Diagnostics go to stderr and are controlled by `RUST_LOG` (default `warn`).

use std::io;
use std::process::ExitCode;

use parallel_trace::{BenchConfig, run_benchmark};
use tracing::debug;
use tracing_subscriber::EnvFilter;

// Binary entry point - mutations would require subprocess testing which is impractical.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = BenchConfig::default();

    match run_benchmark(&config, &mut io::stdout().lock()) {
        Ok(reports) => {
            debug!(runs = reports.len(), "benchmark complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
