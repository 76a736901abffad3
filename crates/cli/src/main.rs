// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hwc: Grade homework submissions described by a job file

mod color;
mod env;
mod exit_error;
mod output;
mod report;

use anyhow::Context;
use clap::Parser;
use exit_error::{ExitError, EXIT_INVALID_JOB};
use hwc_core::SystemClock;
use hwc_engine::{GradingSession, TracingObserver};
use output::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hwc",
    version,
    about = "Build, test and style-check homework submissions",
    styles = color::styles()
)]
struct Cli {
    /// Job file (.toml, .yml or .yaml) describing what to grade
    #[arg(short, long)]
    input: PathBuf,

    /// File the report is written to
    #[arg(short, long)]
    output: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Log debug details (overridden by HWC_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("error: {:#}", e);
        std::process::exit(ExitError::code_of(&e));
    }
}

fn init_tracing(verbose: bool) {
    let filter = env::log_filter()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(env::default_filter(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::debug!(path = %cli.input.display(), "reading job");
    let job = hwc_job::load_job(&cli.input).map_err(|e| {
        ExitError::new(EXIT_INVALID_JOB, format!("invalid job file {}: {}", cli.input.display(), e))
    })?;

    let observer = TracingObserver;
    let results = GradingSession::new(&job, SystemClock, &observer).run().await;

    let report = output::render(&results, cli.format)?;
    tracing::debug!(path = %cli.output.display(), format = ?cli.format, "writing report");
    std::fs::write(&cli.output, report)
        .with_context(|| format!("failed to write report to {}", cli.output.display()))?;

    println!("{}", output::summary(&results, &cli.output));
    Ok(())
}
