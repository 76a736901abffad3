// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use hwc_core::GradingResults;
use std::path::Path;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Render the report in the requested format.
pub fn render(results: &GradingResults, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Markdown => Ok(crate::report::markdown(results)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(results)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// One-line summary of a grading run.
pub fn summary(results: &GradingResults, report_path: &Path) -> String {
    let (passed, failed) = results.tally();
    format!(
        "Graded {} homework(s): {}, {} ({})",
        results.len(),
        crate::color::passed(&format!("{} passed", passed)),
        crate::color::failed(&format!("{} failed", failed)),
        crate::color::context(&format!("report: {}", report_path.display())),
    )
}
