// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

/// Log filter directive from `HWC_LOG` (e.g. `debug`, `hwc_engine=trace`).
pub fn log_filter() -> Option<String> {
    std::env::var("HWC_LOG").ok().filter(|s| !s.trim().is_empty())
}

/// Default filter when `HWC_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
