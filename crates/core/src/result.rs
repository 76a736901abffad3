// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome of a single subprocess invocation.
//!
//! Success is decided once, when the result is built, and never recomputed
//! from the other fields. A result produced by a finished process succeeds
//! iff it exited with code 0; [`CommandResult::into_failure`] derives a new,
//! failed result that carries a diagnostic in place of the process stderr.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Exit code that marks a successful process.
pub const SUCCESS_EXIT_CODE: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    succeeded: bool,
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl CommandResult {
    /// Result of a process that ran to completion.
    ///
    /// `exit_code` is `None` when the process was terminated by a signal.
    pub fn from_exit(
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            succeeded: exit_code == Some(SUCCESS_EXIT_CODE),
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Result of a command that was killed after running past `timeout`.
    pub fn timed_out(command: &str, timeout: Duration, stdout: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            exit_code: None,
            stdout: stdout.into(),
            stderr: timeout_message(command, timeout),
        }
    }

    /// Result of a command that could not be started at all.
    pub fn spawn_failed(command: &str, error: &std::io::Error) -> Self {
        Self {
            succeeded: false,
            exit_code: None,
            stdout: String::new(),
            stderr: format!("failed to start command '{}': {}", command.trim(), error),
        }
    }

    /// Failed result for a step that could not run, carrying `message` as stderr.
    pub fn failed(message: impl Into<String>) -> Self {
        Self { succeeded: false, exit_code: None, stdout: String::new(), stderr: message.into() }
    }

    /// Downgrade this result to a failure carrying `message` as its stderr.
    ///
    /// The raw exit code is kept for reference but no longer decides success.
    pub fn into_failure(self, message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            exit_code: self.exit_code,
            stdout: self.stdout,
            stderr: message.into(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stdout = self.stdout.trim();
        if self.stderr.is_empty() {
            write!(f, "{}", stdout)
        } else {
            write!(f, "stdout: {}, stderr: {}", stdout, self.stderr.trim())
        }
    }
}

/// Diagnostic stored in stderr when a command exceeds its time budget.
pub fn timeout_message(command: &str, timeout: Duration) -> String {
    format!(
        "Timeout: command '{}' ran longer than {} seconds",
        command.trim(),
        format_seconds(timeout)
    )
}

/// Whole seconds print as an integer, fractional ones as a decimal.
fn format_seconds(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        duration.as_secs().to_string()
    } else {
        duration.as_secs_f64().to_string()
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
