// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded execution of a single shell command.

use crate::process_group::kill_process_group;
use hwc_core::CommandResult;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

/// Extra environment variables layered over the inherited environment.
pub type Env = BTreeMap<String, String>;

/// How long to keep reading pipes after the process group was killed.
pub const DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// Run `command` through `sh -c` in `cwd` with a wall-clock budget.
///
/// The shell leads a fresh process group. When the budget runs out the
/// entire group receives SIGKILL, output captured so far is kept, and the
/// result carries the timeout diagnostic in stderr. Never returns an
/// error: spawn failures become failed results too.
pub async fn run_command(
    command: &str,
    cwd: &Path,
    env: &Env,
    timeout: Duration,
) -> CommandResult {
    tracing::debug!(command, cwd = %cwd.display(), ?timeout, "running command");

    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(command)
        .current_dir(cwd)
        .envs(env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .process_group(0)
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            tracing::warn!(command, cwd = %cwd.display(), error = %e, "failed to spawn command");
            return CommandResult::spawn_failed(command, &e);
        }
    };

    let pgid = child.id();
    let (Some(mut stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take()) else {
        let missing = std::io::Error::other("output pipes unavailable");
        return CommandResult::spawn_failed(command, &missing);
    };

    let mut out = Vec::new();
    let mut err = Vec::new();

    let finished = tokio::time::timeout(timeout, async {
        let (_, _, status) = tokio::join!(
            read_into(&mut stdout, &mut out),
            read_into(&mut stderr, &mut err),
            child.wait()
        );
        status
    })
    .await;

    match finished {
        Ok(Ok(status)) => {
            let result = CommandResult::from_exit(status.code(), lossy(&out), lossy(&err));
            tracing::debug!(command, exit_code = ?status.code(), "command finished");
            result
        }
        Ok(Err(e)) => {
            tracing::warn!(command, error = %e, "failed to wait for command");
            CommandResult::from_exit(None, lossy(&out), format!("{}{}", lossy(&err), e))
        }
        Err(_) => {
            tracing::warn!(command, ?timeout, "command timed out, killing process group");
            if let Some(pgid) = pgid {
                kill_process_group(pgid);
            }
            // Grandchildren may still hold the write ends until the kill lands
            let _ = tokio::time::timeout(DRAIN_TIMEOUT, async {
                tokio::join!(read_into(&mut stdout, &mut out), read_into(&mut stderr, &mut err))
            })
            .await;
            if let Err(e) = child.wait().await {
                tracing::warn!(command, error = %e, "failed to reap timed out command");
            }
            CommandResult::timed_out(command, timeout, lossy(&out))
        }
    }
}

/// Append everything readable from `pipe` to `buf`.
///
/// Data lands in `buf` as it arrives, so a cancelled read keeps what was
/// already captured.
async fn read_into<R: AsyncRead + Unpin>(pipe: &mut R, buf: &mut Vec<u8>) {
    let mut chunk = [0u8; 8192];
    loop {
        match pipe.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(e) => {
                tracing::debug!(error = %e, "pipe read failed");
                break;
            }
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
