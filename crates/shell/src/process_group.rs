// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Forced termination of a whole process group.

use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;

/// Send SIGKILL to every member of the process group led by `pgid`.
///
/// A group that is already gone is not an error.
pub fn kill_process_group(pgid: u32) {
    let Ok(raw) = i32::try_from(pgid) else {
        tracing::warn!(pgid, "process group id out of range");
        return;
    };
    match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => tracing::warn!(pgid, error = %e, "failed to kill process group"),
    }
}
