// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hwc-shell: Run shell commands in their own process group with a
//! wall-clock budget.
//!
//! Submitted programs may fork; on timeout the whole process group is
//! killed so nothing outlives the test that started it.

mod process_group;
mod runner;

pub use process_group::kill_process_group;
pub use runner::{run_command, Env, DRAIN_TIMEOUT};
