// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hwc-job: Job description parsing for the homework checker
//!
//! A job file lists the homeworks to grade, their tasks and the tests of
//! each task. TOML and YAML are accepted, chosen by file extension.

mod def;
mod load;
mod parser;
mod template;
mod toolchain;

pub use def::{BuildType, HomeworkDef, JobDef, Language, TaskDef, TestDef};
pub use load::{expand_home, load_job, resolve_path, Job};
pub use parser::{parse_job_with_format, Format, JobError};
pub use template::interpolate;
pub use toolchain::{CommandVars, Toolchain};
