// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hwc-engine: Builds and tests student submissions

mod observer;
mod session;
mod stager;
mod task;

pub use observer::{GradingEvent, GradingObserver, TracingObserver};
pub use session::GradingSession;
pub use stager::{FolderStager, StageError, BACKUP_PREFIX};
pub use task::{
    judge, mismatch_message, Task, TaskContext, TaskError, TaskKind, BUILD_DIR,
    STYLE_ERRORS_MARKER,
};

#[cfg(any(test, feature = "test-support"))]
pub use observer::RecordingObserver;
