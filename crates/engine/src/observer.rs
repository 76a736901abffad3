// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress reporting for a grading run.

use hwc_core::Deadline;
use std::path::PathBuf;

/// Something that happened while grading.
#[derive(Debug, Clone, PartialEq)]
pub enum GradingEvent {
    HomeworkSkipped { homework: String, folder: PathBuf },
    HomeworkExpired { homework: String, deadline: Deadline },
    TaskStarted { homework: String, task: String },
    TaskSkipped { homework: String, task: String, reason: String },
    EntryRecorded { homework: String, task: String, entry: String, succeeded: bool },
    TaskFinished { homework: String, task: String, passed: usize, failed: usize },
}

/// Sink for grading progress, passed explicitly through session and task.
pub trait GradingObserver: Send + Sync {
    fn on_event(&self, event: GradingEvent);
}

/// Observer that writes every event to the `tracing` log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl GradingObserver for TracingObserver {
    fn on_event(&self, event: GradingEvent) {
        match event {
            GradingEvent::HomeworkSkipped { homework, folder } => {
                tracing::warn!(
                    %homework,
                    folder = %folder.display(),
                    "homework folder missing, skipping"
                );
            }
            GradingEvent::HomeworkExpired { homework, deadline } => {
                tracing::info!(%homework, %deadline, "homework is past its deadline");
            }
            GradingEvent::TaskStarted { homework, task } => {
                tracing::info!(%homework, %task, "checking task");
            }
            GradingEvent::TaskSkipped { homework, task, reason } => {
                tracing::warn!(%homework, %task, %reason, "skipping task");
            }
            GradingEvent::EntryRecorded { homework, task, entry, succeeded } => {
                tracing::debug!(%homework, %task, %entry, succeeded, "recorded result");
            }
            GradingEvent::TaskFinished { homework, task, passed, failed } => {
                tracing::info!(%homework, %task, passed, failed, "task checked");
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{GradingEvent, GradingObserver};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Observer that records events for assertions
    #[derive(Clone, Default)]
    pub struct RecordingObserver {
        events: Arc<Mutex<Vec<GradingEvent>>>,
    }

    impl RecordingObserver {
        pub fn new() -> Self {
            Self::default()
        }

        /// Get all recorded events
        pub fn events(&self) -> Vec<GradingEvent> {
            self.events.lock().clone()
        }
    }

    impl GradingObserver for RecordingObserver {
        fn on_event(&self, event: GradingEvent) {
            self.events.lock().push(event);
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::RecordingObserver;
