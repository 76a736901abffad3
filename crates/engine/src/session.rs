// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A grading run over every homework of a job.

use crate::observer::{GradingEvent, GradingObserver};
use crate::task::{Task, TaskContext};
use hwc_core::{Clock, GradingResults, HomeworkResults};
use hwc_job::{resolve_path, HomeworkDef, Job};

/// Grades the submissions described by a job, one task at a time.
pub struct GradingSession<'a, C: Clock> {
    job: &'a Job,
    clock: C,
    observer: &'a dyn GradingObserver,
}

impl<'a, C: Clock> GradingSession<'a, C> {
    pub fn new(job: &'a Job, clock: C, observer: &'a dyn GradingObserver) -> Self {
        Self { job, clock, observer }
    }

    /// Grade every homework whose folder exists, in declared order.
    pub async fn run(&self) -> GradingResults {
        let mut results = GradingResults::new();
        for homework in &self.job.homeworks {
            if let Some(graded) = self.grade_homework(homework).await {
                results.insert_homework(homework.name.clone(), graded);
            }
        }
        let (passed, failed) = results.tally();
        tracing::info!(homeworks = results.len(), passed, failed, "grading finished");
        results
    }

    async fn grade_homework(&self, homework: &HomeworkDef) -> Option<HomeworkResults> {
        let folder = resolve_path(&self.job.root, &homework.folder);
        if !folder.is_dir() {
            self.observer.on_event(GradingEvent::HomeworkSkipped {
                homework: homework.name.clone(),
                folder,
            });
            return None;
        }

        let mut graded = HomeworkResults::new();
        if homework.deadline.has_passed(self.clock.now()) {
            self.observer.on_event(GradingEvent::HomeworkExpired {
                homework: homework.name.clone(),
                deadline: homework.deadline,
            });
            graded.mark_expired();
        }

        let ctx = TaskContext {
            toolchain: &self.job.toolchain,
            env: &self.job.env,
            base_dir: &self.job.base_dir,
            homework: &homework.name,
        };
        for def in &homework.tasks {
            let task_dir = resolve_path(&folder, &def.folder);
            if !task_dir.is_dir() {
                let reason = format!("folder {} not found", task_dir.display());
                self.skip_task(homework, &def.name, reason);
                continue;
            }
            self.observer.on_event(GradingEvent::TaskStarted {
                homework: homework.name.clone(),
                task: def.name.clone(),
            });

            let checked = match Task::new(def, task_dir, ctx) {
                Ok(mut task) => task.check_all_tests(self.observer).await,
                Err(e) => Err(e),
            };
            match checked {
                Ok(task_results) => {
                    let (passed, failed) = task_results.tally();
                    self.observer.on_event(GradingEvent::TaskFinished {
                        homework: homework.name.clone(),
                        task: def.name.clone(),
                        passed,
                        failed,
                    });
                    graded.insert_task(def.name.clone(), task_results);
                }
                Err(e) => self.skip_task(homework, &def.name, e.to_string()),
            }
        }
        Some(graded)
    }

    fn skip_task(&self, homework: &HomeworkDef, task: &str, reason: String) {
        self.observer.on_event(GradingEvent::TaskSkipped {
            homework: homework.name.clone(),
            task: task.to_string(),
            reason,
        });
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
