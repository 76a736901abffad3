// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build-and-test lifecycle of one submitted task.
//!
//! A task is built once (with its task-level fixtures staged), then every
//! test runs in declared order with its own fixtures staged around it, and
//! finally the sources are style-checked. A failed build ends the task with
//! only the build entry recorded.

use crate::observer::{GradingEvent, GradingObserver};
use crate::stager::{FolderStager, StageError};
use hwc_core::{
    convert, convert_expected, CommandResult, OutputType, TaskResults, BUILD_KEY, STYLE_KEY,
};
use hwc_job::{BuildType, Language, TaskDef, TestDef, Toolchain};
use hwc_shell::{run_command, Env};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory, under a CMake task's folder, that commands run in.
pub const BUILD_DIR: &str = "build";

/// Marker that cpplint prints when it found style violations.
pub const STYLE_ERRORS_MARKER: &str = "Total errors found";

/// Errors that stop a task before it produced results
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task folder {} does not exist", .0.display())]
    MissingFolder(PathBuf),
    #[error("failed to create build directory {}: {source}", path.display())]
    BuildDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Stage(#[from] StageError),
}

/// Kind of submission, selected by the task's language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Cpp(BuildType),
    Bash,
}

impl TaskKind {
    pub fn of(def: &TaskDef) -> Self {
        match def.language {
            Language::Cpp => TaskKind::Cpp(def.build_type),
            Language::Bash => TaskKind::Bash,
        }
    }

    fn is_project(self) -> bool {
        self == TaskKind::Cpp(BuildType::Cmake)
    }
}

/// Shared settings every task of a job runs with.
#[derive(Debug, Clone, Copy)]
pub struct TaskContext<'a> {
    pub toolchain: &'a Toolchain,
    pub env: &'a Env,
    /// Directory relative fixture paths resolve against
    pub base_dir: &'a Path,
    /// Homework label used when reporting progress
    pub homework: &'a str,
}

/// A task definition bound to one student folder.
pub struct Task<'a> {
    def: &'a TaskDef,
    kind: TaskKind,
    ctx: TaskContext<'a>,
    task_dir: PathBuf,
    work_dir: PathBuf,
    stager: FolderStager,
}

impl<'a> Task<'a> {
    /// Bind `def` to `task_dir`, creating the build directory of CMake tasks.
    pub fn new(
        def: &'a TaskDef,
        task_dir: PathBuf,
        ctx: TaskContext<'a>,
    ) -> Result<Self, TaskError> {
        if !task_dir.is_dir() {
            return Err(TaskError::MissingFolder(task_dir));
        }
        let kind = TaskKind::of(def);
        let work_dir = if kind.is_project() {
            let build_dir = task_dir.join(BUILD_DIR);
            std::fs::create_dir_all(&build_dir)
                .map_err(|source| TaskError::BuildDir { path: build_dir.clone(), source })?;
            build_dir
        } else {
            task_dir.clone()
        };
        let stager = FolderStager::new(&task_dir, ctx.base_dir);
        Ok(Self { def, kind, ctx, task_dir, work_dir, stager })
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Directory the build and test commands run in.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build, test and style-check the submission.
    pub async fn check_all_tests(
        &mut self,
        observer: &dyn GradingObserver,
    ) -> Result<TaskResults, TaskError> {
        let def = self.def;
        let mut results = TaskResults::new();

        let staged = self.stager.stage_all(&def.inject_folders)?;
        let build = self.build_if_needed().await;
        self.stager.unstage_all(&staged)?;

        if let Some(build) = build {
            let succeeded = build.succeeded();
            self.report(observer, BUILD_KEY, &build);
            results.set_build(build);
            if !succeeded {
                return Ok(results);
            }
        }

        for test in &def.tests {
            let staged = self.stager.stage_all(&test.inject_folders)?;
            let result = self.run_test(test).await;
            self.stager.unstage_all(&staged)?;
            self.report(observer, &test.name, &result);
            results.insert_test(test.name.clone(), result);
        }

        if let Some(style) = self.style_errors().await {
            self.report(observer, STYLE_KEY, &style);
            results.set_style_errors(style);
        }
        Ok(results)
    }

    /// Build the submission; `None` when the task kind has no build step.
    pub async fn build_if_needed(&self) -> Option<CommandResult> {
        let (command, timeout) = self.ctx.toolchain.build_command(self.def)?;
        Some(run_command(&command, &self.work_dir, self.ctx.env, timeout).await)
    }

    /// Run one test and judge its output.
    pub async fn run_test(&self, test: &TestDef) -> CommandResult {
        if test.run_gtests {
            if !self.kind.is_project() {
                return CommandResult::failed(format!(
                    "Test suite can only run for cmake C++ tasks, but task '{}' is {}",
                    self.def.name,
                    self.describe()
                ));
            }
            let (command, timeout) = self.ctx.toolchain.test_suite_command(self.def);
            return run_command(&command, &self.work_dir, self.ctx.env, timeout).await;
        }

        let (command, timeout) = self.ctx.toolchain.run_command(self.def, test.input.as_deref());
        let result = run_command(&command, &self.work_dir, self.ctx.env, timeout).await;
        judge(self.def.output_type, test, result)
    }

    /// Style findings, if the checker reported any.
    pub async fn style_errors(&self) -> Option<CommandResult> {
        if self.kind == TaskKind::Bash {
            return None;
        }
        let (command, timeout) = self.ctx.toolchain.style_command(self.def);
        let result = run_command(&command, &self.task_dir, self.ctx.env, timeout).await;
        result.stderr().contains(STYLE_ERRORS_MARKER).then_some(result)
    }

    fn describe(&self) -> String {
        match self.kind {
            TaskKind::Cpp(build_type) => format!("a {} C++ task", build_type),
            TaskKind::Bash => "a bash task".to_string(),
        }
    }

    fn report(&self, observer: &dyn GradingObserver, entry: &str, result: &CommandResult) {
        observer.on_event(GradingEvent::EntryRecorded {
            homework: self.ctx.homework.to_string(),
            task: self.def.name.clone(),
            entry: entry.to_string(),
            succeeded: result.succeeded(),
        });
    }
}

/// Compare a finished run against the test's expected output.
///
/// Failed runs and tests without an expected output keep the raw result.
pub fn judge(output_type: OutputType, test: &TestDef, result: CommandResult) -> CommandResult {
    if !result.succeeded() {
        return result;
    }
    let Some(expected) = &test.expected_output else {
        return result;
    };
    let actual = match convert(output_type, result.stdout()) {
        Ok(value) => value,
        Err(e) => return result.into_failure(e.to_string()),
    };
    let expected = match convert_expected(output_type, expected) {
        Ok(value) => value,
        Err(e) => return result.into_failure(e.to_string()),
    };
    if actual == expected {
        return result;
    }
    let message = mismatch_message(test.input.as_deref().unwrap_or(""), &actual, &expected);
    result.into_failure(message)
}

/// Diagnostic shown to students when their output differs.
pub fn mismatch_message(
    input: &str,
    actual: &impl fmt::Display,
    expected: &impl fmt::Display,
) -> String {
    format!("Given input: '{}'\nYour output '{}'\nExpected output: '{}'", input, actual, expected)
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
