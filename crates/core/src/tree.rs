// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Nested grading results: homework → task → entry → [`CommandResult`].
//!
//! Besides one entry per test, a task carries two reserved entries (the build
//! outcome and style findings) and a homework carries the reserved expiry
//! marker. Reserved entries are typed fields here and only become string
//! keys when the tree is flattened for rendering or serialization.

use crate::result::CommandResult;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Entry name under which the build outcome is reported.
pub const BUILD_KEY: &str = "0. Build succeeded";
/// Entry name under which style findings are reported.
pub const STYLE_KEY: &str = "0. Style errors";
/// Marker recorded for homeworks past their deadline.
pub const EXPIRED_KEY: &str = "expired";

/// Names a job file may not use for tasks or tests.
pub const RESERVED_NAMES: [&str; 3] = [BUILD_KEY, STYLE_KEY, EXPIRED_KEY];

/// Results of every task of one submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskResults {
    build: Option<CommandResult>,
    tests: IndexMap<String, CommandResult>,
    style_errors: Option<CommandResult>,
}

impl TaskResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_build(&mut self, result: CommandResult) {
        self.build = Some(result);
    }

    pub fn insert_test(&mut self, name: impl Into<String>, result: CommandResult) {
        self.tests.insert(name.into(), result);
    }

    pub fn set_style_errors(&mut self, result: CommandResult) {
        self.style_errors = Some(result);
    }

    pub fn build(&self) -> Option<&CommandResult> {
        self.build.as_ref()
    }

    pub fn test(&self, name: &str) -> Option<&CommandResult> {
        self.tests.get(name)
    }

    pub fn style_errors(&self) -> Option<&CommandResult> {
        self.style_errors.as_ref()
    }

    /// Entry lookup by flattened name, reserved keys included.
    pub fn get(&self, name: &str) -> Option<&CommandResult> {
        match name {
            BUILD_KEY => self.build(),
            STYLE_KEY => self.style_errors(),
            _ => self.test(name),
        }
    }

    /// All entries in report order: build, tests as declared, style.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CommandResult)> {
        self.build
            .iter()
            .map(|r| (BUILD_KEY, r))
            .chain(self.tests.iter().map(|(k, v)| (k.as_str(), v)))
            .chain(self.style_errors.iter().map(|r| (STYLE_KEY, r)))
    }

    /// Number of entries, reserved ones included.
    pub fn len(&self) -> usize {
        self.tests.len()
            + usize::from(self.build.is_some())
            + usize::from(self.style_errors.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    /// Count of (passed, failed) entries.
    pub fn tally(&self) -> (usize, usize) {
        self.entries().fold((0, 0), |(passed, failed), (_, result)| {
            if result.succeeded() {
                (passed + 1, failed)
            } else {
                (passed, failed + 1)
            }
        })
    }
}

impl Serialize for TaskResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, result) in self.entries() {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

/// Results of one homework.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeworkResults {
    expired: bool,
    tasks: IndexMap<String, TaskResults>,
}

impl HomeworkResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_expired(&mut self) {
        self.expired = true;
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn insert_task(&mut self, name: impl Into<String>, results: TaskResults) {
        self.tasks.insert(name.into(), results);
    }

    pub fn task(&self, name: &str) -> Option<&TaskResults> {
        self.tasks.get(name)
    }

    pub fn tasks(&self) -> impl Iterator<Item = (&str, &TaskResults)> {
        self.tasks.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries, the expiry marker included.
    pub fn len(&self) -> usize {
        self.tasks.len() + usize::from(self.expired)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for HomeworkResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        if self.expired {
            map.serialize_entry(EXPIRED_KEY, &true)?;
        }
        for (name, task) in &self.tasks {
            map.serialize_entry(name, task)?;
        }
        map.end()
    }
}

/// Results of a whole grading run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GradingResults {
    homeworks: IndexMap<String, HomeworkResults>,
}

impl GradingResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_homework(&mut self, name: impl Into<String>, results: HomeworkResults) {
        self.homeworks.insert(name.into(), results);
    }

    pub fn homework(&self, name: &str) -> Option<&HomeworkResults> {
        self.homeworks.get(name)
    }

    pub fn homeworks(&self) -> impl Iterator<Item = (&str, &HomeworkResults)> {
        self.homeworks.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.homeworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.homeworks.is_empty()
    }

    /// Count of (passed, failed) entries across the whole tree.
    pub fn tally(&self) -> (usize, usize) {
        self.homeworks
            .values()
            .flat_map(|hw| hw.tasks.values())
            .map(TaskResults::tally)
            .fold((0, 0), |(passed, failed), (p, f)| (passed + p, failed + f))
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
