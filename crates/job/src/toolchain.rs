// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commands used to build, run and lint submissions.
//!
//! Every command is a template expanded with [`interpolate`]:
//! `${binary}` is the task's binary name, `${flags}` its compiler flags and
//! `${args}` the test input. Timeouts are in seconds.

use crate::def::{BuildType, Language, TaskDef};
use crate::template::interpolate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

fn default_cmake_build() -> String {
    "cmake .. && make -j2".to_string()
}

fn default_simple_build() -> String {
    "clang++ -std=c++14 -o ${binary} ${flags} ${binary}.cpp".to_string()
}

fn default_cpp_run() -> String {
    "./${binary} ${args}".to_string()
}

fn default_bash_run() -> String {
    "sh ${binary}.sh ${args}".to_string()
}

fn default_test_suite() -> String {
    "make clean && rm -r * && cmake .. && make -j2 && ctest -VV".to_string()
}

fn default_style_check() -> String {
    concat!(
        "cpplint --counting=detailed ",
        "--filter=-legal,-readability/todo,-build/include_order,",
        "-runtime/threadsafe_fn,-runtime/arrays ",
        "$( find . -name \"*.h\" -o -name \"*.cpp\" | grep -vE \"^./build/\" )"
    )
    .to_string()
}

fn default_build_timeout() -> u64 {
    60
}

fn default_test_timeout() -> u64 {
    20
}

fn default_test_suite_timeout() -> u64 {
    60
}

fn default_style_timeout() -> u64 {
    20
}

/// Command templates and their timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Toolchain {
    /// Build of a CMake project, run in `<task>/build`
    #[serde(default = "default_cmake_build")]
    pub cmake_build: String,
    /// Build of a single-file C++ task, run in the task folder
    #[serde(default = "default_simple_build")]
    pub simple_build: String,
    #[serde(default = "default_cpp_run")]
    pub cpp_run: String,
    #[serde(default = "default_bash_run")]
    pub bash_run: String,
    /// Rebuild and run the project's own test suite
    #[serde(default = "default_test_suite")]
    pub test_suite: String,
    /// Style checker; findings are reported on stderr
    #[serde(default = "default_style_check")]
    pub style_check: String,
    #[serde(default = "default_build_timeout")]
    pub build_timeout: u64,
    #[serde(default = "default_test_timeout")]
    pub test_timeout: u64,
    #[serde(default = "default_test_suite_timeout")]
    pub test_suite_timeout: u64,
    #[serde(default = "default_style_timeout")]
    pub style_timeout: u64,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            cmake_build: default_cmake_build(),
            simple_build: default_simple_build(),
            cpp_run: default_cpp_run(),
            bash_run: default_bash_run(),
            test_suite: default_test_suite(),
            style_check: default_style_check(),
            build_timeout: default_build_timeout(),
            test_timeout: default_test_timeout(),
            test_suite_timeout: default_test_suite_timeout(),
            style_timeout: default_style_timeout(),
        }
    }
}

/// Values substituted into a command template.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandVars<'a> {
    pub binary: &'a str,
    pub flags: &'a str,
    pub args: &'a str,
}

impl<'a> CommandVars<'a> {
    pub fn for_task(task: &'a TaskDef) -> Self {
        Self { binary: &task.binary_name, flags: &task.compiler_flags, args: "" }
    }

    pub fn with_args(self, args: &'a str) -> Self {
        Self { args, ..self }
    }

    fn render(&self, template: &str) -> String {
        let vars: HashMap<&str, &str> =
            [("binary", self.binary), ("flags", self.flags), ("args", self.args)].into();
        interpolate(template, &vars)
    }
}

impl Toolchain {
    /// Build command and timeout for `task`, or `None` when nothing is built.
    pub fn build_command(&self, task: &TaskDef) -> Option<(String, Duration)> {
        let vars = CommandVars::for_task(task);
        match (task.language, task.build_type) {
            (Language::Bash, _) => None,
            (Language::Cpp, BuildType::Cmake) => {
                Some((vars.render(&self.cmake_build), secs(self.build_timeout)))
            }
            (Language::Cpp, BuildType::Simple) => {
                Some((vars.render(&self.simple_build), secs(self.test_timeout)))
            }
        }
    }

    /// Command running the submission once with `input` as arguments,
    /// followed by the task's pipe filter.
    pub fn run_command(&self, task: &TaskDef, input: Option<&str>) -> (String, Duration) {
        let template = match task.language {
            Language::Cpp => &self.cpp_run,
            Language::Bash => &self.bash_run,
        };
        let vars = CommandVars::for_task(task).with_args(input.unwrap_or(""));
        let mut command = vars.render(template);
        if !task.pipe_through.is_empty() {
            command.push(' ');
            command.push_str(&task.pipe_through);
        }
        (command, secs(self.test_timeout))
    }

    pub fn test_suite_command(&self, task: &TaskDef) -> (String, Duration) {
        (CommandVars::for_task(task).render(&self.test_suite), secs(self.test_suite_timeout))
    }

    pub fn style_command(&self, task: &TaskDef) -> (String, Duration) {
        (CommandVars::for_task(task).render(&self.style_check), secs(self.style_timeout))
    }
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[cfg(test)]
#[path = "toolchain_tests.rs"]
mod tests;
