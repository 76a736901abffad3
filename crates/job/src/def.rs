// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job file definitions

use crate::toolchain::Toolchain;
use hwc_core::{Deadline, ExpectedOutput, OutputType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_compiler_flags() -> String {
    "-Wall".to_string()
}

fn default_binary_name() -> String {
    "main".to_string()
}

/// Top-level job description as written in the job file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobDef {
    /// Grading root holding one folder per homework
    pub folder: String,
    /// Extra environment for every command
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub toolchain: Toolchain,
    pub homeworks: Vec<HomeworkDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HomeworkDef {
    pub name: String,
    /// Folder relative to the grading root
    pub folder: String,
    #[serde(default)]
    pub deadline: Deadline,
    #[serde(default)]
    pub tasks: Vec<TaskDef>,
}

/// Language of a task's submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Bash,
}

hwc_core::simple_display! {
    Language {
        Cpp => "cpp",
        Bash => "bash",
    }
}

/// How a C++ task is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    /// CMake project built in `<task>/build`
    #[default]
    Cmake,
    /// Single source file compiled in place
    Simple,
}

hwc_core::simple_display! {
    BuildType {
        Cmake => "cmake",
        Simple => "simple",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskDef {
    pub name: String,
    pub language: Language,
    /// Folder relative to the homework folder
    pub folder: String,
    #[serde(default)]
    pub output_type: OutputType,
    #[serde(default = "default_compiler_flags")]
    pub compiler_flags: String,
    #[serde(default = "default_binary_name")]
    pub binary_name: String,
    /// Shell text appended to every test command, e.g. `| head -n 1`
    #[serde(default)]
    pub pipe_through: String,
    #[serde(default)]
    pub build_type: BuildType,
    /// Folders staged around the build step
    #[serde(default)]
    pub inject_folders: Vec<String>,
    #[serde(default)]
    pub tests: Vec<TestDef>,
}

impl TaskDef {
    /// Task with every optional field at its default.
    pub fn new(name: impl Into<String>, language: Language, folder: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language,
            folder: folder.into(),
            output_type: OutputType::default(),
            compiler_flags: default_compiler_flags(),
            binary_name: default_binary_name(),
            pipe_through: String::new(),
            build_type: BuildType::default(),
            inject_folders: Vec::new(),
            tests: Vec::new(),
        }
    }

    /// Whether the task builds a CMake project.
    pub fn is_project(&self) -> bool {
        self.language == Language::Cpp && self.build_type == BuildType::Cmake
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestDef {
    pub name: String,
    /// Arguments appended to the run command
    #[serde(default)]
    pub input: Option<String>,
    /// Folders staged around this test only
    #[serde(default)]
    pub inject_folders: Vec<String>,
    /// Run the project's own test suite instead of the binary
    #[serde(default)]
    pub run_gtests: bool,
    #[serde(default)]
    pub expected_output: Option<ExpectedOutput>,
}

impl TestDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: None,
            inject_folders: Vec::new(),
            run_gtests: false,
            expected_output: None,
        }
    }

    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn expect(mut self, expected: impl Into<ExpectedOutput>) -> Self {
        self.expected_output = Some(expected.into());
        self
    }
}
