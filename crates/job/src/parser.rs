// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job file parsing and validation

use crate::def::{JobDef, TaskDef};
use hwc_core::RESERVED_NAMES;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Syntax of a job file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Yaml,
}

hwc_core::simple_display! {
    Format {
        Toml => "toml",
        Yaml => "yaml",
    }
}

impl Format {
    /// Format implied by a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Format::Toml),
            "yml" | "yaml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// Errors from loading a job file
#[derive(Debug, Error)]
pub enum JobError {
    #[error("failed to read job file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported job file extension: {} (expected .toml, .yml or .yaml)", .0.display())]
    UnknownFormat(PathBuf),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid job at {location}: {message}")]
    InvalidFormat { location: String, message: String },
}

impl JobError {
    fn invalid(location: impl Into<String>, message: impl Into<String>) -> Self {
        JobError::InvalidFormat { location: location.into(), message: message.into() }
    }
}

/// Parse and validate a job description.
pub fn parse_job_with_format(content: &str, format: Format) -> Result<JobDef, JobError> {
    let job: JobDef = match format {
        Format::Toml => toml::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
    };
    validate(&job)?;
    Ok(job)
}

fn validate(job: &JobDef) -> Result<(), JobError> {
    if job.folder.trim().is_empty() {
        return Err(JobError::invalid("folder", "must not be empty"));
    }

    let mut homework_names = HashSet::new();
    for (h, homework) in job.homeworks.iter().enumerate() {
        let loc = format!("homeworks[{}]", h);
        check_name(&loc, &homework.name)?;
        if !homework_names.insert(homework.name.as_str()) {
            return Err(JobError::invalid(
                format!("{}.name", loc),
                format!("duplicate homework '{}'", homework.name),
            ));
        }
        if homework.folder.trim().is_empty() {
            return Err(JobError::invalid(format!("{}.folder", loc), "must not be empty"));
        }

        let mut task_names = HashSet::new();
        for (t, task) in homework.tasks.iter().enumerate() {
            let loc = format!("{}.tasks[{}]", loc, t);
            check_name(&loc, &task.name)?;
            if !task_names.insert(task.name.as_str()) {
                return Err(JobError::invalid(
                    format!("{}.name", loc),
                    format!("duplicate task '{}' in homework '{}'", task.name, homework.name),
                ));
            }
            if task.folder.trim().is_empty() {
                return Err(JobError::invalid(format!("{}.folder", loc), "must not be empty"));
            }
            if task.binary_name.trim().is_empty() {
                return Err(JobError::invalid(format!("{}.binary_name", loc), "must not be empty"));
            }
            validate_tests(&loc, task)?;
        }
    }
    Ok(())
}

fn validate_tests(task_loc: &str, task: &TaskDef) -> Result<(), JobError> {
    let mut test_names = HashSet::new();
    for (i, test) in task.tests.iter().enumerate() {
        let loc = format!("{}.tests[{}]", task_loc, i);
        check_name(&loc, &test.name)?;
        if !test_names.insert(test.name.as_str()) {
            return Err(JobError::invalid(
                format!("{}.name", loc),
                format!("duplicate test '{}' in task '{}'", test.name, task.name),
            ));
        }
        if test.run_gtests && !task.is_project() {
            return Err(JobError::invalid(
                format!("{}.run_gtests", loc),
                "only cmake C++ tasks can run their test suite",
            ));
        }
    }
    Ok(())
}

fn check_name(loc: &str, name: &str) -> Result<(), JobError> {
    if name.trim().is_empty() {
        return Err(JobError::invalid(format!("{}.name", loc), "must not be empty"));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(JobError::invalid(format!("{}.name", loc), format!("'{}' is reserved", name)));
    }
    Ok(())
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
