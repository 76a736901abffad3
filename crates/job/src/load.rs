// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loading a job file from disk

use crate::def::{HomeworkDef, JobDef};
use crate::parser::{parse_job_with_format, Format, JobError};
use crate::toolchain::Toolchain;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A validated job with its paths resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    /// Grading root holding one folder per homework
    pub root: PathBuf,
    /// Directory of the job file; relative fixture paths resolve against it
    pub base_dir: PathBuf,
    pub env: BTreeMap<String, String>,
    pub toolchain: Toolchain,
    pub homeworks: Vec<HomeworkDef>,
}

impl Job {
    /// Resolve a parsed definition against the directory of its job file.
    pub fn from_def(def: JobDef, base_dir: &Path) -> Self {
        Self {
            root: resolve_path(base_dir, &def.folder),
            base_dir: base_dir.to_path_buf(),
            env: def.env,
            toolchain: def.toolchain,
            homeworks: def.homeworks,
        }
    }
}

/// Read, parse and validate the job file at `path`.
pub fn load_job(path: &Path) -> Result<Job, JobError> {
    let format =
        Format::from_path(path).ok_or_else(|| JobError::UnknownFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path)
        .map_err(|source| JobError::Read { path: path.to_path_buf(), source })?;
    let def = parse_job_with_format(&content, format)?;

    let base_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let base_dir = std::path::absolute(&base_dir).unwrap_or(base_dir);
    let job = Job::from_def(def, &base_dir);
    tracing::debug!(
        path = %path.display(),
        %format,
        root = %job.root.display(),
        homeworks = job.homeworks.len(),
        "loaded job"
    );
    Ok(job)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Resolve `raw` against `base_dir` unless it is absolute or home-relative.
pub fn resolve_path(base_dir: &Path, raw: &str) -> PathBuf {
    let expanded = expand_home(raw);
    if expanded.is_absolute() {
        expanded
    } else {
        base_dir.join(expanded)
    }
}

#[cfg(test)]
#[path = "load_tests.rs"]
mod tests;
