// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Staging of grader-supplied folders into a submission.
//!
//! Staging `dest` moves any existing `<task>/<dest>` aside into a backup
//! area and copies the fixture in its place. Unstaging removes the copy and
//! moves the original back. The backup area is a freshly created
//! `<task>/.hwc-backup*` directory that exists only while at least one
//! folder is staged, so it never collides with anything in the submission.

use hwc_job::resolve_path;
use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use walkdir::WalkDir;

/// Prefix of the backup area created inside a task folder.
pub const BACKUP_PREFIX: &str = ".hwc-backup";

/// Errors from staging operations
#[derive(Debug, Error)]
pub enum StageError {
    #[error("fixture folder {} does not exist", .0.display())]
    MissingSource(PathBuf),
    #[error("'{0}' is not a valid folder name to stage")]
    InvalidName(String),
    #[error("'{0}' is already staged")]
    AlreadyStaged(String),
    #[error("'{0}' is not staged")]
    NotStaged(String),
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_err<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> StageError + 'a {
    move |source| StageError::Io { action, path: path.to_path_buf(), source }
}

/// Stages fixture folders into one task folder.
///
/// Every staged name maps to the location of its backup, or `None` when
/// the destination did not exist before staging.
#[derive(Debug)]
pub struct FolderStager {
    task_dir: PathBuf,
    base_dir: PathBuf,
    staged: BTreeMap<String, Option<PathBuf>>,
    backup: Option<TempDir>,
}

impl FolderStager {
    /// `base_dir` anchors relative fixture paths (the job file's directory).
    pub fn new(task_dir: impl Into<PathBuf>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            task_dir: task_dir.into(),
            base_dir: base_dir.into(),
            staged: BTreeMap::new(),
            backup: None,
        }
    }

    /// Current backup area, present only while something is staged.
    pub fn backup_dir(&self) -> Option<&Path> {
        self.backup.as_ref().map(TempDir::path)
    }

    pub fn is_staged(&self, dest: &str) -> bool {
        self.staged.contains_key(dest)
    }

    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    /// Copy `source` into `<task>/<dest>`, backing up what was there.
    pub fn stage(&mut self, dest: &str, source: &str) -> Result<(), StageError> {
        check_name(dest)?;
        if self.is_staged(dest) {
            return Err(StageError::AlreadyStaged(dest.to_string()));
        }
        let source = resolve_path(&self.base_dir, source);
        if !source.is_dir() {
            return Err(StageError::MissingSource(source));
        }

        let backup_dir = self.ensure_backup_dir()?;

        let target = self.task_dir.join(dest);
        let backup = if target.symlink_metadata().is_ok() {
            let backup = backup_dir.join(dest);
            if let Err(e) = std::fs::rename(&target, &backup) {
                self.remove_backup_dir_if_idle();
                return Err(StageError::Io { action: "back up", path: target, source: e });
            }
            Some(backup)
        } else {
            None
        };

        if let Err(e) = copy_tree(&source, &target) {
            tracing::warn!(
                source = %source.display(),
                target = %target.display(),
                error = %e,
                "copy failed, restoring backup"
            );
            if let Err(e) = remove_path(&target) {
                tracing::error!(
                    path = %target.display(),
                    error = %e,
                    "failed to remove partial copy"
                );
            }
            if let Some(backup) = &backup {
                if let Err(e) = std::fs::rename(backup, &target) {
                    tracing::error!(
                        path = %target.display(),
                        error = %e,
                        "failed to restore backup"
                    );
                }
            }
            self.remove_backup_dir_if_idle();
            return Err(StageError::Io { action: "copy into", path: target, source: e });
        }

        tracing::debug!(
            dest,
            source = %source.display(),
            backed_up = backup.is_some(),
            "staged folder"
        );
        self.staged.insert(dest.to_string(), backup);
        Ok(())
    }

    /// Remove the staged copy of `dest` and put the original back.
    pub fn unstage(&mut self, dest: &str) -> Result<(), StageError> {
        let backup = match self.staged.get(dest) {
            Some(backup) => backup.clone(),
            None => return Err(StageError::NotStaged(dest.to_string())),
        };

        let target = self.task_dir.join(dest);
        remove_path(&target).map_err(io_err("remove", &target))?;
        if let Some(backup) = backup {
            std::fs::rename(&backup, &target).map_err(io_err("restore", &target))?;
        }
        self.staged.remove(dest);

        if self.staged.is_empty() {
            if let Some(backup_dir) = self.backup.take() {
                let path = backup_dir.path().to_path_buf();
                backup_dir.close().map_err(io_err("remove", &path))?;
            }
        }
        tracing::debug!(dest, "unstaged folder");
        Ok(())
    }

    /// Stage every fixture in `sources`, each under its final path component.
    ///
    /// Returns the staged names in order. If one fails, the folders staged
    /// so far are unstaged before the error is returned.
    pub fn stage_all(&mut self, sources: &[String]) -> Result<Vec<String>, StageError> {
        let mut staged = Vec::with_capacity(sources.len());
        for source in sources {
            match dest_name(source).and_then(|dest| self.stage(&dest, source).map(|()| dest)) {
                Ok(dest) => staged.push(dest),
                Err(e) => {
                    if let Err(undo) = self.unstage_all(&staged) {
                        tracing::error!(error = %undo, "failed to undo partial staging");
                    }
                    return Err(e);
                }
            }
        }
        Ok(staged)
    }

    /// Unstage `names` in reverse order.
    ///
    /// Keeps going past failures and returns the first one.
    pub fn unstage_all(&mut self, names: &[String]) -> Result<(), StageError> {
        let mut first = None;
        for name in names.iter().rev() {
            if let Err(e) = self.unstage(name) {
                tracing::warn!(dest = %name, error = %e, "failed to unstage folder");
                first.get_or_insert(e);
            }
        }
        first.map_or(Ok(()), Err)
    }

    /// Path of the backup area, creating it on first use.
    fn ensure_backup_dir(&mut self) -> Result<PathBuf, StageError> {
        if let Some(backup) = &self.backup {
            return Ok(backup.path().to_path_buf());
        }
        let backup = tempfile::Builder::new()
            .prefix(BACKUP_PREFIX)
            .tempdir_in(&self.task_dir)
            .map_err(io_err("create backup area in", &self.task_dir))?;
        let path = backup.path().to_path_buf();
        self.backup = Some(backup);
        Ok(path)
    }

    fn remove_backup_dir_if_idle(&mut self) {
        if !self.staged.is_empty() {
            return;
        }
        if let Some(backup) = self.backup.take() {
            let path = backup.path().to_path_buf();
            if let Err(e) = backup.close() {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove backup area");
            }
        }
    }
}

/// Destination name of a fixture: the last component of its path.
fn dest_name(source: &str) -> Result<String, StageError> {
    let name = Path::new(source.trim_end_matches('/'))
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StageError::InvalidName(source.to_string()))?;
    check_name(name)?;
    Ok(name.to_string())
}

fn check_name(dest: &str) -> Result<(), StageError> {
    let mut components = Path::new(dest).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !dest.starts_with(BACKUP_PREFIX) => Ok(()),
        _ => Err(StageError::InvalidName(dest.to_string())),
    }
}

/// Recursively copy the directory `src` to `dst`, which must not exist.
fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).map_err(io::Error::other)?;
        let target = dst.join(rel);
        let file_type = entry.file_type();
        if file_type.is_dir() {
            std::fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            let link = std::fs::read_link(entry.path())?;
            std::os::unix::fs::symlink(link, &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn remove_path(path: &Path) -> io::Result<()> {
    match path.symlink_metadata() {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path),
        Ok(_) => std::fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Backup areas currently present in `task_dir`.
#[cfg(test)]
pub(crate) fn backup_areas(task_dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(task_dir)
        .into_iter()
        .flatten()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().starts_with(BACKUP_PREFIX))
        .map(|e| e.path())
        .collect()
}

#[cfg(test)]
#[path = "stager_tests.rs"]
mod tests;
