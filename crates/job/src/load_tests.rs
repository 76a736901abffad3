// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

const JOB: &str = "folder: submissions\nhomeworks:\n  - name: Homework 1\n    folder: homework_1\n";

#[test]
fn load_resolves_root_against_job_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.yml");
    std::fs::write(&path, JOB).unwrap();

    let job = load_job(&path).unwrap();
    assert_eq!(job.base_dir, dir.path());
    assert_eq!(job.root, dir.path().join("submissions"));
    assert_eq!(job.homeworks.len(), 1);
}

#[test]
fn load_keeps_absolute_root() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("elsewhere");
    let path = dir.path().join("job.toml");
    std::fs::write(&path, format!("folder = {:?}\nhomeworks = []\n", root.display().to_string()))
        .unwrap();

    let job = load_job(&path).unwrap();
    assert_eq!(job.root, root);
}

#[test]
fn load_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.json");
    std::fs::write(&path, "{}").unwrap();
    assert!(matches!(load_job(&path), Err(JobError::UnknownFormat(_))));
}

#[test]
fn load_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_job(&dir.path().join("missing.yml")).unwrap_err();
    assert!(matches!(err, JobError::Read { .. }));
    assert!(err.to_string().contains("missing.yml"));
}

#[test]
fn home_expansion() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    assert_eq!(expand_home("~"), home);
    assert_eq!(expand_home("~/fixtures"), home.join("fixtures"));
    assert_eq!(expand_home("fixtures/~"), PathBuf::from("fixtures/~"));
    assert_eq!(resolve_path(Path::new("/base"), "~/x"), home.join("x"));
}

#[yare::parameterized(
    relative = { "/base", "data",       "/base/data" },
    nested   = { "/base", "a/b",        "/base/a/b" },
    absolute = { "/base", "/abs/data",  "/abs/data" },
)]
fn resolve_cases(base: &str, raw: &str, expected: &str) {
    assert_eq!(resolve_path(Path::new(base), raw), PathBuf::from(expected));
}
