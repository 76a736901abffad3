//! Job file validation specs.

use crate::prelude::*;

const VALID_TASK: &str = r#"
homeworks:
  - name: Homework 1
    folder: homework_1
    tasks:
      - name: Task 1
        language: bash
        folder: task_1
"#;

#[test]
fn missing_job_file_fails() {
    let project = Project::empty();
    project.grade().exits_with(2).stderr_has("invalid job file job.yml");
    assert!(!project.exists("results.md"));
}

#[test]
fn unknown_extension_is_rejected() {
    let project = Project::empty();
    project.file("job.json", "{}");
    project
        .hwc()
        .args(&["--input", "job.json", "--output", "results.md"])
        .exits_with(2)
        .stderr_has("job.json");
}

#[yare::parameterized(
    unknown_field = { "folder: submissions\ncolour: red\n" },
    duplicate_homeworks = { "folder: submissions\nhomeworks:\n  - name: A\n    folder: a\n  - name: A\n    folder: b\n" },
    bad_deadline = { "folder: submissions\nhomeworks:\n  - name: A\n    folder: a\n    deadline: tomorrow\n" },
    reserved_test_name = { "folder: submissions\nhomeworks:\n  - name: A\n    folder: a\n    tasks:\n      - name: T\n        language: cpp\n        folder: t\n        tests:\n          - name: \"0. Build succeeded\"\n" },
    unknown_language = { "folder: submissions\nhomeworks:\n  - name: A\n    folder: a\n    tasks:\n      - name: T\n        language: rust\n        folder: t\n" },
)]
fn malformed_job_exits_with_code_2(content: &str) {
    let project = Project::empty();
    project.file("job.yml", content);
    project.grade().exits_with(2).stderr_has("invalid job file");
    assert!(!project.exists("results.md"));
}

#[test]
fn toml_job_is_accepted() {
    let project = Project::empty();
    project.file(
        "job.toml",
        r#"
folder = "submissions"

[[homeworks]]
name = "Homework 1"
folder = "homework_1"
"#,
    );
    std::fs::create_dir_all(project.join("submissions")).unwrap();
    project
        .hwc()
        .args(&["--input", "job.toml", "--output", "results.md"])
        .passes()
        .stdout_has("Graded 0 homework(s)");
}

#[test]
fn unwritable_report_fails() {
    let project = Project::empty();
    project.file("job.yml", &format!("folder: submissions{}", VALID_TASK));
    project
        .hwc()
        .args(&["--input", "job.yml", "--output", "missing/dir/results.md"])
        .exits_with(1)
        .stderr_has("failed to write report");
}
