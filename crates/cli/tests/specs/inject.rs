//! Fixture injection specs.

use crate::prelude::*;

fn job(inject: &str) -> String {
    format!(
        r#"folder: submissions
{}homeworks:
  - name: Homework 1
    folder: homework_1
    tasks:
      - name: Task 1
        language: bash
        folder: task_1
        tests:
          - name: Test 1
            inject_folders: [{}]
            expected_output: from fixture
"#,
        SCRIPTED_TOOLCHAIN, inject
    )
}

fn project(inject: &str) -> Project {
    let project = Project::empty();
    project
        .file("job.yml", &job(inject))
        .file("fixtures/data/input.txt", "from fixture\n")
        .file("submissions/homework_1/task_1/main.sh", "cat data/input.txt\n");
    project
}

fn no_backup_left(project: &Project) -> bool {
    std::fs::read_dir(project.join("submissions/homework_1/task_1"))
        .unwrap()
        .all(|e| !e.unwrap().file_name().to_string_lossy().starts_with(".hwc-backup"))
}

#[test]
fn fixture_is_visible_to_test_and_removed_afterwards() {
    let project = project("fixtures/data");
    project.grade().passes().stdout_has("1 passed, 0 failed");

    assert!(!project.exists("submissions/homework_1/task_1/data"));
    assert!(no_backup_left(&project));
    assert!(project.exists("fixtures/data/input.txt"));
}

#[test]
fn student_folder_is_restored_after_test() {
    let project = project("fixtures/data");
    project.file("submissions/homework_1/task_1/data/input.txt", "student copy\n");

    project.grade().passes().stdout_has("1 passed, 0 failed");

    assert_eq!(project.read("submissions/homework_1/task_1/data/input.txt"), "student copy\n");
    assert!(no_backup_left(&project));
}

#[test]
fn missing_fixture_skips_task() {
    let project = project("fixtures/absent");
    project
        .grade()
        .args(&["--format", "json"])
        .passes()
        .stdout_has("0 passed, 0 failed")
        .stderr_has("skipping task");

    let json: serde_json::Value = serde_json::from_str(&project.read("results.md")).unwrap();
    assert!(json["Homework 1"]["Task 1"].is_null());
    assert!(no_backup_left(&project));
}

#[test]
fn submission_backup_folder_is_untouched() {
    let project = project("fixtures/data");
    project.file("submissions/homework_1/task_1/.backup/notes.txt", "mine\n");

    project.grade().passes().stdout_has("1 passed, 0 failed");

    assert_eq!(project.read("submissions/homework_1/task_1/.backup/notes.txt"), "mine\n");
    assert!(no_backup_left(&project));
}
