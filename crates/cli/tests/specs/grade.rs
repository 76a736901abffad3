//! End-to-end grading specs.

use crate::prelude::*;

fn job(homeworks: &str) -> String {
    format!("folder: submissions\n{}homeworks:\n{}", SCRIPTED_TOOLCHAIN, homeworks)
}

const TWO_TESTS: &str = r#"
  - name: Homework 1
    folder: homework_1
    tasks:
      - name: Task 1
        language: cpp
        folder: task_1
        build_type: simple
        tests:
          - name: Test 1
            expected_output: Hello World!
          - name: Test 2
            expected_output: Goodbye World!
"#;

fn hello_project() -> Project {
    let project = Project::empty();
    project
        .file("job.yml", &job(TWO_TESTS))
        .file("submissions/homework_1/task_1/main.sh", "#!/bin/sh\necho 'Hello World!'\n");
    project
}

#[test]
fn writes_markdown_report_and_summary() {
    let project = hello_project();
    project
        .grade()
        .passes()
        .stdout_has("Graded 1 homework(s): 2 passed, 1 failed (report: results.md)");

    let report = project.read("results.md");
    assert!(report.starts_with("# Test results\n"));
    assert!(report.contains("| Homework 1 | Task 1 | 0. Build succeeded | ✔ |"));
    assert!(report.contains("|  |  | Test 1 | ✔ |"));
    assert!(report.contains("|  |  | Test 2 | ✘ |"));
    assert!(report.contains("### `[Homework 1][Task 1][Test 2]:`"));
    assert!(report.contains("Your output 'Hello World!'\nExpected output: 'Goodbye World!'"));
    assert!(report.ends_with("With 💙 from homework bot 🤖\n"));
}

#[test]
fn writes_json_report() {
    let project = hello_project();
    project.grade().args(&["--format", "json"]).passes();

    let json: serde_json::Value = serde_json::from_str(&project.read("results.md")).unwrap();
    let task = &json["Homework 1"]["Task 1"];
    assert_eq!(task["0. Build succeeded"]["succeeded"], serde_json::json!(true));
    assert_eq!(task["Test 1"]["succeeded"], serde_json::json!(true));
    assert_eq!(task["Test 1"]["stderr"], serde_json::json!(""));
    assert_eq!(task["Test 2"]["succeeded"], serde_json::json!(false));
    assert_eq!(
        task["Test 2"]["stderr"],
        serde_json::json!(
            "Given input: ''\nYour output 'Hello World!'\nExpected output: 'Goodbye World!'"
        )
    );
}

#[test]
fn failed_build_reports_only_build_entry() {
    let project = Project::empty();
    project.file("job.yml", &job(TWO_TESTS));
    project.file("submissions/homework_1/task_1/README", "no sources");

    project.grade().args(&["--format", "json"]).passes().stdout_has("0 passed, 1 failed");

    let json: serde_json::Value = serde_json::from_str(&project.read("results.md")).unwrap();
    let task = json["Homework 1"]["Task 1"].as_object().unwrap();
    assert_eq!(task.keys().collect::<Vec<_>>(), vec!["0. Build succeeded"]);
}

#[test]
fn expired_homework_is_graded_but_errors_hidden() {
    let project = Project::empty();
    project
        .file(
            "job.yml",
            &job(r#"
  - name: Homework 1
    folder: homework_1
    deadline: "2000-01-01 00:00:00"
    tasks:
      - name: Task 1
        language: bash
        folder: task_1
        tests:
          - name: Test 1
            expected_output: 42
"#),
        )
        .file("submissions/homework_1/task_1/main.sh", "echo 41\n");

    project.grade().passes().stdout_has("0 passed, 1 failed");
    let report = project.read("results.md");
    assert!(report.contains("| Homework 1 `[PAST DEADLINE]` | Task 1 | Test 1 | ✘ |"));
    assert!(report.contains("### `[Homework 1][Past Deadline][Errors Hidden]`"));
    assert!(!report.contains("Expected output"));
}

#[test]
fn runaway_program_is_killed_after_timeout() {
    let project = Project::empty();
    project
        .file(
            "job.yml",
            &job(r#"
  - name: Homework 1
    folder: homework_1
    tasks:
      - name: Task 1
        language: cpp
        folder: task_1
        build_type: simple
        tests:
          - name: Test 1
            expected_output: done
"#),
        )
        .file("submissions/homework_1/task_1/main.sh", "#!/bin/sh\nsleep 30\necho done\n");

    let started = std::time::Instant::now();
    project.grade().args(&["--format", "json"]).passes();
    assert!(started.elapsed() < std::time::Duration::from_secs(20));

    let json: serde_json::Value = serde_json::from_str(&project.read("results.md")).unwrap();
    assert_eq!(
        json["Homework 1"]["Task 1"]["Test 1"]["stderr"],
        serde_json::json!("Timeout: command './main' ran longer than 2 seconds")
    );
}

#[test]
fn missing_submission_folders_are_skipped() {
    let project = Project::empty();
    project.file(
        "job.yml",
        &job(r#"
  - name: Homework 1
    folder: homework_1
    tasks:
      - name: Task 1
        language: bash
        folder: task_1
"#),
    );
    std::fs::create_dir_all(project.join("submissions")).unwrap();

    project.grade().args(&["--format", "json"]).passes().stdout_has("Graded 0 homework(s)");
    assert_eq!(project.read("results.md").trim(), "{}");
}

#[test]
fn style_findings_and_number_output() {
    let project = Project::empty();
    project
        .file(
            "job.yml",
            &job(r#"
  - name: Homework 1
    folder: homework_1
    tasks:
      - name: Task 1
        language: cpp
        folder: task_1
        output_type: number
        tests:
          - name: Test 1
            input: "1 2"
            expected_output: 3.0
"#),
        )
        .file("submissions/homework_1/task_1/main.sh", "#!/bin/sh\necho $(( $1 + $2 ))\n")
        .file("submissions/homework_1/task_1/style_errors", "");

    project.grade().passes().stdout_has("2 passed, 1 failed");
    let report = project.read("results.md");
    assert!(report.contains("|  |  | 0. Style errors | ✘ |"));
    assert!(report.contains("Total errors found: 1"));
    assert!(project.exists("submissions/homework_1/task_1/build/main"));
}

#[test]
fn verbose_logs_to_stderr() {
    let project = hello_project();
    project.grade().args(&["--verbose"]).passes().stderr_has("loaded job");
}

#[test]
fn log_filter_from_environment() {
    let project = hello_project();
    let run = project.grade().env("HWC_LOG", "error").passes();
    assert!(!run.stderr().contains("checking task"), "unexpected logs:\n{}", run.stderr());
}
