// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown grading report.
//!
//! One table row per recorded entry, sorted by homework, task and entry
//! name, followed by the stderr and stdout of every failed entry. Errors of
//! homeworks past their deadline are hidden behind a single notice.

use hwc_core::{CommandResult, GradingResults};
use std::fmt::Write;

const SUCCESS_SIGN: &str = "✔";
const FAILED_SIGN: &str = "✘";
const SEPARATOR: &str = "--------\n";
const FINISHING_NOTE: &str = "With 💙 from homework bot 🤖\n";

/// Render `results` as a markdown document.
pub fn markdown(results: &GradingResults) -> String {
    let mut table = String::new();
    let mut errors = String::new();
    table_row(&mut table, "Homework Name", "Task Name", "Test Name", "Result");
    table.push_str("|---|---|---|:---:|\n");

    let mut homeworks: Vec<_> = results.homeworks().collect();
    homeworks.sort_by(|a, b| a.0.cmp(b.0));
    for (hw_name, homework) in homeworks {
        let expired = homework.is_expired();
        let hw_label =
            if expired { format!("{} `[PAST DEADLINE]`", hw_name) } else { hw_name.to_string() };
        let mut need_hw_name = true;
        let mut hidden_errors = false;

        let mut tasks: Vec<_> = homework.tasks().collect();
        tasks.sort_by(|a, b| a.0.cmp(b.0));
        for (task_name, task) in tasks {
            let mut need_task_name = true;
            let mut entries: Vec<_> = task.entries().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (entry_name, result) in entries {
                let sign = if result.succeeded() { SUCCESS_SIGN } else { FAILED_SIGN };
                table_row(
                    &mut table,
                    if need_hw_name { hw_label.as_str() } else { "" },
                    if need_task_name { task_name } else { "" },
                    entry_name,
                    sign,
                );
                need_hw_name = false;
                need_task_name = false;

                if result.succeeded() {
                    continue;
                }
                if expired {
                    hidden_errors = true;
                } else {
                    error_section(&mut errors, hw_name, task_name, entry_name, result);
                }
            }
        }
        if hidden_errors {
            let _ = write!(errors, "\n\n### `[{}][Past Deadline][Errors Hidden]`\n\n", hw_name);
        }
    }

    let mut out = String::from("# Test results\n");
    out.push_str(&table);
    if !errors.is_empty() {
        out.push_str("\n## Encountered errors\n");
        out.push_str(&errors);
    }
    out.push_str(SEPARATOR);
    out.push_str(FINISHING_NOTE);
    out
}

fn table_row(out: &mut String, homework: &str, task: &str, test: &str, result: &str) {
    let _ = writeln!(out, "| {} | {} | {} | {} |", homework, task, test, result);
}

fn error_section(out: &mut String, hw: &str, task: &str, test: &str, result: &CommandResult) {
    let _ = write!(
        out,
        "### `[{}][{}][{}]:`\n\n*stderr*:\n```apiblueprint\n{}\n```\n*stdout*:\n```\n{}\n```\n{}",
        hw,
        task,
        test,
        result.stderr(),
        result.stdout(),
        SEPARATOR
    );
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
