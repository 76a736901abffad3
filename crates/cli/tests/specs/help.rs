//! Help and argument handling specs.

use crate::prelude::*;

#[test]
fn help_lists_options() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--input")
        .stdout_has("--output")
        .stdout_has("--format")
        .stdout_has("--verbose");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn missing_arguments_fail() {
    cli().fails().stderr_has("--input");
}

#[test]
fn unknown_format_fails() {
    cli()
        .args(&["-i", "job.yml", "-o", "out.md", "--format", "html"])
        .fails()
        .stderr_has("html");
}
