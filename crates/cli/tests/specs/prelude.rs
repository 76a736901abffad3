//! Shared helpers for CLI specs.

use assert_cmd::assert::Assert;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Toolchain that "compiles" `<binary>.sh` by copying it into place.
pub const SCRIPTED_TOOLCHAIN: &str = r#"
toolchain:
  cmake_build: "cp ../${binary}.sh ${binary} && chmod +x ${binary}"
  simple_build: "cp ${binary}.sh ${binary} && chmod +x ${binary}"
  test_suite: "sh ../suite.sh"
  style_check: "if [ -f style_errors ]; then echo 'Total errors found: 1' >&2; exit 1; fi"
  test_timeout: 2
"#;

/// `hwc` invocation outside any project.
pub fn cli() -> Cli {
    Cli::new(None)
}

/// A temporary grading project.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn file(&self, rel: &str, content: &str) -> &Self {
        let path = self.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
        self
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.join(rel)).unwrap()
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.join(rel).exists()
    }

    /// `hwc` run from the project directory.
    pub fn hwc(&self) -> Cli {
        Cli::new(Some(self.path()))
    }

    /// `hwc --input job.yml --output results.md` from the project directory.
    pub fn grade(&self) -> Cli {
        self.hwc().args(&["--input", "job.yml", "--output", "results.md"])
    }
}

pub struct Cli {
    cmd: assert_cmd::Command,
}

impl Cli {
    fn new(cwd: Option<&Path>) -> Self {
        let mut cmd = assert_cmd::Command::cargo_bin("hwc").unwrap();
        cmd.env_remove("HWC_LOG").env("NO_COLOR", "1");
        if let Some(cwd) = cwd {
            cmd.current_dir(cwd);
        }
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Run {
        Run { assert: self.cmd.assert().success() }
    }

    pub fn fails(mut self) -> Run {
        Run { assert: self.cmd.assert().failure() }
    }

    pub fn exits_with(mut self, code: i32) -> Run {
        Run { assert: self.cmd.assert().code(code) }
    }
}

pub struct Run {
    assert: Assert,
}

impl Run {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout missing {:?}:\n{}", expected, stdout);
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr missing {:?}:\n{}", expected, stderr);
        self
    }
}
