//! Shared helpers for daemon specs

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Scratch directory holding a config file and the daemon log
pub struct Setup {
    dir: TempDir,
}

impl Setup {
    /// Config with logging redirected into the scratch directory
    pub fn with_config(body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("ngpd.log");
        let config = format!(
            "log_path = {:?}\nexit_when_settled = true\n{}",
            log.display().to_string(),
            body
        );
        std::fs::write(dir.path().join("ngpd.toml"), config).unwrap();
        Self { dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("ngpd.toml")
    }

    pub fn log(&self) -> String {
        std::fs::read_to_string(self.dir.path().join("ngpd.log")).unwrap_or_default()
    }

    pub fn ngpd(&self) -> Command {
        let mut cmd = ngpd();
        cmd.arg("--config").arg(self.config_path());
        cmd.timeout(std::time::Duration::from_secs(30));
        cmd
    }
}

pub fn ngpd() -> Command {
    Command::cargo_bin("ngpd").unwrap()
}

/// Fluent assertions over a finished run
pub trait RunExt {
    fn passes(&mut self) -> Run;
    fn fails(&mut self) -> Run;
}

impl RunExt for Command {
    fn passes(&mut self) -> Run {
        Run(self.assert().success())
    }

    fn fails(&mut self) -> Run {
        Run(self.assert().failure())
    }
}

pub struct Run(assert_cmd::assert::Assert);

impl Run {
    pub fn stdout_has(self, expected: &str) -> Self {
        Run(self.0.stdout(predicate::str::contains(expected)))
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Run(self.0.stderr(predicate::str::contains(expected)))
    }

    /// The JSON report printed as the last stdout line
    pub fn report(self) -> serde_json::Value {
        let stdout = String::from_utf8_lossy(&self.0.get_output().stdout).to_string();
        let line = stdout.lines().last().unwrap_or_default();
        serde_json::from_str(line).unwrap()
    }
}
