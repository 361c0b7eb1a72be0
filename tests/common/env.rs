//! Isolated environment for running the deploy-notify binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Variables that would leak the developer's setup into a test run
const SCRUBBED_VARS: &[&str] = &[
    "SLACK_TOKEN",
    "SLACK_CHANNEL",
    "SLACK_API_URL",
    "SLACK_TIMEOUT_SECS",
    "DEPLOY_NOTIFY_STATE_DIR",
    "DEPLOY_NOTIFY_IGNORE_ERRORS",
    "RUST_LOG",
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
    "NO_PROXY",
    "no_proxy",
];

/// Result of running a deploy-notify command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated test environment with temp directories
pub struct TestEnv {
    /// Directory handed to the binary as its state dir
    pub state_dir: TempDir,
    /// Directory used as HOME / XDG_CONFIG_HOME
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            state_dir: TempDir::new().expect("create state dir"),
            home_dir: TempDir::new().expect("create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_deploy-notify")),
        }
    }

    /// Path of the stored record for `deployment_id`
    pub fn record_path(&self, deployment_id: &str) -> PathBuf {
        self.state_dir.path().join(format!("{deployment_id}.json"))
    }

    pub fn write_record(&self, deployment_id: &str, contents: &str) {
        std::fs::write(self.record_path(deployment_id), contents).expect("write record");
    }

    pub fn read_record(&self, deployment_id: &str) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.record_path(deployment_id)).expect("read record");
        serde_json::from_str(&raw).expect("record is JSON")
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        for var in SCRUBBED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("APPDATA", self.home_dir.path())
            .env("DEPLOY_NOTIFY_STATE_DIR", self.state_dir.path())
            .current_dir(self.home_dir.path())
            .args(args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("run deploy-notify");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.path().join(relative)
    }

    pub fn state_path(&self) -> &Path {
        self.state_dir.path()
    }
}
