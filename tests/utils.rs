#![cfg(unix)]
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;

const FAKE_DOCKER: &str = r#"#!/bin/sh
echo "$*" >> "$STACKUP_FAKE_LOG"
if [ -n "$STACKUP_FAKE_HANG_ON" ]; then
    case "$*" in
        *"$STACKUP_FAKE_HANG_ON"*) exec sleep 30 ;;
    esac
fi
if [ -n "$STACKUP_FAKE_FAIL" ]; then
    case "$*" in
        *"$STACKUP_FAKE_FAIL"*) exit 3 ;;
    esac
fi
exit 0
"#;

/// A scratch project directory with a fake `docker` that logs its arguments.
pub struct FakeDocker {
    pub dir: TempDir,
    pub bin: PathBuf,
    pub log: PathBuf,
}

impl FakeDocker {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let bin = dir.path().join("fake-docker");
        let log = dir.path().join("docker.log");

        fs::write(&bin, FAKE_DOCKER)?;
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755))?;

        Ok(FakeDocker { dir, bin, log })
    }

    /// The binary, run inside the scratch directory, without `--docker-bin`.
    pub fn bare_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("stackup").unwrap();
        cmd.current_dir(self.dir.path())
            .env("STACKUP_FAKE_LOG", &self.log)
            .env_remove("STACKUP_FAKE_FAIL")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn command(&self) -> Command {
        let mut cmd = self.bare_command();
        cmd.arg("--docker-bin").arg(&self.bin);
        cmd
    }

    /// Starts the binary as the leader of a new process group, as a terminal would.
    pub fn spawn_in_own_group(&self, envs: &[(&str, &str)], args: &[&str]) -> Result<Child> {
        let child = std::process::Command::new(assert_cmd::cargo::cargo_bin("stackup"))
            .current_dir(self.dir.path())
            .env("STACKUP_FAKE_LOG", &self.log)
            .env_remove("STACKUP_FAKE_FAIL")
            .env_remove("RUST_LOG")
            .envs(envs.iter().copied())
            .arg("--docker-bin")
            .arg(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .spawn()?;
        Ok(child)
    }

    pub fn wait_for_invocation(&self, needle: &str, timeout: Duration) -> Result<()> {
        let started_at = Instant::now();
        loop {
            if self.invocations().iter().any(|line| line.contains(needle)) {
                return Ok(());
            }
            if started_at.elapsed() > timeout {
                return Err(anyhow::anyhow!("fake docker never saw '{needle}'"));
            }
            std::thread::sleep(Duration::from_millis(50));
        }
    }

    /// Every invocation the fake received, one argument string per call.
    pub fn invocations(&self) -> Vec<String> {
        read_lines(&self.log)
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}
