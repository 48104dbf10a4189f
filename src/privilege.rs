use std::io::ErrorKind;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// Whether compose commands have to be run through `sudo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrivilegeMode {
    Direct,
    Elevated,
}

impl PrivilegeMode {
    pub fn is_elevated(&self) -> bool {
        matches!(self, PrivilegeMode::Elevated)
    }
}

/// Result of `docker info` run without elevation.
#[derive(Debug)]
pub enum ProbeOutcome {
    Reachable,
    Refused(Option<i32>),
    NotInstalled,
    Unavailable(std::io::Error),
}

/// Windows never gets a `sudo` prefix.
pub fn elevation_supported() -> bool {
    !cfg!(windows)
}

pub fn probe_runtime(docker_bin: &str) -> ProbeOutcome {
    let status = Command::new(docker_bin)
        .arg("info")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => ProbeOutcome::Reachable,
        Ok(status) => ProbeOutcome::Refused(status.code()),
        Err(err) if err.kind() == ErrorKind::NotFound => ProbeOutcome::NotInstalled,
        Err(err) => ProbeOutcome::Unavailable(err),
    }
}

/// A missing runtime binary still yields `Elevated`; it is only reported separately.
pub fn decide_privilege_mode(elevation_supported: bool, outcome: &ProbeOutcome) -> PrivilegeMode {
    if !elevation_supported {
        return PrivilegeMode::Direct;
    }

    match outcome {
        ProbeOutcome::Reachable => PrivilegeMode::Direct,
        ProbeOutcome::Refused(_) | ProbeOutcome::NotInstalled | ProbeOutcome::Unavailable(_) => {
            PrivilegeMode::Elevated
        }
    }
}

pub fn detect_privilege_mode(docker_bin: &str) -> PrivilegeMode {
    if !elevation_supported() {
        debug!("elevation is not applicable on this platform, skipping probe");
        return PrivilegeMode::Direct;
    }

    let outcome = probe_runtime(docker_bin);
    debug!(?outcome, docker_bin, "container runtime probe finished");

    match &outcome {
        ProbeOutcome::NotInstalled => {
            warn!(docker_bin, "container runtime was not found on PATH");
            println!("Warning: '{docker_bin}' was not found; commands will most likely fail.");
        }
        ProbeOutcome::Unavailable(err) => {
            warn!(docker_bin, error = %err, "container runtime probe could not be started");
        }
        _ => {}
    }

    let mode = decide_privilege_mode(true, &outcome);
    if mode.is_elevated() {
        println!("Note: Docker requires sudo on this system.");
    }
    mode
}
