use std::process::{Command, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::docker_compose::docker_compose::{CommandSequence, ComposeCommand};
use crate::error::{Result, StackupError};
use crate::privilege::PrivilegeMode;

/// Runs one external command to completion.
pub trait CommandRunner {
    fn run(&mut self, command: &ComposeCommand) -> Result<()>;
}

/// Set by the Ctrl-C handler. The child shares our process group and gets the signal itself.
#[derive(Clone, Debug, Default)]
pub struct Interrupts {
    received: Arc<AtomicBool>,
}

impl Interrupts {
    pub fn install() -> std::result::Result<Self, ctrlc::Error> {
        let interrupts = Interrupts::default();
        let handler = interrupts.clone();
        ctrlc::set_handler(move || handler.notify())?;
        Ok(interrupts)
    }

    pub fn notify(&self) {
        self.received.store(true, Ordering::SeqCst);
    }

    pub fn received(&self) -> bool {
        self.received.load(Ordering::SeqCst)
    }
}

/// The handler thread may not have run yet when the child reaps, so the exit status is checked too.
#[cfg(unix)]
fn interrupted(status: &ExitStatus) -> bool {
    use nix::sys::signal::Signal;
    use std::os::unix::process::ExitStatusExt;

    let sigint = Signal::SIGINT as i32;
    // 130: children that trap SIGINT and exit the shell way
    status.signal() == Some(sigint) || status.code() == Some(128 + sigint)
}

#[cfg(not(unix))]
fn interrupted(_status: &ExitStatus) -> bool {
    false
}

/// Spawns commands with inherited stdio and blocks until each exits.
pub struct SystemRunner {
    interrupts: Interrupts,
}

impl SystemRunner {
    pub fn new(interrupts: Interrupts) -> Self {
        SystemRunner { interrupts }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &ComposeCommand) -> Result<()> {
        if self.interrupts.received() {
            return Err(StackupError::Cancelled);
        }

        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .map_err(|source| StackupError::Spawn {
                command: command.to_string(),
                source,
            })?;

        debug!(command = %command, ?status, "command exited");

        if self.interrupts.received() || interrupted(&status) {
            return Err(StackupError::Cancelled);
        }

        if !status.success() {
            return Err(StackupError::CommandFailed {
                command: command.to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

/// Prints what would run without starting anything.
#[derive(Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&mut self, command: &ComposeCommand) -> Result<()> {
        debug!(command = %command, "dry run, not executing");
        Ok(())
    }
}

/// Runs every step in order and stops at the first failure or interrupt.
pub fn execute<R: CommandRunner>(
    sequence: &CommandSequence,
    privilege: PrivilegeMode,
    runner: &mut R,
) -> Result<()> {
    for (index, step) in sequence.iter().enumerate() {
        let command = step.command.clone().with_privilege(privilege);

        println!("{}", step.message);
        println!("\nExecuting: {command}");
        info!(step = index + 1, total = sequence.len(), command = %command, "running step");

        runner.run(&command)?;
    }

    Ok(())
}
