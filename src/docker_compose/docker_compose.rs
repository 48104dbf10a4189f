use std::fmt;

use crate::config::config::{StackConfig, ELEVATION_PROGRAM};
use crate::privilege::PrivilegeMode;
use crate::selection::Selection;

/// An external invocation: program name plus its argument list. Never passed through a shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposeCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ComposeCommand {
    pub fn new(program: impl Into<String>) -> Self {
        ComposeCommand {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// `sudo <program> <args...>` when elevated, unchanged otherwise.
    pub fn with_privilege(self, privilege: PrivilegeMode) -> Self {
        if !privilege.is_elevated() {
            return self;
        }

        ComposeCommand::new(ELEVATION_PROGRAM)
            .arg(self.program)
            .args(self.args)
    }
}

impl fmt::Display for ComposeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub message: &'static str,
    pub command: ComposeCommand,
}

pub type CommandSequence = Vec<Step>;

fn compose(config: &StackConfig, compose_file: &str, verb: &[&str]) -> ComposeCommand {
    ComposeCommand::new(config.docker_bin.clone())
        .arg("compose")
        .arg("-f")
        .arg(compose_file)
        .args(verb.iter().copied())
}

pub fn build_sequence(selection: Selection, config: &StackConfig) -> CommandSequence {
    let dev_file = config.dev_file.as_str();
    let prod_file = config.prod_file.as_str();

    match selection {
        Selection::Develop => vec![
            Step {
                message: "Stopping containers...",
                command: compose(config, dev_file, &["down"]),
            },
            Step {
                message: "Building image...",
                command: compose(config, dev_file, &["build"]),
            },
            Step {
                message: "Starting containers...",
                command: compose(config, dev_file, &["up"]),
            },
        ],
        Selection::DevelopClean => vec![
            Step {
                message: "Cleaning containers and volumes...",
                command: compose(config, dev_file, &["down", "-v"]),
            },
            Step {
                message: "Building image from scratch...",
                command: compose(config, dev_file, &["build", "--no-cache"]),
            },
            Step {
                message: "Starting containers...",
                command: compose(config, dev_file, &["up"]),
            },
        ],
        Selection::Produce => vec![
            Step {
                message: "Stopping containers...",
                command: compose(config, prod_file, &["down"]),
            },
            Step {
                message: "Building production image...",
                command: compose(config, prod_file, &["build"]),
            },
            Step {
                message: "Starting containers...",
                command: compose(config, prod_file, &["up"]),
            },
        ],
    }
}
