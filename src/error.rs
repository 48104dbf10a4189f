//! Errors that end a stackup run.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StackupError>;

#[derive(Error, Debug)]
pub enum StackupError {
    #[error("Invalid option. Please choose 'dev', 'dev-clean', or 'prod'.")]
    InvalidSelection(String),

    #[error("Command '{command}' failed with {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("Failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled by user.")]
    Cancelled,
}

impl StackupError {
    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            StackupError::Cancelled => 0,
            _ => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "no exit status (terminated by signal)".to_string(),
    }
}
