use std::io::{BufRead, ErrorKind, Write};
use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::StackupError;

/// Which stack to bring up, and how.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Selection {
    #[strum(to_string = "dev", serialize = "1")]
    Develop,

    #[strum(to_string = "dev-clean", serialize = "2")]
    DevelopClean,

    #[strum(to_string = "prod", serialize = "3")]
    Produce,
}

impl Selection {
    /// Numeric shorthand shown in the interactive menu.
    pub fn shorthand(&self) -> u8 {
        match self {
            Selection::Develop => 1,
            Selection::DevelopClean => 2,
            Selection::Produce => 3,
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Selection::Develop => "Start in development mode",
            Selection::DevelopClean => "Clean build and start in development mode",
            Selection::Produce => "Start in production mode",
        }
    }

    /// Banner printed before the sequence starts.
    pub fn title(&self) -> &'static str {
        match self {
            Selection::Develop => "Starting Development Mode...",
            Selection::DevelopClean => "Starting Development Mode (Clean Build)...",
            Selection::Produce => "Starting Production Mode...",
        }
    }
}

pub fn resolve_selection(input: &str) -> Result<Selection, StackupError> {
    let normalized = input.trim().to_lowercase();
    Selection::from_str(&normalized).map_err(|_| StackupError::InvalidSelection(normalized))
}

pub fn render_menu() -> String {
    let options = Selection::iter()
        .map(|selection| {
            format!(
                "{}. {:<9} - {}",
                selection.shorthand(),
                selection.to_string(),
                selection.summary()
            )
        })
        .collect::<Vec<String>>()
        .join("\n");

    format!("\nOptions:\n{options}")
}

pub const PROMPT: &str = "\nEnter your choice (dev/dev-clean/prod or 1/2/3): ";

/// Prints the menu and reads one line. EOF and non UTF-8 input yield an empty answer.
pub fn prompt_choice<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> std::io::Result<String> {
    writeln!(output, "{}", render_menu())?;
    write!(output, "{PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(_) => Ok(line),
        Err(err) if err.kind() == ErrorKind::InvalidData => Ok(String::new()),
        Err(err) => Err(err),
    }
}
