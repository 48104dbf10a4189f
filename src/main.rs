use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use stackup::config::config::StackConfig;
use stackup::docker_compose::docker_compose::build_sequence;
use stackup::error::StackupError;
use stackup::privilege::detect_privilege_mode;
use stackup::runner::{execute, DryRunRunner, Interrupts, SystemRunner};
use stackup::selection::{prompt_choice, resolve_selection};
use std::io;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Bring the docker compose development or production stack up.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// dev, dev-clean or prod (1, 2 or 3). Prompts when omitted.
    selection: Option<String>,

    /// Print the commands without running them
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Print a completion script for the given shell and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    #[command(flatten)]
    stack: StackConfig,
}

fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "stackup", &mut io::stdout());
        return Ok(());
    }

    let privilege = detect_privilege_mode(&cli.stack.docker_bin);
    debug!(?privilege, "privilege mode resolved");

    let choice = match cli.selection {
        Some(selection) => selection,
        None => prompt_choice(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let selection = match resolve_selection(&choice) {
        Ok(selection) => selection,
        Err(err) => {
            debug!(?err, "rejected selection");
            println!("{err}");
            process::exit(err.exit_code())
        }
    };

    println!("\n{}", selection.title());
    let sequence = build_sequence(selection, &cli.stack);

    let result = if cli.dry_run {
        execute(&sequence, privilege, &mut DryRunRunner)
    } else {
        let interrupts = Interrupts::install()?;
        execute(&sequence, privilege, &mut SystemRunner::new(interrupts))
    };

    match result {
        Ok(_) => Ok(()),
        Err(StackupError::Cancelled) => {
            println!("\n{}", StackupError::Cancelled);
            process::exit(StackupError::Cancelled.exit_code())
        }
        Err(err) => {
            println!("Error executing command: {err}");
            process::exit(err.exit_code())
        }
    }
}
