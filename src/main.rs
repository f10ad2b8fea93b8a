//! ptime CLI entry point.
//!
//! Runs a command, forwarding terminal signals to it, and reports wall time
//! and peak memory on stderr once it exits, preserving its exit code.

use clap::Parser;
use ptime::supervisor::{self, ExecutionResult, Invocation};
use ptime::{report, resolve};

#[derive(Parser)]
#[command(name = "ptime")]
#[command(
    version,
    about = "Run a command and report its wall time and peak memory",
    after_help = "EXAMPLES:
    ptime make -j8            # time a build, keep make's exit code
    ptime cargo test          # report appears on stderr after the run
    ptime sleep 5             # Ctrl+C is forwarded to the child"
)]
struct Cli {
    /// The command to run, followed by its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut argv = cli.command.into_iter();
    let Some(name) = argv.next() else {
        report::exit_with(&ExecutionResult::no_command());
    };

    let program = match resolve::lookup(&name) {
        Ok(program) => program,
        Err(_) => report::exit_with(&ExecutionResult::command_not_found(&name)),
    };

    let invocation = Invocation::new(program, argv.collect());
    let result = supervisor::run(&invocation);
    report::exit_with(&result);
}
