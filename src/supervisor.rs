//! Child process lifecycle: spawn, wait, and resource accounting.
//!
//! The supervisor spawns exactly one child per invocation with fully
//! inherited standard streams, starts the wall clock only once the child is
//! confirmed running, blocks until it terminates, and reads the peak
//! resident set size the OS accumulated for it.

use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use std::time::{Duration, Instant};

use nix::sys::resource::{getrusage, UsageWho};

use crate::error::PtimeError;
use crate::signal::SignalRelay;

/// A resolved command ready to run. Immutable once built.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: PathBuf, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

/// The outcome of one supervised run, produced exactly once per invocation
/// and consumed exactly once by the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// The exit code the supervisor itself should terminate with.
    pub exit_code: i32,
    /// Diagnostic text printed above the footer, if any.
    pub error_message: Option<String>,
    /// Wall time between "child confirmed started" and "wait returned".
    pub duration: Duration,
    /// Peak resident set size of the child, in bytes.
    pub peak_memory_bytes: u64,
}

impl ExecutionResult {
    /// The no-op result: no command was given, nothing ran.
    pub fn no_command() -> Self {
        Self::early(0, None)
    }

    /// Resolution failed; no child was ever started.
    pub fn command_not_found(name: &str) -> Self {
        Self::early(127, Some(format!("{name}: command not found")))
    }

    /// The OS refused to create the process; the clock never started.
    pub fn spawn_failed(err: std::io::Error) -> Self {
        Self::early(1, Some(PtimeError::Spawn(err).to_string()))
    }

    fn early(exit_code: i32, error_message: Option<String>) -> Self {
        Self {
            exit_code,
            error_message,
            duration: Duration::ZERO,
            peak_memory_bytes: 0,
        }
    }
}

/// Runs the invocation to completion and returns its result.
///
/// Standard input, output, and error of the child are the supervisor's own;
/// nothing is buffered or intercepted. The signal relay is started
/// immediately after the spawn succeeds and runs until the supervisor
/// process exits. Every failure path yields an `ExecutionResult` rather
/// than an error, since each one still ends in a report.
pub fn run(invocation: &Invocation) -> ExecutionResult {
    let mut child = match Command::new(&invocation.program)
        .args(&invocation.args)
        .spawn()
    {
        Ok(child) => child,
        Err(err) => return ExecutionResult::spawn_failed(err),
    };

    // Clock starts only now, so resolution and spawn overhead is excluded.
    let started = Instant::now();

    // Best-effort: a run without the relay still measures correctly.
    let relay_error = SignalRelay::start(child.id()).err();

    let waited = child.wait();
    let duration = started.elapsed();

    let (exit_code, wait_error) = match waited {
        Ok(status) => (translate_status(&status), None),
        Err(err) => (1, Some(PtimeError::Wait(err).to_string())),
    };

    let error_message = wait_error.or_else(|| relay_error.map(|e| e.to_string()));

    ExecutionResult {
        exit_code,
        error_message,
        duration,
        peak_memory_bytes: peak_child_rss_bytes(),
    }
}

/// Maps a wait status to the code the supervisor exits with: the child's own
/// code for a normal exit, or the conventional 128+N for death by signal N.
fn translate_status(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    128 + status.signal().unwrap_or(0)
}

/// Peak RSS accumulated across waited-for children, in bytes.
///
/// Only one child is ever spawned per invocation, so the children-aggregate
/// maxrss is that child's peak. The kernel reports kilobytes.
fn peak_child_rss_bytes() -> u64 {
    match getrusage(UsageWho::RUSAGE_CHILDREN) {
        Ok(usage) => usage.max_rss().max(0) as u64 * 1024,
        Err(_) => 0,
    }
}
