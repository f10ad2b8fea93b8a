//! End-to-end tests for the ptime binary.
//!
//! These run the compiled binary against real commands and check exit-code
//! passthrough, the stderr report format, and stdout isolation.

use assert_cmd::Command;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use predicates::prelude::*;

fn ptime() -> Command {
    Command::cargo_bin("ptime").unwrap()
}

/// Matches the `<duration> <memory>` footer for a run that executed a child.
fn footer() -> predicates::str::RegexPredicate {
    predicate::str::is_match(r"\n\d+(\.\d+)?(ms|s|m|h)[^\n]* \d+(G|M|K|B)").unwrap()
}

#[test]
fn no_arguments_is_a_noop() {
    ptime()
        .assert()
        .success()
        .stdout("")
        .stderr("\n0ms 0B\n");
}

#[test]
fn unknown_command_exits_127() {
    ptime()
        .arg("nonexistent-cmd-xyz")
        .assert()
        .code(127)
        .stderr("\nnonexistent-cmd-xyz: command not found\n0ms 0B\n");
}

#[test]
fn true_passes_through_success() {
    ptime()
        .arg("true")
        .assert()
        .success()
        .stdout("")
        .stderr(footer());
}

#[test]
fn false_passes_through_failure_without_diagnostic() {
    let assert = ptime().arg("false").assert().code(1).stdout("");
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    // Report starts with the blank separator line and goes straight to the
    // footer; a nonzero child exit is not a supervisor diagnostic.
    assert!(stderr.starts_with('\n'));
    assert_eq!(stderr.lines().filter(|l| !l.is_empty()).count(), 1);
}

#[test]
fn exit_code_passthrough() {
    for code in [0, 7, 42, 255] {
        ptime()
            .args(["sh", "-c", &format!("exit {code}")])
            .assert()
            .code(code);
    }
}

#[test]
fn child_stdout_is_untouched() {
    ptime()
        .args(["echo", "hello"])
        .assert()
        .success()
        .stdout("hello\n")
        .stderr(footer());
}

#[test]
fn child_stderr_passes_through_before_the_report() {
    ptime()
        .args(["sh", "-c", "echo oops >&2"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("oops").and(footer()));
}

#[test]
fn hyphenated_arguments_reach_the_child() {
    ptime()
        .args(["printf", "--", "ok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn sigterm_to_supervisor_is_forwarded_to_child() {
    let mut supervisor = std::process::Command::new(assert_cmd::cargo::cargo_bin("ptime"))
        .args(["sleep", "5"])
        .stderr(std::process::Stdio::piped())
        .spawn()
        .unwrap();

    // Give the supervisor time to spawn the child and register the relay
    std::thread::sleep(std::time::Duration::from_millis(300));
    kill(Pid::from_raw(supervisor.id() as i32), Signal::SIGTERM).unwrap();

    let output = supervisor.wait_with_output().unwrap();
    // sleep died from the forwarded signal; the supervisor itself survived
    // to translate it and report before exiting
    assert_eq!(output.status.code(), Some(128 + 15));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with('\n'));
    assert!(stderr.contains("ms ") || stderr.contains("s "));
}

#[test]
fn signal_killed_child_translates_to_128_plus_n() {
    ptime()
        .args(["sh", "-c", "kill -9 $$"])
        .assert()
        .code(128 + 9);
}

#[test]
fn short_run_reports_at_least_one_millisecond() {
    let assert = ptime().arg("true").assert().success();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    // The child ran, so the rounded-up duration can never be the 0ms sentinel
    assert!(!stderr.contains("\n0ms"));
}

#[test]
fn report_mentions_real_child_memory() {
    let assert = ptime().args(["sh", "-c", "exit 0"]).assert().success();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    // Even a bare shell holds more than a kilobyte resident
    assert!(!stderr.contains(" 0B"));
}
