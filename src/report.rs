//! The final report and process exit.
//!
//! Everything the supervisor has to say goes to stderr, so a caller piping
//! or capturing the child's stdout never sees supervisor output mixed in.

use std::io::{self, Write};

use crate::format::{format_bytes, format_duration};
use crate::supervisor::ExecutionResult;

/// Writes the report for `result` to stderr and exits with its code.
///
/// The report is a blank separator line, the diagnostic message on its own
/// line when present, and a `<duration> <memory>` footer. This never
/// returns; the exit code is the child's (or the documented fallback for
/// failures that happened before a child existed).
pub fn exit_with(result: &ExecutionResult) -> ! {
    let _ = write_report(&mut io::stderr().lock(), result);
    std::process::exit(result.exit_code);
}

fn write_report(out: &mut impl Write, result: &ExecutionResult) -> io::Result<()> {
    writeln!(out)?;
    if let Some(message) = &result.error_message {
        writeln!(out, "{message}")?;
    }
    writeln!(
        out,
        "{} {}",
        format_duration(result.duration),
        format_bytes(result.peak_memory_bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn render(result: &ExecutionResult) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, result).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_no_command_report() {
        let rendered = render(&ExecutionResult::no_command());
        assert_eq!(rendered, "\n0ms 0B\n");
    }

    #[test]
    fn test_not_found_report_has_diagnostic_line() {
        let rendered = render(&ExecutionResult::command_not_found("ghost"));
        assert_eq!(rendered, "\nghost: command not found\n0ms 0B\n");
    }

    #[test]
    fn test_report_footer_formats_duration_and_memory() {
        let result = ExecutionResult {
            exit_code: 0,
            error_message: None,
            duration: Duration::from_millis(12),
            peak_memory_bytes: (1 << 20) + (2 << 10),
        };
        assert_eq!(render(&result), "\n12ms 1M, 2K\n");
    }
}
