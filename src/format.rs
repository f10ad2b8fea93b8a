//! Rendering of durations and byte counts for the report footer.
//!
//! Durations are rounded up to whole milliseconds before rendering, so a
//! command that ran at all never reports `0ms`. Byte counts are decomposed
//! into binary units (G/M/K/B) joined largest-first.

use std::time::Duration;

const UNITS: [(&str, u64); 4] = [
    ("G", 1 << 30),
    ("M", 1 << 20),
    ("K", 1 << 10),
    ("B", 1),
];

/// Formats a byte count as comma-separated magnitude+unit tokens.
///
/// Units with a zero magnitude are omitted. A total of zero renders as the
/// literal `0B`.
///
/// ```
/// # use ptime::format::format_bytes;
/// assert_eq!(format_bytes(1_234_567), "1M, 181K, 647B");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    let mut parts = Vec::with_capacity(4);
    let mut rest = bytes;

    for (suffix, size) in UNITS {
        if rest >= size {
            parts.push(format!("{}{}", rest / size, suffix));
            rest %= size;
        }
    }

    if parts.is_empty() {
        return "0B".to_string();
    }
    parts.join(", ")
}

/// Formats a wall-clock duration, rounded up to whole milliseconds.
///
/// The rounding is a ceiling: any non-zero duration below one millisecond
/// reports `1ms`. The literal `0ms` is reserved for an exactly-zero
/// duration, which only happens when no command was run.
///
/// Durations of a second or more render in the style of Go's
/// `Duration::String`: `1.234s`, `1m2.5s`, `1h0m0.001s`, with trailing
/// zeros trimmed from the fractional seconds.
pub fn format_duration(duration: Duration) -> String {
    if duration.is_zero() {
        return "0ms".to_string();
    }

    let millis = ceil_millis(duration);
    if millis < 1000 {
        return format!("{millis}ms");
    }

    let hours = millis / 3_600_000;
    let minutes = (millis % 3_600_000) / 60_000;
    let seconds = format_seconds(millis % 60_000);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}")
    } else {
        seconds
    }
}

/// Rounds a non-zero duration up to a whole number of milliseconds.
fn ceil_millis(duration: Duration) -> u128 {
    let nanos = duration.as_nanos();
    nanos.div_ceil(1_000_000)
}

/// Renders a sub-minute millisecond count as seconds with the fractional
/// part trimmed of trailing zeros (`1500` -> `1.5s`, `2000` -> `2s`).
fn format_seconds(millis: u128) -> String {
    let whole = millis / 1000;
    let frac = millis % 1000;

    if frac == 0 {
        return format!("{whole}s");
    }

    let frac = format!("{frac:03}");
    format!("{whole}.{}s", frac.trim_end_matches('0'))
}
