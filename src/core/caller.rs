//! Caller location and stack dump helpers
//!
//! Both helpers are best effort: they depend on debug symbols being present
//! and never fail. Without symbols the location is reported as `???:1`.

use std::backtrace::Backtrace;
use std::io::{Cursor, Write};

/// File reported when the caller can not be resolved
pub const UNKNOWN_FILE: &str = "???";

const STACK_BUFFER: usize = 10_000;
const ALL_STACKS_BUFFER: usize = 100_000;
const STACK_ATTEMPTS: usize = 5;

// Symbol of the frame the skip depth is counted from.
const ANCHOR: &str = "caller::format_file_line";

/// File basename and line of the caller `depth` frames above the caller of
/// this function. `depth == 0` is the function calling `format_file_line`.
#[inline(never)]
pub fn format_file_line(depth: usize) -> (String, u32) {
    let trace = Backtrace::force_capture().to_string();
    locate(&trace, depth).unwrap_or_else(|| (UNKNOWN_FILE.to_string(), 1))
}

/// Caller location as `["file=<name>", "line=<n>"]`.
#[inline(never)]
pub fn format_file_line_array(depth: usize) -> Vec<String> {
    let (file, line) = format_file_line(depth + 1);
    vec![format!("file={}", file), format!("line={}", line)]
}

/// Render the calling thread's stack into a byte buffer.
///
/// The buffer starts at 10 000 bytes (100 000 when `all` is set) and doubles
/// up to five times. If the dump still does not fit, the truncated capture is
/// returned.
///
/// The dump never includes other threads, whatever `all` says: the standard
/// library can only capture the calling thread. `all` only reserves the
/// larger buffer and prefixes the dump with a `thread '<name>':` line naming
/// the calling thread.
pub fn format_stacks(all: bool) -> Vec<u8> {
    let trace = Backtrace::force_capture();
    let header = if all {
        let current = std::thread::current();
        format!("thread '{}':\n", current.name().unwrap_or("<unnamed>"))
    } else {
        String::new()
    };

    let mut size = if all { ALL_STACKS_BUFFER } else { STACK_BUFFER };
    let mut buffer = Vec::new();
    for _ in 0..STACK_ATTEMPTS {
        buffer = vec![0u8; size];
        let (complete, written) = {
            let mut cursor = Cursor::new(&mut buffer[..]);
            let complete = write!(cursor, "{}{}", header, trace).is_ok();
            (complete, cursor.position() as usize)
        };
        buffer.truncate(written);
        if complete {
            break;
        }
        size *= 2;
    }
    buffer
}

/// Find the frame `depth + 1` symbols above [`ANCHOR`] in a rendered
/// backtrace and return its location.
fn locate(trace: &str, depth: usize) -> Option<(String, u32)> {
    let frames = parse_frames(trace);
    let anchor = frames.iter().position(|(symbol, _)| symbol.contains(ANCHOR))?;
    let (_, location) = frames.get(anchor + 1 + depth)?;
    location.clone()
}

/// Split a rendered backtrace into `(symbol, location)` pairs. Inlined
/// symbols sharing one frame number count as separate frames.
fn parse_frames(trace: &str) -> Vec<(String, Option<(String, u32)>)> {
    let mut frames: Vec<(String, Option<(String, u32)>)> = Vec::new();
    for line in trace.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                if frame.1.is_none() {
                    frame.1 = parse_location(location);
                }
            }
            continue;
        }
        let symbol = match line.split_once(": ") {
            Some((index, symbol)) if index.chars().all(|c| c.is_ascii_digit()) => symbol,
            _ => line,
        };
        frames.push((symbol.to_string(), None));
    }
    frames
}

/// `path/to/file.rs:LINE:COL` into the basename and line.
fn parse_location(location: &str) -> Option<(String, u32)> {
    let mut parts = location.rsplitn(3, ':');
    let _column = parts.next()?;
    let line = parts.next()?.parse().ok()?;
    let path = parts.next()?;
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    Some((file.to_string(), line))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
   0: std::backtrace::Backtrace::force_capture
             at /rustc/abc/library/std/src/backtrace.rs:312:13
   1: bootlog::core::caller::format_file_line
             at ./src/core/caller.rs:24:17
   2: app::handlers::login
             at ./src/handlers.rs:88:5
      app::handlers::dispatch
             at ./src/handlers.rs:12:9
   3: app::main
             at ./src/main.rs:7:5
   4: core::ops::function::FnOnce::call_once
";

    #[test]
    fn test_locate_counts_from_anchor() {
        assert_eq!(locate(SAMPLE, 0), Some(("handlers.rs".to_string(), 88)));
        assert_eq!(locate(SAMPLE, 1), Some(("handlers.rs".to_string(), 12)));
        assert_eq!(locate(SAMPLE, 2), Some(("main.rs".to_string(), 7)));
    }

    #[test]
    fn test_locate_missing_location_or_depth() {
        assert_eq!(locate(SAMPLE, 3), None);
        assert_eq!(locate(SAMPLE, 40), None);
        assert_eq!(locate("no frames here", 0), None);
    }

    #[test]
    fn test_parse_location_windows_path() {
        assert_eq!(
            parse_location(r"C:\work\app\src\main.rs:41:2"),
            Some(("main.rs".to_string(), 41))
        );
    }

    #[test]
    fn test_format_file_line_never_fails() {
        let (file, line) = format_file_line(0);
        assert!(file == "caller.rs" || file == UNKNOWN_FILE, "got {}", file);
        assert!(line >= 1);

        let (file, line) = format_file_line(10_000);
        assert_eq!((file.as_str(), line), (UNKNOWN_FILE, 1));
    }

    #[test]
    fn test_format_file_line_array_shape() {
        let parts = format_file_line_array(0);
        assert_eq!(parts.len(), 2);
        assert!(parts[0].starts_with("file="));
        assert!(parts[1].starts_with("line="));
    }

    #[test]
    fn test_format_stacks_is_bounded() {
        let stack = format_stacks(false);
        let max = STACK_BUFFER << (STACK_ATTEMPTS - 1);
        assert!(stack.len() <= max);

        let all = format_stacks(true);
        assert!(all.starts_with(b"thread '"));
    }

    #[test]
    fn test_format_stacks_all_names_only_the_calling_thread() {
        let dump = std::thread::Builder::new()
            .name("stack-dump".to_string())
            .spawn(|| format_stacks(true))
            .unwrap()
            .join()
            .unwrap();
        let text = String::from_utf8_lossy(&dump);
        assert!(text.starts_with("thread 'stack-dump':\n"));
        assert_eq!(text.matches("thread '").count(), 1);
    }
}
