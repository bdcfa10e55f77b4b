//! Line rewriting: replace every identifier that fully decodes as a type encoding.
//!
//! A candidate is substituted only when [`decode`] succeeds AND consumes the whole
//! identifier. Plain words that merely start with a tag letter (`var`, `Ex`) stay as-is.

use crate::decode::decode;
use crate::scan::{segments, Segment};
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// Demangle a single token, or return it unchanged.
pub fn demangle(token: &str) -> Cow<'_, str> {
    match decode(token.as_bytes()) {
        Ok(d) if d.consumed == token.len() => Cow::Owned(d.text()),
        Ok(d) => {
            debug!(token, consumed = d.consumed, "partial decode, kept");
            Cow::Borrowed(token)
        }
        Err(e) => {
            debug!(token, error = %e, "not an encoding, kept");
            Cow::Borrowed(token)
        }
    }
}

/// Rewrite one line. Text between identifiers is preserved byte for byte.
pub fn rewrite_line(line: &str) -> String {
    rewrite_line_counted(line).0
}

/// Like [`rewrite_line`], also returning how many identifiers were substituted.
pub fn rewrite_line_counted(line: &str) -> (String, usize) {
    let segs = match segments(line) {
        Ok(s) => s,
        // Unreachable with the current grammar; see `segments`.
        Err(e) => {
            warn!(error = %e, "line not scanned, passed through");
            return (line.to_string(), 0);
        }
    };
    let mut out = String::with_capacity(line.len());
    let mut replaced = 0;
    for seg in segs {
        match seg {
            Segment::Gap(text) => out.push_str(text),
            Segment::Ident(ident) => match demangle(ident) {
                Cow::Owned(text) => {
                    debug!(ident, decoded = %text, "substituted");
                    out.push_str(&text);
                    replaced += 1;
                }
                Cow::Borrowed(text) => out.push_str(text),
            },
        }
    }
    (out, replaced)
}

/// Totals from [`rewrite_stream`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub lines: usize,
    pub substitutions: usize,
    /// Lines that were not UTF-8 and were copied through as raw bytes.
    pub raw_lines: usize,
}

/// Line content without its `\n` or `\r\n` terminator.
fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Filter every line of `reader` through [`rewrite_line`] into `writer`.
/// Each output line is terminated with `\n`, whatever the input terminator was.
/// Lines that are not valid UTF-8 are written back unchanged.
pub fn rewrite_stream<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
) -> io::Result<StreamStats> {
    let mut stats = StreamStats::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;
        let line = strip_terminator(&buf);
        match std::str::from_utf8(line) {
            Ok(text) => {
                let (rewritten, n) = rewrite_line_counted(text);
                writer.write_all(rewritten.as_bytes())?;
                stats.substitutions += n;
            }
            Err(e) => {
                warn!(line = stats.lines, error = %e, "not UTF-8, passed through");
                writer.write_all(line)?;
                stats.raw_lines += 1;
            }
        }
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(stats)
}
