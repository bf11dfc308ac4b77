//! Best-effort parsing of GC log lines into `GcEvent`s.
//!
//! Every extractor takes one line and returns the field or nothing; a line
//! never fails to parse, it just yields fewer fields.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{EventKind, GcEvent};

// Unified logging examples:
// [2026-01-04T10:10:10.123+0900][info][gc] GC(0) Pause Young (Normal) (G1 Evacuation Pause) 512M->123M(2048M) 12.345ms
// [0.123s][info][gc] GC(12) Pause Remark 45.678ms

// The regex crate has no look-behind; the leading group stands in for "not preceded by a word char".
static GC_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\W)GC\((\d+)\)").unwrap());

static DURATION_MS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)ms\b").unwrap());

// "Pause <name> [<before>-><after>(<capacity>)] <n>ms"; the heap transition is not part of the name.
static PAUSE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"\bPause\s+(?P<name>.+?)(?:\s+\d+(?:\.\d+)?[BKMGT]?->\d+(?:\.\d+)?[BKMGT]?(?:\(\d+(?:\.\d+)?[BKMGT]?\))?)?\s+\d+(?:\.\d+)?ms\b",
  )
  .unwrap()
});

// Decorations: [<time>][<level>][<tags>] followed by whitespace.
static TAGS_PREFIX_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^\[(?P<ts>[^\]]+)\]\[(?P<level>[^\]]+)\]\[(?P<tags>[^\]]+)\]\s+").unwrap());

/// First `GC(<n>)` marker not glued to a preceding identifier.
pub fn extract_gc_id(line: &str) -> Option<u64> {
  let caps = GC_ID_RE.captures(line)?;
  caps.get(1)?.as_str().parse().ok()
}

/// Last `<number>ms` token in the line.
///
/// Pause summary lines can carry several millisecond figures; the final one
/// is the pause duration.
pub fn extract_duration_ms(line: &str) -> Option<f64> {
  let last = DURATION_MS_RE.captures_iter(line).last()?;
  last.get(1)?.as_str().parse().ok()
}

/// Tags from a leading `[ts][level][tag,tag]` decoration block.
pub fn extract_tags(line: &str) -> Vec<String> {
  let Some(caps) = TAGS_PREFIX_RE.captures(line) else {
    return Vec::new();
  };
  caps["tags"]
    .split(',')
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(str::to_string)
    .collect()
}

/// Pause classification.
///
/// The second condition is mostly covered by the first; both are kept so
/// lines with irregular spacing around "Pause" classify the same way they
/// always have.
pub fn is_pause_line(line: &str) -> bool {
  line.contains(" Pause ") || (line.trim_start().starts_with("GC(") && line.contains("Pause "))
}

/// Shortest text between `Pause` and the trailing duration token.
pub fn extract_pause_name(line: &str) -> Option<String> {
  let caps = PAUSE_NAME_RE.captures(line)?;
  Some(caps["name"].trim().to_string())
}

/// Parse one line. `line_no` is 1-based.
pub fn parse_line(raw: &str, line_no: usize) -> GcEvent {
  let line = raw.trim_end_matches('\n');

  let (kind, name) = if is_pause_line(line) {
    (EventKind::Pause, extract_pause_name(line).unwrap_or_default())
  } else {
    // Phase/aux lines still keep their duration below.
    (EventKind::Other, String::new())
  };

  GcEvent {
    raw: line.to_string(),
    line_no,
    gc_id: extract_gc_id(line),
    kind,
    name,
    duration_ms: extract_duration_ms(line),
    tags: extract_tags(line),
  }
}

/// Lazily parse a line stream, one event per line, in order.
pub fn parse_gc_log_lines<I>(lines: I) -> impl Iterator<Item = GcEvent>
where
  I: IntoIterator,
  I::Item: AsRef<str>,
{
  lines
    .into_iter()
    .enumerate()
    .map(|(idx, raw)| parse_line(raw.as_ref(), idx + 1))
}
