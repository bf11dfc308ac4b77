//! Core types for the advisor (parsed events, findings, report JSON contract).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Parsed events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
  Pause,
  Other,
}

impl EventKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pause => "pause",
      Self::Other => "other",
    }
  }
}

/// One parsed GC log line (best-effort).
///
/// Primarily targets JDK 9+ unified logging lines such as:
/// `[0.123s][info][gc] GC(12) Pause Young (Normal) (G1 Evacuation Pause) 24M->4M(256M) 15.123ms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcEvent {
  pub raw: String,
  /// 1-based position in the input.
  pub line_no: usize,
  pub gc_id: Option<u64>,
  pub kind: EventKind,
  /// Pause cause/phase label; empty when not extracted.
  pub name: String,
  pub duration_ms: Option<f64>,
  /// Pieces of the third decoration block, e.g. `[gc,phases]` -> `["gc", "phases"]`.
  pub tags: Vec<String>,
}

impl GcEvent {
  pub fn is_pause(&self) -> bool {
    self.kind == EventKind::Pause
  }

  /// `L<line_no>: <raw>`, the excerpt format used for evidence.
  pub fn excerpt(&self) -> String {
    format!("L{}: {}", self.line_no, self.raw)
  }
}

// ---------------------------------------------------------------------------
// Severity enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Info,
  Warn,
  Critical,
}

impl Severity {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Info => "info",
      Self::Warn => "warn",
      Self::Critical => "critical",
    }
  }

  /// Warn below `limit` occurrences, Critical at or above it.
  pub fn by_count(count: usize, limit: usize) -> Self {
    if count < limit {
      Self::Warn
    } else {
      Self::Critical
    }
  }
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

/// Rule-specific metric value. Serialized as a bare JSON number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
  Count(u64),
  Number(f64),
  Text(String),
}

impl From<usize> for MetricValue {
  fn from(v: usize) -> Self {
    Self::Count(v as u64)
  }
}

impl From<f64> for MetricValue {
  fn from(v: f64) -> Self {
    Self::Number(v)
  }
}

impl From<&str> for MetricValue {
  fn from(v: &str) -> Self {
    Self::Text(v.to_string())
  }
}

impl fmt::Display for MetricValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Count(v) => write!(f, "{}", v),
      Self::Number(v) => write!(f, "{:?}", v),
      Self::Text(v) => f.write_str(v),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
  pub rule_id: String,
  pub title: String,
  pub severity: Severity,
  pub evidence: Vec<String>,
  pub advice: Vec<String>,
  /// Sorted by key so serialized output is stable.
  pub metrics: BTreeMap<String, MetricValue>,
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
  pub max_pause_ms: f64,
  pub total_pause_events: usize,
  pub over_budget_pause_events: usize,
  pub worst_pauses: Vec<GcEvent>,
  /// In rule declaration order, not severity order.
  pub findings: Vec<Finding>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn enums_serialize_lowercase() {
    assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
    assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), "\"warn\"");
    assert_eq!(serde_json::to_string(&EventKind::Pause).unwrap(), "\"pause\"");
    assert_eq!(serde_json::to_string(&EventKind::Other).unwrap(), "\"other\"");
  }

  #[test]
  fn severity_by_count_boundary() {
    assert_eq!(Severity::by_count(4, 5), Severity::Warn);
    assert_eq!(Severity::by_count(5, 5), Severity::Critical);
  }

  #[test]
  fn metric_values_are_bare_json() {
    let mut metrics = BTreeMap::new();
    metrics.insert("matches".to_string(), MetricValue::from(3usize));
    metrics.insert("threshold_ms".to_string(), MetricValue::from(200.0));
    let json = serde_json::to_string(&metrics).unwrap();
    assert_eq!(json, r#"{"matches":3,"threshold_ms":200.0}"#);

    let back: BTreeMap<String, MetricValue> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, metrics);
  }

  #[test]
  fn absent_optionals_serialize_as_null() {
    let event = GcEvent {
      raw: "hello".into(),
      line_no: 1,
      gc_id: None,
      kind: EventKind::Other,
      name: String::new(),
      duration_ms: None,
      tags: Vec::new(),
    };
    let v = serde_json::to_value(&event).unwrap();
    assert!(v["gc_id"].is_null());
    assert!(v["duration_ms"].is_null());
    assert_eq!(v["kind"], "other");
  }
}
