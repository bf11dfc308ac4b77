//! Report rendering: human-readable text and JSON.

use crate::error::AdvisorError;
use crate::types::AnalysisReport;

pub const NO_FINDINGS_LINE: &str = "Diagnosis: no notable pattern found (or unsupported log format).";

/// Human-readable report.
pub fn render_text(r: &AnalysisReport) -> String {
  let mut lines: Vec<String> = Vec::new();
  lines.push("G1GC Pause Time Analyzer & Advisor".into());
  lines.push(String::new());
  lines.push(format!("- Pause budget (MaxGCPauseMillis): {:.1} ms", r.max_pause_ms));
  lines.push(format!("- Pause events: {}", r.total_pause_events));
  lines.push(format!("- Over budget (pause > budget): {}", r.over_budget_pause_events));
  lines.push(String::new());

  if !r.worst_pauses.is_empty() {
    lines.push(format!("Worst pauses (top {}):", r.worst_pauses.len()));
    for e in &r.worst_pauses {
      let gc_id = e.gc_id.map_or_else(|| "-".to_string(), |id| id.to_string());
      let name = if e.name.is_empty() { "(unknown)" } else { e.name.as_str() };
      lines.push(format!(
        "  - L{} GC({}) {:.3}ms | {}",
        e.line_no,
        gc_id,
        e.duration_ms.unwrap_or(0.0),
        name
      ));
    }
    lines.push(String::new());
  }

  if r.findings.is_empty() {
    lines.push(NO_FINDINGS_LINE.into());
    return lines.join("\n");
  }

  lines.push("Findings:".into());
  for f in &r.findings {
    lines.push(String::new());
    lines.push(format!(
      "[{}] {} ({})",
      f.severity.as_str().to_uppercase(),
      f.title,
      f.rule_id
    ));
    if !f.metrics.is_empty() {
      let metrics: Vec<String> = f.metrics.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
      lines.push(format!("- metrics: {}", metrics.join(", ")));
    }
    if !f.evidence.is_empty() {
      lines.push("- evidence:".into());
      lines.extend(f.evidence.iter().map(|ev| format!("  - {}", ev)));
    }
    if !f.advice.is_empty() {
      lines.push("- advice:".into());
      lines.extend(f.advice.iter().map(|ad| format!("  - {}", ad)));
    }
  }

  lines.join("\n")
}

/// Pretty-printed JSON report.
pub fn to_json(r: &AnalysisReport) -> Result<String, AdvisorError> {
  Ok(serde_json::to_string_pretty(r)?)
}

/// Load a report previously written by `to_json`.
pub fn from_json(s: &str) -> Result<AnalysisReport, AdvisorError> {
  Ok(serde_json::from_str(s)?)
}
