//! Diagnostic rules over the parsed event list.
//!
//! Each rule sees the full event list and the run's context and returns at
//! most one finding. Rules are independent of each other and of the order
//! they run in; the order of `builtin_rules` only decides report order.

use std::collections::BTreeMap;

use crate::types::{Finding, GcEvent, MetricValue, Severity};

/// Evidence lines kept per finding.
pub const EVIDENCE_LIMIT: usize = 10;

/// Remark pauses shorter than this are never flagged, whatever the budget.
pub const REMARK_FLOOR_MS: f64 = 200.0;

/// Immutable per-run inputs shared by every rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleContext {
  pub max_pause_ms: f64,
}

pub trait Rule: Send + Sync {
  /// Stable identifier, unique across the rule set.
  fn id(&self) -> &'static str;

  fn title(&self) -> &'static str;

  fn evaluate(&self, events: &[GcEvent], ctx: &RuleContext) -> Option<Finding>;

  fn finding(
    &self,
    severity: Severity,
    evidence: Vec<String>,
    advice: Vec<String>,
    metrics: BTreeMap<String, MetricValue>,
  ) -> Finding {
    Finding {
      rule_id: self.id().to_string(),
      title: self.title().to_string(),
      severity,
      evidence,
      advice,
      metrics,
    }
  }
}

/// The built-in rules, in report order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
  vec![
    Box::new(OverBudgetSummaryRule),
    Box::new(ToSpaceExhaustedRule),
    Box::new(ConcurrentModeFailureRule),
    Box::new(HumongousRule),
    Box::new(LongRemarkRule),
  ]
}

/// Case-insensitive substring match against any needle (needles are lowercase).
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
  let lower = haystack.to_lowercase();
  needles.iter().any(|n| lower.contains(n))
}

fn matching<'a>(events: &'a [GcEvent], needles: &[&str]) -> Vec<&'a GcEvent> {
  events.iter().filter(|e| contains_any(&e.raw, needles)).collect()
}

fn excerpts(events: &[&GcEvent]) -> Vec<String> {
  events.iter().take(EVIDENCE_LIMIT).map(|e| e.excerpt()).collect()
}

fn metrics<const N: usize>(pairs: [(&str, MetricValue); N]) -> BTreeMap<String, MetricValue> {
  pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn strings(lines: &[&str]) -> Vec<String> {
  lines.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Over-budget summary
// ---------------------------------------------------------------------------

pub struct OverBudgetSummaryRule;

impl Rule for OverBudgetSummaryRule {
  fn id(&self) -> &'static str {
    "g1.over_budget_summary"
  }

  fn title(&self) -> &'static str {
    "Pause budget overrun summary"
  }

  fn evaluate(&self, events: &[GcEvent], ctx: &RuleContext) -> Option<Finding> {
    let pauses: Vec<&GcEvent> = events
      .iter()
      .filter(|e| e.duration_ms.is_some() && e.raw.to_lowercase().contains("pause"))
      .collect();
    let over: Vec<&GcEvent> = pauses
      .iter()
      .copied()
      .filter(|e| e.duration_ms.unwrap_or(0.0) > ctx.max_pause_ms)
      .collect();
    if over.is_empty() {
      return None;
    }

    // Cause histogram in first-seen order; the stable sort keeps that order on ties.
    let mut causes: Vec<(&str, usize)> = Vec::new();
    for e in &over {
      let name = if e.name.is_empty() { "unknown" } else { e.name.as_str() };
      match causes.iter_mut().find(|(n, _)| *n == name) {
        Some((_, count)) => *count += 1,
        None => causes.push((name, 1)),
      }
    }
    causes.sort_by(|a, b| b.1.cmp(&a.1));

    let evidence = causes
      .iter()
      .take(5)
      .map(|(name, count)| format!("{}: {} time(s)", name, count))
      .collect();
    let advice = vec![
      format!(
        "{}/{} pause events exceeded the pause budget ({}ms).",
        over.len(),
        pauses.len(),
        ctx.max_pause_ms
      ),
      "Check the pattern-specific findings below (to-space exhausted, humongous, remark, concurrent mode failure).".to_string(),
    ];

    Some(self.finding(
      Severity::by_count(over.len(), 5),
      evidence,
      advice,
      metrics([
        ("pause_events", pauses.len().into()),
        ("over_budget", over.len().into()),
      ]),
    ))
  }
}

// ---------------------------------------------------------------------------
// To-space exhausted / evacuation failure
// ---------------------------------------------------------------------------

pub struct ToSpaceExhaustedRule;

impl Rule for ToSpaceExhaustedRule {
  fn id(&self) -> &'static str {
    "g1.to_space_exhausted"
  }

  fn title(&self) -> &'static str {
    "To-space exhausted / evacuation failure"
  }

  fn evaluate(&self, events: &[GcEvent], _ctx: &RuleContext) -> Option<Finding> {
    let matches = matching(events, &["to-space exhausted", "evacuation failure"]);
    if matches.is_empty() {
      return None;
    }

    let advice = strings(&[
      "Evacuation ran out of free regions to copy live objects into; expect long stop-the-world pauses or a fallback Full GC.",
      "Free up heap headroom first: raise -Xmx or look at allocation bursts around the flagged lines.",
      "Reserve more regions for evacuation with `-XX:G1ReservePercent`.",
      "If fragmentation or late mixed collections are involved, tune `-XX:InitiatingHeapOccupancyPercent` and the mixed-GC settings.",
    ]);

    Some(self.finding(
      Severity::Critical,
      excerpts(&matches),
      advice,
      metrics([("matches", matches.len().into())]),
    ))
  }
}

// ---------------------------------------------------------------------------
// Concurrent mode failure
// ---------------------------------------------------------------------------

pub struct ConcurrentModeFailureRule;

impl Rule for ConcurrentModeFailureRule {
  fn id(&self) -> &'static str {
    "g1.concurrent_mode_failure"
  }

  fn title(&self) -> &'static str {
    "Concurrent mode failure"
  }

  fn evaluate(&self, events: &[GcEvent], _ctx: &RuleContext) -> Option<Finding> {
    let matches = matching(events, &["concurrent mode failure"]);
    if matches.is_empty() {
      return None;
    }

    let advice = strings(&[
      "Concurrent marking did not finish before the heap filled up (allocation rate or CPU contention), forcing a long stop-the-world collection.",
      "Start marking earlier by lowering `-XX:InitiatingHeapOccupancyPercent`.",
      "If concurrent GC threads are starved, raise `-XX:ConcGCThreads` (only helps with spare CPU).",
      "Find and smooth allocation bursts (traffic spikes, batch jobs) with buffering, rate limiting or object reuse.",
    ]);

    Some(self.finding(
      Severity::Critical,
      excerpts(&matches),
      advice,
      metrics([("matches", matches.len().into())]),
    ))
  }
}

// ---------------------------------------------------------------------------
// Humongous allocations
// ---------------------------------------------------------------------------

pub struct HumongousRule;

impl Rule for HumongousRule {
  fn id(&self) -> &'static str {
    "g1.humongous"
  }

  fn title(&self) -> &'static str {
    "Humongous allocation / region growth pattern"
  }

  fn evaluate(&self, events: &[GcEvent], _ctx: &RuleContext) -> Option<Finding> {
    let matches = matching(events, &["humongous", "g1 humongous allocation"]);
    if matches.is_empty() {
      return None;
    }

    let advice = strings(&[
      "Frequent humongous objects (half a region or larger) make G1 claim and release whole regions, which lengthens pauses and fragments the heap.",
      "Application side: look for large arrays, buffers or strings created in bursts.",
      "JVM side: consider a larger `-XX:G1HeapRegionSize` (e.g. 1m -> 2m/4m); bigger regions make collection less fine-grained.",
    ]);

    Some(self.finding(
      Severity::by_count(matches.len(), 5),
      excerpts(&matches),
      advice,
      metrics([("matches", matches.len().into())]),
    ))
  }
}

// ---------------------------------------------------------------------------
// Long remark
// ---------------------------------------------------------------------------

pub struct LongRemarkRule;

impl Rule for LongRemarkRule {
  fn id(&self) -> &'static str {
    "g1.long_remark"
  }

  fn title(&self) -> &'static str {
    "Long remark pauses"
  }

  fn evaluate(&self, events: &[GcEvent], ctx: &RuleContext) -> Option<Finding> {
    let remarks: Vec<&GcEvent> = events
      .iter()
      .filter(|e| {
        e.name.to_lowercase().contains("pause remark") || e.raw.to_lowercase().contains("pause remark")
      })
      .collect();
    if remarks.is_empty() {
      return None;
    }

    let threshold = ctx.max_pause_ms.max(REMARK_FLOOR_MS);
    let long: Vec<&GcEvent> = remarks
      .iter()
      .copied()
      .filter(|e| e.duration_ms.unwrap_or(0.0) >= threshold)
      .collect();
    if long.is_empty() {
      return None;
    }

    let advice = strings(&[
      "Remark gets long when reference processing (soft/weak/final/phantom references) piles up.",
      "Enable `-XX:+ParallelRefProcEnabled` to process references in parallel.",
      "Check that `-XX:ParallelGCThreads` (stop-the-world worker threads) is not set too low.",
    ]);

    Some(self.finding(
      Severity::by_count(long.len(), 3),
      excerpts(&long),
      advice,
      metrics([
        ("remark_events", remarks.len().into()),
        ("long_remarks", long.len().into()),
        ("threshold_ms", threshold.into()),
      ]),
    ))
  }
}
