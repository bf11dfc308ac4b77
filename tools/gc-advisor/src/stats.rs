//! Pause statistics: timed pause filter, budget overruns, worst pauses.

use crate::types::GcEvent;

/// Pause events with a known duration, in input order.
pub fn pause_events(events: &[GcEvent]) -> Vec<&GcEvent> {
  events
    .iter()
    .filter(|e| e.is_pause() && e.duration_ms.is_some())
    .collect()
}

/// Pauses strictly longer than the budget.
pub fn count_over_budget(pauses: &[&GcEvent], max_pause_ms: f64) -> usize {
  pauses
    .iter()
    .filter(|e| e.duration_ms.unwrap_or(0.0) > max_pause_ms)
    .count()
}

/// The `limit` longest pauses, longest first.
///
/// The sort is stable, so equal durations keep their input order.
pub fn worst_pauses(pauses: &[&GcEvent], limit: usize) -> Vec<GcEvent> {
  let mut sorted = pauses.to_vec();
  sorted.sort_by(|a, b| {
    let (a, b) = (a.duration_ms.unwrap_or(0.0), b.duration_ms.unwrap_or(0.0));
    b.total_cmp(&a)
  });
  sorted.into_iter().take(limit).cloned().collect()
}
