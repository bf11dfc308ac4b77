//! Integration tests for the analyzer pipeline.

use gc_advisor::{analyze_gc_log, report, Analyzer, Config, EventKind, MetricValue, Severity};
use pretty_assertions::assert_eq;

const SAMPLE: &str = include_str!("fixtures/g1_sample.log");

#[test]
fn sample_log_summary() {
  let r = analyze_gc_log(SAMPLE.lines(), 200.0);

  assert_eq!(r.max_pause_ms, 200.0);
  assert_eq!(r.total_pause_events, 7);
  assert_eq!(r.over_budget_pause_events, 3);

  let worst: Vec<usize> = r.worst_pauses.iter().map(|e| e.line_no).collect();
  assert_eq!(worst, vec![18, 16, 11, 9, 19, 8, 12]);
  assert!(r.worst_pauses.iter().all(|e| e.kind == EventKind::Pause));
  assert_eq!(r.worst_pauses[0].name, "Full (G1 Compaction Pause)");
  assert_eq!(r.worst_pauses[0].tags, vec!["gc".to_string()]);
}

#[test]
fn sample_log_findings() {
  let r = analyze_gc_log(SAMPLE.lines(), 200.0);

  let ids: Vec<&str> = r.findings.iter().map(|f| f.rule_id.as_str()).collect();
  assert_eq!(
    ids,
    vec![
      "g1.over_budget_summary",
      "g1.to_space_exhausted",
      "g1.concurrent_mode_failure",
      "g1.humongous",
      "g1.long_remark",
    ]
  );

  let summary = &r.findings[0];
  assert_eq!(summary.severity, Severity::Warn);
  assert_eq!(
    summary.evidence,
    vec![
      "Remark: 1 time(s)".to_string(),
      "Young (Normal) (G1 Evacuation Pause) (Evacuation Failure): 1 time(s)".to_string(),
      "Full (G1 Compaction Pause): 1 time(s)".to_string(),
    ]
  );

  let to_space = &r.findings[1];
  assert_eq!(to_space.severity, Severity::Critical);
  assert_eq!(to_space.metrics["matches"], MetricValue::Count(2));
  assert!(to_space.evidence[0].starts_with("L15: "));

  assert_eq!(r.findings[2].severity, Severity::Critical);
  assert!(r.findings[2].evidence[0].starts_with("L17: "));

  let humongous = &r.findings[3];
  assert_eq!(humongous.severity, Severity::Warn);
  assert_eq!(humongous.metrics["matches"], MetricValue::Count(3));

  let remark = &r.findings[4];
  assert_eq!(remark.severity, Severity::Warn);
  assert_eq!(remark.metrics["long_remarks"], MetricValue::Count(1));
}

#[test]
fn young_pause_line_parses() {
  let r = analyze_gc_log(
    ["GC(0) Pause Young (Normal) (G1 Evacuation Pause) 512M->123M(2048M) 12.345ms"],
    200.0,
  );
  assert_eq!(r.total_pause_events, 1);
  let e = &r.worst_pauses[0];
  assert_eq!(e.kind, EventKind::Pause);
  assert_eq!(e.gc_id, Some(0));
  assert_eq!(e.duration_ms, Some(12.345));
  assert_eq!(e.name, "Young (Normal) (G1 Evacuation Pause)");
}

#[test]
fn to_space_exhausted_is_critical() {
  let r = analyze_gc_log(["[5.0s][info][gc] GC(9) To-space exhausted"], 200.0);
  let f = r
    .findings
    .iter()
    .find(|f| f.rule_id == "g1.to_space_exhausted")
    .expect("finding");
  assert_eq!(f.severity, Severity::Critical);
}

#[test]
fn humongous_severity_scales_with_count() {
  let lines: Vec<String> = (0..6)
    .map(|i| format!("[{}.0s][info][gc,heap] GC({}) Humongous regions: 10->12", i, i))
    .collect();

  let six = analyze_gc_log(&lines, 200.0);
  assert_eq!(six.findings.len(), 1);
  assert_eq!(six.findings[0].severity, Severity::Critical);

  let four = analyze_gc_log(&lines[..4], 200.0);
  assert_eq!(four.findings[0].severity, Severity::Warn);
}

#[test]
fn plain_text_has_no_findings() {
  let r = analyze_gc_log(["nothing to see", "", "still nothing"], 200.0);
  assert_eq!(r.total_pause_events, 0);
  assert!(r.findings.is_empty());
  assert!(report::render_text(&r).ends_with(report::NO_FINDINGS_LINE));
}

#[test]
fn deterministic_output_across_runs() {
  let a = Analyzer::with_defaults().analyze(SAMPLE.lines());
  let b = Analyzer::with_defaults().analyze(SAMPLE.lines());
  assert_eq!(report::to_json(&a).unwrap(), report::to_json(&b).unwrap());
}

#[test]
fn json_round_trip_preserves_report() {
  let r = analyze_gc_log(SAMPLE.lines(), 200.0);
  let back = report::from_json(&report::to_json(&r).unwrap()).unwrap();

  assert_eq!(back.total_pause_events, r.total_pause_events);
  assert_eq!(back.over_budget_pause_events, r.over_budget_pause_events);
  let order = |rep: &gc_advisor::AnalysisReport| -> Vec<usize> { rep.worst_pauses.iter().map(|e| e.line_no).collect() };
  assert_eq!(order(&back), order(&r));
  assert_eq!(back.findings, r.findings);
}

#[test]
fn lower_budget_flags_more_pauses() {
  let r = Analyzer::new(Config::with_budget(30.0)).analyze(SAMPLE.lines());
  // 48.21, 265.004, 438.902, 2650.117, 35.7
  assert_eq!(r.over_budget_pause_events, 5);
  assert_eq!(r.findings[0].severity, Severity::Critical);
}
