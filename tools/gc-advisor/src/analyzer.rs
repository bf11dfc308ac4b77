//! Analyzer: parses a log, computes pause statistics, runs the rules.

use tracing::debug;

use crate::config::Config;
use crate::parser;
use crate::rules::{self, Rule};
use crate::stats;
use crate::types::*;

/// Composes parser, statistics and rules into one report. Holds no per-run state.
pub struct Analyzer {
  config: Config,
  rules: Vec<Box<dyn Rule>>,
}

impl Analyzer {
  pub fn new(config: Config) -> Self {
    Self {
      config,
      rules: rules::builtin_rules(),
    }
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default())
  }

  /// Append a rule; its findings come after those of the rules already present.
  pub fn with_rule(mut self, rule: Box<dyn Rule>) -> Self {
    self.rules.push(rule);
    self
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Analyze one log worth of lines.
  pub fn analyze<I>(&self, lines: I) -> AnalysisReport
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    // Materialized once: statistics and every rule need the full list.
    let events: Vec<GcEvent> = parser::parse_gc_log_lines(lines).collect();
    self.analyze_events(&events)
  }

  /// Analyze already-parsed events.
  pub fn analyze_events(&self, events: &[GcEvent]) -> AnalysisReport {
    let max_pause_ms = self.config.max_pause_ms;

    let pauses = stats::pause_events(events);
    let over_budget = stats::count_over_budget(&pauses, max_pause_ms);
    let worst = stats::worst_pauses(&pauses, self.config.worst_pause_limit);
    debug!(
      events = events.len(),
      pauses = pauses.len(),
      over_budget,
      "pause statistics computed"
    );

    let ctx = self.config.rule_context();
    let findings: Vec<Finding> = self
      .rules
      .iter()
      .filter_map(|rule| {
        let finding = rule.evaluate(events, &ctx);
        if let Some(f) = &finding {
          debug!(rule = rule.id(), severity = %f.severity, "rule matched");
        }
        finding
      })
      .collect();

    AnalysisReport {
      max_pause_ms,
      total_pause_events: pauses.len(),
      over_budget_pause_events: over_budget,
      worst_pauses: worst,
      findings,
    }
  }
}

/// One-shot analysis with the built-in rules.
pub fn analyze_gc_log<I>(lines: I, max_pause_ms: f64) -> AnalysisReport
where
  I: IntoIterator,
  I::Item: AsRef<str>,
{
  Analyzer::new(Config::with_budget(max_pause_ms)).analyze(lines)
}
