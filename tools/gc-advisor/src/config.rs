//! Analyzer configuration with sane defaults.

use crate::rules::RuleContext;

/// Default pause budget, matching the JVM's default `MaxGCPauseMillis`.
pub const DEFAULT_MAX_PAUSE_MS: f64 = 200.0;

/// Tunables for one analysis run.
#[derive(Debug, Clone)]
pub struct Config {
  /// Pause budget in milliseconds. Pauses strictly above it are over budget.
  pub max_pause_ms: f64,
  /// How many of the longest pauses the report keeps.
  pub worst_pause_limit: usize,
}

impl Config {
  pub fn with_budget(max_pause_ms: f64) -> Self {
    Self {
      max_pause_ms,
      ..Self::default()
    }
  }

  pub fn rule_context(&self) -> RuleContext {
    RuleContext {
      max_pause_ms: self.max_pause_ms,
    }
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      max_pause_ms: DEFAULT_MAX_PAUSE_MS,
      worst_pause_limit: 10,
    }
  }
}
