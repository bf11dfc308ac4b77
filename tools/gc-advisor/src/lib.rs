//! G1GC Pause Time Analyzer & Advisor — deterministic, rule-based.
//!
//! Parses GC log lines into events, summarizes pause times against a
//! budget, and runs a fixed set of diagnostic rules that emit findings with
//! evidence and tuning advice.
//!
//! No network, no state across runs; pure computation over one log.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;
pub mod rules;
pub mod stats;
pub mod types;

pub use analyzer::{analyze_gc_log, Analyzer};
pub use config::Config;
pub use error::AdvisorError;
pub use rules::{Rule, RuleContext};
pub use types::{AnalysisReport, EventKind, Finding, GcEvent, MetricValue, Severity};
