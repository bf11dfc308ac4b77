//! Binary entrypoint: analyze one GC log, print the text report, optionally write JSON.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use gc_advisor::{report, AdvisorError, Analyzer, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gc-advisor")]
#[command(about = "G1GC pause time analyzer & advisor (rule-based)")]
#[command(version)]
struct Cli {
  /// GC log file path
  #[arg(long)]
  log: PathBuf,

  /// Pause budget in milliseconds
  #[arg(long, env = "GC_ADVISOR_MAX_PAUSE_MS", default_value_t = gc_advisor::config::DEFAULT_MAX_PAUSE_MS, value_parser = parse_budget)]
  max_pause_ms: f64,

  /// Also write the report as JSON to this path
  #[arg(long)]
  json_out: Option<PathBuf>,
}

fn parse_budget(s: &str) -> Result<f64, String> {
  let v: f64 = s.parse().map_err(|e| format!("{}", e))?;
  if !v.is_finite() || v < 0.0 {
    return Err("must be a finite, non-negative number of milliseconds".into());
  }
  Ok(v)
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  if let Err(e) = run(&cli) {
    eprintln!("gc-advisor: {}", e);
    std::process::exit(1);
  }
}

fn run(cli: &Cli) -> Result<(), AdvisorError> {
  if !cli.log.exists() {
    return Err(AdvisorError::log_not_found(&cli.log));
  }

  let text = read_log(&cli.log)?;
  info!(path = %cli.log.display(), max_pause_ms = cli.max_pause_ms, "analyzing");

  let analyzer = Analyzer::new(Config::with_budget(cli.max_pause_ms));
  let r = analyzer.analyze(text.lines());
  info!(findings = r.findings.len(), "analysis finished");

  println!("{}", report::render_text(&r));

  if let Some(out) = &cli.json_out {
    let json = report::to_json(&r)?;
    fs::write(out, json).map_err(|e| AdvisorError::io(out, e))?;
    info!(path = %out.display(), "json report written");
  }

  Ok(())
}

/// Invalid UTF-8 is replaced rather than rejected.
fn read_log(path: &Path) -> Result<String, AdvisorError> {
  let bytes = fs::read(path).map_err(|e| AdvisorError::io(path, e))?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}
