//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages and human-readable sizes and digests.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use crossbuild_lib::BuildReport;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
}

pub fn truncate_hash(hash: &str) -> &str {
  let len = hash.len().min(12);
  &hash[..len]
}

pub fn format_bytes(bytes: u64) -> String {
  const KB: u64 = 1024;
  const MB: u64 = KB * 1024;
  const GB: u64 = MB * 1024;

  if bytes >= GB {
    format!("{:.1} GB", bytes as f64 / GB as f64)
  } else if bytes >= MB {
    format!("{:.1} MB", bytes as f64 / MB as f64)
  } else if bytes >= KB {
    format!("{:.1} KB", bytes as f64 / KB as f64)
  } else {
    format!("{} B", bytes)
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Print the human-readable summary of a build: the package path, and for
/// real builds its size and digest.
pub fn print_build_report(report: &BuildReport) {
  let output = &report.output;

  if report.dry_run {
    print_info(&format!("Dry run: {} {} not built", report.target, report.version));
    print_stat("Would write", &output.path.display().to_string());
    return;
  }

  match output.sha256 {
    Some(ref digest) => print_success(&format!(
      "Built {} {} ({})",
      report.target,
      report.version,
      truncate_hash(&digest.0)
    )),
    None => print_success(&format!("Built {} {}", report.target, report.version)),
  }
  print_stat("Package", &output.path.display().to_string());
  if let Some(size) = output.size {
    print_stat("Size", &format_bytes(size));
  }
  if let Some(ref digest) = output.sha256 {
    print_stat("SHA256", &digest.0);
  }
}
