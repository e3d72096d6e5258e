//! External command construction and execution.
//!
//! Commands are described by a [`CommandSpec`] and handed to a
//! [`CommandRunner`]. The [`Executor`] sits in front of the runner and owns
//! the dry-run decision, so a dry run constructs and logs every command but
//! never reaches the runner.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{CrossbuildError, Result};

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  pub program: String,
  pub args: Vec<String>,
  /// Variables set on top of the inherited environment.
  pub env: BTreeMap<String, String>,
  pub cwd: Option<PathBuf>,
}

impl CommandSpec {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      env: BTreeMap::new(),
      cwd: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }
}

fn quote(word: &str) -> String {
  if word.is_empty() || word.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
    format!("'{}'", word.replace('\'', r"'\''"))
  } else {
    word.to_string()
  }
}

impl fmt::Display for CommandSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (key, value) in &self.env {
      write!(f, "{}={} ", key, quote(value))?;
    }
    write!(f, "{}", quote(&self.program))?;
    for arg in &self.args {
      write!(f, " {}", quote(arg))?;
    }
    Ok(())
  }
}

/// What a finished command left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
  pub code: Option<i32>,
  pub success: bool,
  /// stdout followed by stderr.
  pub output: String,
}

impl CommandOutput {
  /// Output reported for a command that was not run.
  pub fn skipped() -> Self {
    Self {
      code: None,
      success: true,
      output: String::new(),
    }
  }
}

/// The boundary between the pipeline and the processes it launches.
///
/// A non-zero exit is reported through [`CommandOutput::success`], not as an
/// error; errors are reserved for commands that could not be launched.
pub trait CommandRunner {
  fn run(&self, command: &CommandSpec) -> Result<CommandOutput>;
}

/// Runs commands as child processes of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
    let mut command = Command::new(&spec.program);
    command.args(&spec.args).envs(&spec.env);
    if let Some(dir) = &spec.cwd {
      command.current_dir(dir);
    }

    debug!(program = %spec.program, cwd = ?spec.cwd, "spawning process");

    let output = command.output().map_err(|source| CrossbuildError::Spawn {
      program: spec.program.clone(),
      source,
    })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    Ok(CommandOutput {
      code: output.status.code(),
      success: output.status.success(),
      output: combined,
    })
  }
}

/// Dispatches commands to a runner unless running dry.
#[derive(Clone, Copy)]
pub struct Executor<'a> {
  runner: &'a dyn CommandRunner,
  dry_run: bool,
}

impl<'a> Executor<'a> {
  pub fn new(runner: &'a dyn CommandRunner, dry_run: bool) -> Self {
    Self { runner, dry_run }
  }

  pub fn is_dry_run(&self) -> bool {
    self.dry_run
  }

  pub fn execute(&self, spec: &CommandSpec) -> Result<CommandOutput> {
    if self.dry_run {
      info!(command = %spec, "dry run: would execute");
      return Ok(CommandOutput::skipped());
    }

    info!(command = %spec, "executing");
    let output = self.runner.run(spec)?;

    if !output.output.is_empty() {
      debug!(output = %output.output.trim_end(), "command output");
    }

    Ok(output)
  }
}
