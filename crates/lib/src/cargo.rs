//! Compiler invocation.
//!
//! Runs `cargo build` for the musl target in the foreground. The child's
//! stdout and stderr are inherited so compiler diagnostics reach the terminal
//! as they are produced; failure is detected from the exit status alone.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

use crate::consts::TARGET_TRIPLE;
use crate::unit::{BuildUnit, Profile};

#[derive(Debug, Error)]
pub enum ToolchainError {
  /// The toolchain could not be started at all.
  #[error("failed to spawn {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  #[error("command failed with exit code {code:?}: {cmd}")]
  Failed { cmd: String, code: Option<i32> },
}

/// Something that can compile a build unit.
pub trait Compiler {
  fn build(&self, unit: &BuildUnit) -> Result<(), ToolchainError>;
}

/// `cargo build --target x86_64-unknown-linux-musl`
#[derive(Debug, Clone)]
pub struct CargoCommand {
  program: PathBuf,
  working_dir: PathBuf,
  flags: Vec<String>,
}

impl CargoCommand {
  pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      working_dir: working_dir.into(),
      flags: Vec::new(),
    }
  }

  /// Extra arguments appended after the fixed ones.
  pub fn with_flags(mut self, flags: Vec<String>) -> Self {
    self.flags = flags;
    self
  }

  /// Arguments for a build with the given profile.
  pub fn args(&self, profile: Profile) -> Vec<String> {
    let mut args = vec!["build".to_string()];
    if profile == Profile::Release {
      args.push("--release".to_string());
    }
    args.push("--target".to_string());
    args.push(TARGET_TRIPLE.to_string());
    args.extend(self.flags.iter().cloned());
    args
  }

  fn display(&self, args: &[String]) -> String {
    let mut cmd = self.program.display().to_string();
    for arg in args {
      cmd.push(' ');
      cmd.push_str(arg);
    }
    cmd
  }
}

impl Compiler for CargoCommand {
  fn build(&self, unit: &BuildUnit) -> Result<(), ToolchainError> {
    let args = self.args(unit.profile);
    let cmd = self.display(&args);

    info!(function = %unit.name, profile = %unit.profile, "running cargo {} build", unit.profile);
    debug!(cmd = %cmd, package = %unit.package, working_dir = ?self.working_dir, "spawning process");

    let status = Command::new(&self.program)
      .args(&args)
      .current_dir(&self.working_dir)
      .stdin(Stdio::null())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit())
      .status()
      .map_err(|source| ToolchainError::Spawn {
        program: self.program.display().to_string(),
        source,
      })?;

    if !status.success() {
      return Err(ToolchainError::Failed {
        cmd,
        code: status.code(),
      });
    }

    Ok(())
  }
}
