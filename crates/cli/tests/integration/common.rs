//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const TRIPLE: &str = "x86_64-unknown-linux-musl";

/// Fake cargo: writes every binary listed in `$FAKE_BINARIES` into the
/// profile directory cargo would use, and logs its arguments.
pub const FAKE_CARGO: &str = r#"#!/bin/sh
dir=debug
for arg in "$@"; do
  if [ "$arg" = "--release" ]; then dir=release; fi
done
out="target/x86_64-unknown-linux-musl/$dir"
mkdir -p "$out"
for bin in $FAKE_BINARIES; do
  printf 'binary %s' "$bin" > "$out/$bin"
done
echo "$@" >> cargo-invocations.log
"#;

/// Fake cargo that fails like a compile error.
pub const FAILING_CARGO: &str = r#"#!/bin/sh
echo "error[E0425]: cannot find value" >&2
echo "$@" >> cargo-invocations.log
exit 1
"#;

/// Isolated test environment.
///
/// Each test gets its own service directory holding the descriptor, the fake
/// cargo and the target directory.
pub struct TestEnv {
  pub temp: TempDir,
  pub config_path: PathBuf,
  cargo: PathBuf,
}

impl TestEnv {
  pub fn new(descriptor: &str, cargo_script: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("serverless.yml");
    std::fs::write(&config_path, descriptor).unwrap();

    let cargo = temp.path().join("fake-cargo");
    write_executable(&cargo, cargo_script);

    Self {
      temp,
      config_path,
      cargo,
    }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  pub fn output_dir(&self, profile_dir: &str) -> PathBuf {
    self.path().join("target").join(TRIPLE).join(profile_dir)
  }

  pub fn descriptor(&self) -> serde_yaml::Value {
    let content = std::fs::read_to_string(&self.config_path).unwrap();
    serde_yaml::from_str(&content).unwrap()
  }

  /// Lines the fake cargo logged, one per invocation.
  pub fn cargo_invocations(&self) -> Vec<String> {
    std::fs::read_to_string(self.path().join("cargo-invocations.log"))
      .map(|log| log.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  /// Get a pre-configured Command for the sls-rust binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `SLS_RUST_CARGO`: the fake cargo script
  /// - `FAKE_BINARIES`: binaries the fake cargo produces
  /// - `CARGO_TARGET_DIR`: removed so the default `target` is used
  pub fn sls_cmd(&self, binaries: &[&str]) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("sls-rust");
    cmd.current_dir(self.path());
    cmd.env("SLS_RUST_CARGO", &self.cargo);
    cmd.env("FAKE_BINARIES", binaries.join(" "));
    cmd.env_remove("CARGO_TARGET_DIR");
    cmd
  }
}

fn write_executable(path: &Path, content: &str) {
  std::fs::write(path, content).unwrap();
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }
}
