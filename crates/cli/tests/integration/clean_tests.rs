//! Integration tests for `sls-rust clean`.

use predicates::prelude::*;
use serial_test::serial;

use crate::common::{FAKE_CARGO, TestEnv};

const TWO_PROFILES: &str = r#"
provider:
  name: aws
  runtime: rust
functions:
  fast:
    handler: shared
    rust:
      profile: dev
  slow:
    handler: shared
"#;

#[test]
#[serial]
fn clean_removes_built_files() {
  let env = TestEnv::new(TWO_PROFILES, FAKE_CARGO);
  env.sls_cmd(&["shared"]).arg("build").assert().success();

  for dir in ["debug", "release"] {
    assert!(env.output_dir(dir).join("shared").exists());
    assert!(env.output_dir(dir).join("shared.zip").exists());
  }

  env
    .sls_cmd(&[])
    .arg("clean")
    .assert()
    .success()
    .stdout(predicate::str::contains("Files removed: 4"));

  for dir in ["debug", "release"] {
    assert!(!env.output_dir(dir).join("shared").exists());
    assert!(!env.output_dir(dir).join("shared.zip").exists());
  }
}

#[test]
#[serial]
fn clean_single_function_keeps_other_profile() {
  let env = TestEnv::new(TWO_PROFILES, FAKE_CARGO);
  env.sls_cmd(&["shared"]).arg("build").assert().success();

  env.sls_cmd(&[]).args(["clean", "--function", "fast"]).assert().success();

  assert!(!env.output_dir("debug").join("shared.zip").exists());
  assert!(env.output_dir("release").join("shared.zip").exists());

  env.sls_cmd(&[]).args(["clean", "--function", "slow"]).assert().success();
  assert!(!env.output_dir("release").join("shared.zip").exists());
}

#[test]
#[serial]
fn clean_twice_fails() {
  let env = TestEnv::new(TWO_PROFILES, FAKE_CARGO);
  env.sls_cmd(&["shared"]).arg("build").assert().success();
  env.sls_cmd(&[]).arg("clean").assert().success();

  env
    .sls_cmd(&[])
    .arg("clean")
    .assert()
    .failure()
    .stderr(predicate::str::contains("nothing to clean"));
}

#[test]
#[serial]
fn clean_fails_when_archive_already_gone() {
  let env = TestEnv::new(TWO_PROFILES, FAKE_CARGO);
  env.sls_cmd(&["shared"]).arg("build").assert().success();
  std::fs::remove_file(env.output_dir("debug").join("shared.zip")).unwrap();

  env
    .sls_cmd(&[])
    .arg("clean")
    .assert()
    .failure()
    .stderr(predicate::str::contains("cannot delete"));
}

const SHARED_HANDLER: &str = r#"
provider:
  name: aws
  runtime: rust
functions:
  get:
    handler: api.api
  put:
    handler: api.api
"#;

#[test]
#[serial]
fn clean_shared_handler_removes_files_once() {
  let env = TestEnv::new(SHARED_HANDLER, FAKE_CARGO);
  env.sls_cmd(&["api"]).arg("build").assert().success();

  env
    .sls_cmd(&[])
    .arg("clean")
    .assert()
    .success()
    .stdout(predicate::str::contains("Files removed: 2"));

  assert!(!env.output_dir("release").join("api.zip").exists());
  env
    .sls_cmd(&[])
    .arg("clean")
    .assert()
    .failure()
    .stderr(predicate::str::contains("nothing to clean"));
}

#[test]
#[serial]
fn partial_build_then_full_clean() {
  let descriptor = "provider:\n  name: aws\n  runtime: rust\nfunctions:\n  a:\n    handler: a\n  b:\n    handler: b\n";
  let env = TestEnv::new(descriptor, FAKE_CARGO);
  let out = env.path().join("patched.yml");
  env.sls_cmd(&["a", "b"]).args(["build", "--out"]).arg(&out).assert().success();
  env
    .sls_cmd(&["b"])
    .args(["build", "--function", "b", "--out"])
    .arg(&out)
    .assert()
    .success();

  env
    .sls_cmd(&[])
    .arg("clean")
    .assert()
    .success()
    .stdout(predicate::str::contains("Files removed: 4"));

  for bin in ["a", "b"] {
    assert!(!env.output_dir("release").join(bin).exists());
    assert!(!env.output_dir("release").join(format!("{bin}.zip")).exists());
  }
}
