//! Integration tests for `sls-rust build`.

use std::fs::File;

use predicates::prelude::*;
use serial_test::serial;

use crate::common::{FAILING_CARGO, FAKE_CARGO, TRIPLE, TestEnv};

const HELLO: &str = r#"
service: hello-service
provider:
  name: aws
  region: eu-west-1
functions:
  hello:
    handler: hello-pkg.hello-bin
    runtime: rust
    memorySize: 128
"#;

#[test]
#[serial]
fn build_packages_and_patches_descriptor() {
  let env = TestEnv::new(HELLO, FAKE_CARGO);

  env
    .sls_cmd(&["hello-bin"])
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Build complete!"))
    .stdout(predicate::str::contains("bootstrap"));

  assert_eq!(
    env.cargo_invocations(),
    vec![format!("build --release --target {TRIPLE}")]
  );

  let archive = env.output_dir("release").join("hello-bin.zip");
  let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
  assert_eq!(zip.len(), 1);
  let entry = zip.by_index(0).unwrap();
  assert_eq!(entry.name(), "bootstrap");
  assert_eq!(entry.unix_mode().unwrap() & 0o777, 0o755);

  let descriptor = env.descriptor();
  let hello = &descriptor["functions"]["hello"];
  assert_eq!(hello["runtime"], "provided");
  assert_eq!(
    hello["package"]["artifact"],
    format!("target/{TRIPLE}/release/hello-bin.zip").as_str()
  );
  assert_eq!(hello["memorySize"], 128);
  assert_eq!(descriptor["provider"]["region"], "eu-west-1");
  assert_eq!(descriptor["service"], "hello-service");
}

#[test]
#[serial]
fn build_honours_dev_profile_and_cargo_flags() {
  let env = TestEnv::new(
    r#"
provider:
  name: aws
  runtime: rust
custom:
  rust:
    profile: dev
    cargoFlags: --locked
functions:
  api:
    handler: api
"#,
    FAKE_CARGO,
  );

  env.sls_cmd(&["api"]).arg("build").assert().success();

  assert_eq!(env.cargo_invocations(), vec![format!("build --target {TRIPLE} --locked")]);
  assert!(env.output_dir("debug").join("api.zip").exists());

  let descriptor = env.descriptor();
  assert_eq!(descriptor["provider"]["runtime"], "provided");
  assert_eq!(
    descriptor["functions"]["api"]["package"]["artifact"],
    format!("target/{TRIPLE}/debug/api.zip").as_str()
  );
}

#[test]
#[serial]
fn build_writes_to_out_path() {
  let env = TestEnv::new(HELLO, FAKE_CARGO);
  let out = env.path().join("patched.yml");

  env
    .sls_cmd(&["hello-bin"])
    .args(["build", "--out"])
    .arg(&out)
    .assert()
    .success();

  assert_eq!(std::fs::read_to_string(&env.config_path).unwrap(), HELLO);
  let patched: serde_yaml::Value = serde_yaml::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
  assert_eq!(patched["functions"]["hello"]["runtime"], "provided");
}

#[test]
#[serial]
fn compiler_failure_leaves_descriptor_untouched() {
  let env = TestEnv::new(HELLO, FAILING_CARGO);

  env
    .sls_cmd(&["hello-bin"])
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("exit code Some(1)"))
    .stderr(predicate::str::contains("error[E0425]"));

  assert_eq!(env.cargo_invocations().len(), 1);
  assert!(!env.output_dir("release").join("hello-bin.zip").exists());
  assert_eq!(std::fs::read_to_string(&env.config_path).unwrap(), HELLO);
}

#[test]
#[serial]
fn unsupported_provider_is_skipped() {
  let descriptor = "provider:\n  name: azure\n  runtime: rust\nfunctions:\n  f:\n    handler: f\n";
  let env = TestEnv::new(descriptor, FAKE_CARGO);

  env
    .sls_cmd(&["f"])
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("not supported"));

  assert!(env.cargo_invocations().is_empty());
  assert_eq!(std::fs::read_to_string(&env.config_path).unwrap(), descriptor);
}

#[test]
#[serial]
fn single_function_json_report() {
  let env = TestEnv::new(
    r#"
provider:
  name: aws
  runtime: rust
functions:
  a:
    handler: a
  b:
    handler: pkg.b
"#,
    FAKE_CARGO,
  );

  let output = env
    .sls_cmd(&["b"])
    .args(["build", "--function", "b", "--output", "json"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["status"], "completed");
  assert_eq!(report["units"].as_array().unwrap().len(), 1);
  assert_eq!(report["units"][0]["name"], "b");
  assert_eq!(report["patch"]["provider_runtime"], "provided");

  let descriptor = env.descriptor();
  assert!(descriptor["functions"]["a"].get("package").is_none());
}
