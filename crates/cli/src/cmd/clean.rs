//! Implementation of the `sls-rust clean` command.

use std::path::Path;

use anyhow::{Context, Result};

use sls_rust_lib::config::PipelineConfig;
use sls_rust_lib::pipeline::{self, Outcome};
use sls_rust_lib::service::ServiceConfig;

use crate::output::{OutputFormat, print_info, print_item, print_json, print_stat, print_success, symbols};

/// Execute the clean command.
///
/// Deletes the binaries and archives recorded by the last build.
pub fn cmd_clean(config: &Path, function: Option<String>, output: OutputFormat) -> Result<()> {
  let service = ServiceConfig::load(config).context("Failed to load descriptor")?;
  let options = PipelineConfig::for_descriptor(config).with_function(function);

  let outcome = pipeline::clean(&service, &options).context("Clean failed")?;

  if output.is_json() {
    return print_json(&outcome);
  }

  match outcome {
    Outcome::Skipped { .. } => print_info("Provider is not supported, nothing to clean"),
    Outcome::Completed(report) => {
      println!();
      print_success("Deleted package files");
      for unit in &report.units {
        print_item(symbols::REMOVE, &unit.name, &unit.archive_path.display().to_string());
      }
      println!();
      print_stat("Files removed", &report.files_removed.to_string());
    }
  }

  Ok(())
}
