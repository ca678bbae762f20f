//! Implementation of the `sls-rust build` command.
//!
//! Builds every Rust function of the descriptor, packages each binary as a
//! `bootstrap` zip and writes the patched descriptor back.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use sls_rust_lib::cargo::CargoCommand;
use sls_rust_lib::config::PipelineConfig;
use sls_rust_lib::package::list_entries;
use sls_rust_lib::pipeline::{self, Outcome};
use sls_rust_lib::service::ServiceConfig;

use crate::output::{
  OutputFormat, format_bytes, format_duration, print_info, print_item, print_json, print_stat, print_success, symbols,
};

/// Execute the build command.
///
/// The descriptor is written to `out` when given, otherwise back to `config`.
/// Nothing is written when any function fails to build or package.
pub fn cmd_build(config: &Path, function: Option<String>, out: Option<&Path>, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let mut service = ServiceConfig::load(config).context("Failed to load descriptor")?;
  let options = PipelineConfig::for_descriptor(config).with_function(function);
  let cargo = CargoCommand::new(&options.cargo, &options.service_dir).with_flags(service.cargo_flags());

  let outcome = pipeline::build(&mut service, &options, &cargo).context("Build failed")?;

  if let Outcome::Completed(_) = &outcome {
    let target = out.unwrap_or(config);
    service.save(target).context("Failed to write descriptor")?;
    info!(path = %target.display(), "descriptor updated");
  }

  if output.is_json() {
    return print_json(&outcome);
  }

  match outcome {
    Outcome::Skipped { provider } => {
      print_info(&format!(
        "Provider {} is not supported, nothing built",
        provider.as_deref().unwrap_or("(unset)")
      ));
    }
    Outcome::Completed(report) => {
      println!();
      print_success("Build complete!");
      for unit in &report.units {
        print_item(
          symbols::SUCCESS,
          &unit.name,
          &format!("{} ({})", unit.archive_path.display(), unit.profile),
        );
        let entries = list_entries(&unit.archive_path).context("Failed to read archive")?;
        for entry in entries {
          print_item(symbols::INFO, &entry.name, &format_bytes(entry.size));
        }
      }
      println!();
      print_stat("Functions packaged", &report.units.len().to_string());
      if let Some(runtime) = &report.patch.provider_runtime {
        print_stat("Provider runtime", runtime);
      }
      print_stat("Duration", &format_duration(start.elapsed()));
    }
  }

  Ok(())
}
