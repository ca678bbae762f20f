//! Implementation of the `sls-rust units` command.
//!
//! Shows which functions would be built, without running cargo.

use std::path::Path;

use anyhow::{Context, Result};

use sls_rust_lib::config::PipelineConfig;
use sls_rust_lib::service::ServiceConfig;
use sls_rust_lib::unit::select_units;

use crate::output::{OutputFormat, print_info, print_item, print_json, symbols};

pub fn cmd_units(config: &Path, function: Option<String>, output: OutputFormat) -> Result<()> {
  let service = ServiceConfig::load(config).context("Failed to load descriptor")?;
  let options = PipelineConfig::for_descriptor(config).with_function(function);

  let units = select_units(&service, options.function.as_deref())?;

  if output.is_json() {
    let items: Vec<_> = units
      .iter()
      .map(|unit| {
        serde_json::json!({
          "name": unit.name,
          "package": unit.package,
          "binary": unit.binary,
          "profile": unit.profile,
          "archive": unit.archive_path(&options.target_dir),
        })
      })
      .collect();
    return print_json(&items);
  }

  print_info(&format!("{} Rust function(s)", units.len()));
  for unit in &units {
    print_item(
      symbols::INFO,
      &unit.name,
      &format!(
        "{}.{} [{}] {}",
        unit.package,
        unit.binary,
        unit.profile,
        unit.archive_path(&options.target_dir).display()
      ),
    );
  }

  Ok(())
}
