use std::path::Path;

use sls_rust_lib::config::PipelineConfig;
use sls_rust_lib::consts::{BASE_RUNTIME, BOOTSTRAP, RUST_RUNTIME, TARGET_TRIPLE};

use crate::output::print_stat;

pub fn cmd_info(config: &Path) {
  let options = PipelineConfig::for_descriptor(config);

  println!("Toolchain:");
  print_stat("Cargo", &options.cargo.display().to_string());
  print_stat("Target", TARGET_TRIPLE);
  print_stat("Target dir", &options.target_dir.display().to_string());
  println!("Runtime:");
  print_stat("Native tag", RUST_RUNTIME);
  print_stat("Deployed as", BASE_RUNTIME);
  print_stat("Entry", BOOTSTRAP);
}
