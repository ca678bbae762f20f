use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sls_rust_lib::consts::DEFAULT_CONFIG;

mod cmd;
mod output;

use output::{OutputFormat, print_error};

/// sls-rust - native Rust packaging for serverless functions
#[derive(Parser)]
#[command(name = "sls-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to the deployment descriptor
  #[arg(short, long, global = true, default_value = DEFAULT_CONFIG)]
  config: PathBuf,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build and package Rust functions, then point the descriptor at the archives
  Build {
    /// Only build this function
    #[arg(short, long)]
    function: Option<String>,

    /// Write the patched descriptor here instead of over the input
    #[arg(long)]
    out: Option<PathBuf>,
  },

  /// Delete the binaries and archives produced by the last build
  Clean {
    /// Only clean this function
    #[arg(short, long)]
    function: Option<String>,
  },

  /// List the functions that would be built
  Units {
    /// Only consider this function
    #[arg(short, long)]
    function: Option<String>,
  },

  /// Show toolchain and runtime settings
  Info,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
  };

  // Logs go to stderr so `--output json` stays parseable.
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Build { function, out } => cmd::cmd_build(&cli.config, function, out.as_deref(), cli.output),
    Commands::Clean { function } => cmd::cmd_clean(&cli.config, function, cli.output),
    Commands::Units { function } => cmd::cmd_units(&cli.config, function, cli.output),
    Commands::Info => {
      cmd::cmd_info(&cli.config);
      Ok(())
    }
  }
}
