//! sls-rust-lib: native Rust packaging for serverless functions
//!
//! Builds every function whose runtime is `rust` with cargo for the musl
//! target, packages each binary as a single-entry `bootstrap` zip, and points
//! the deployment descriptor at the archives:
//! - `service`: the deployment descriptor, loaded and saved as YAML
//! - `unit`: selection of the functions that need a native build
//! - `cargo`: the compiler invocation
//! - `package`: the `bootstrap` archive
//! - `patch`: descriptor changes, applied in one step
//! - `record` / `clean`: what was built, and removing it again

pub mod cargo;
pub mod clean;
pub mod config;
pub mod consts;
pub mod error;
pub mod package;
pub mod patch;
pub mod pipeline;
pub mod record;
pub mod service;
pub mod unit;

pub use error::{PipelineError, Result};
