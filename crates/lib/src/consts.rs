/// Runtime tag marking a function as a native Rust function.
pub const RUST_RUNTIME: &str = "rust";

/// Generic custom-runtime tag understood by the downstream platform.
pub const BASE_RUNTIME: &str = "provided";

/// The only provider whose custom runtime accepts a `bootstrap` executable.
pub const SUPPORTED_PROVIDER: &str = "aws";

pub const TARGET_TRIPLE: &str = "x86_64-unknown-linux-musl";

/// Executable name required inside the deployment archive.
pub const BOOTSTRAP: &str = "bootstrap";

/// Unix mode of the `bootstrap` entry (rwxr-xr-x).
pub const BOOTSTRAP_MODE: u32 = 0o755;

pub const DEFAULT_CONFIG: &str = "serverless.yml";

pub const DEFAULT_TARGET_DIR: &str = "target";

/// Build record written next to the per-profile output directories.
pub const BUILD_RECORD_FILENAME: &str = ".sls-rust-build.json";

pub const CARGO_ENV: &str = "SLS_RUST_CARGO";

pub const TARGET_DIR_ENV: &str = "CARGO_TARGET_DIR";
