mod build;
mod clean;
mod info;
mod units;

pub use build::cmd_build;
pub use clean::cmd_clean;
pub use info::cmd_info;
pub use units::cmd_units;
