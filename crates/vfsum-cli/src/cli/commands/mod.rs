//! CLI command handlers, one file per command.

mod checksum;
mod config;

pub use checksum::run_sha256;
pub use config::run_config;
