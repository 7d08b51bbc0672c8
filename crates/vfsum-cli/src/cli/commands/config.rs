//! Config command: show the effective configuration.

use anyhow::Result;
use vfsum_core::config::{self, VfsumConfig};

pub async fn run_config(cfg: &VfsumConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
