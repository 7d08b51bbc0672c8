//! CLI for vfsum.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vfsum_core::config::{self, VfsumConfig};
use vfsum_core::ReadErrorPolicy;

use commands::{run_config, run_sha256};

/// Top-level CLI for vfsum.
#[derive(Debug, Parser)]
#[command(name = "vfsum")]
#[command(about = "vfsum: SHA-256 of a file within a time budget", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Compute SHA-256 of a file, failing if it takes longer than the timeout.
    Sha256 {
        /// Path to the file.
        path: PathBuf,

        /// Timeout in seconds (overrides `timeout_secs` from config).
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Fail on read errors instead of hashing what was read so far.
        #[arg(long)]
        strict_read: bool,
    },

    /// Print the effective configuration and where it was loaded from.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Sha256 {
                path,
                timeout,
                strict_read,
            } => {
                let (timeout_secs, opts) = item_settings(&cfg, timeout, strict_read)?;
                run_sha256(path, timeout_secs, opts).await?;
            }
            CliCommand::Config => run_config(&cfg).await?,
        }

        Ok(())
    }
}

/// Merge command-line overrides into the configured item settings.
/// The configured timeout is only range-checked when `--timeout` doesn't replace it.
fn item_settings(
    cfg: &VfsumConfig,
    timeout: Option<u64>,
    strict_read: bool,
) -> Result<(u64, vfsum_core::DigestOptions)> {
    let mut opts = cfg.digest_options();
    if strict_read {
        opts.read_errors = ReadErrorPolicy::Fail;
    }
    let timeout_secs = match timeout {
        Some(t) => t,
        None => {
            cfg.validate()?;
            cfg.timeout_secs
        }
    };
    Ok((timeout_secs, opts))
}

#[cfg(test)]
mod tests;
