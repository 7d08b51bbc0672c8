//! Sha256 command: hash one file within the item timeout.

use anyhow::{Context, Result};
use std::path::PathBuf;
use vfsum_core::{item, DigestOptions};

/// Compute and print SHA-256 of the given file.
///
/// Hashing is blocking file I/O, so it runs on tokio's blocking pool.
pub async fn run_sha256(path: PathBuf, timeout_secs: u64, opts: DigestOptions) -> Result<()> {
    let result = tokio::task::spawn_blocking(move || item::sha256_file(&path, timeout_secs, &opts))
        .await
        .context("checksum task panicked")??;
    tracing::info!(path = %result.path.display(), digest = %result.digest, "checksum computed");
    println!("{}", result);
    Ok(())
}
