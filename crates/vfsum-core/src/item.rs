//! File-level checksum item: open a path and hash it within the item timeout.

use crate::checksum::{self, ChecksumError, DigestOptions};
use crate::clock::{Clock, SystemClock};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Successful checksum of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    pub path: PathBuf,
    pub digest: String,
}

impl fmt::Display for ItemResult {
    /// Same layout as coreutils `sha256sum`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.digest, self.path.display())
    }
}

/// Compute SHA-256 of the file at `path` within `timeout_secs`.
pub fn sha256_file(
    path: &Path,
    timeout_secs: u64,
    opts: &DigestOptions,
) -> Result<ItemResult, ChecksumError> {
    sha256_file_using(path, timeout_secs, opts, &SystemClock)
}

/// Like [`sha256_file`] with an explicit clock. The start time is taken before the
/// file is opened, so a slow open counts against the timeout.
pub fn sha256_file_using<C: Clock + ?Sized>(
    path: &Path,
    timeout_secs: u64,
    opts: &DigestOptions,
    clock: &C,
) -> Result<ItemResult, ChecksumError> {
    let start = clock.now();
    let mut file = File::open(path).map_err(|source| ChecksumError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "hashing file");
    let digest = checksum::sha256_with_deadline_using(&mut file, start, timeout_secs, opts, clock)?;
    Ok(ItemResult {
        path: path.to_path_buf(),
        digest,
    })
}
