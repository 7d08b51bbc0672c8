//! SHA-256 over a byte stream with a wall-clock deadline.
//!
//! The deadline is checked after every read, never during one, so a single
//! slow read can overrun the budget by its own duration.

use crate::clock::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Size of the reusable read buffer.
pub const CHUNK_SIZE: usize = 16 * 1024;

/// Errors surfaced by checksum items.
#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    /// Elapsed time since the start exceeded the timeout.
    #[error("Timeout while processing item.")]
    Timeout,
    /// The stream failed mid-read and the policy is [`ReadErrorPolicy::Fail`].
    #[error("Cannot read file: {0}")]
    Read(#[source] io::Error),
    /// The file could not be opened.
    #[error("Cannot open file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What to do when the underlying stream returns an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadErrorPolicy {
    /// Treat the error as end of stream; the digest covers the bytes read so far.
    #[default]
    Eof,
    /// Return [`ChecksumError::Read`].
    Fail,
}

/// Per-call knobs for [`sha256_with_deadline_using`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestOptions {
    pub read_errors: ReadErrorPolicy,
}

/// Compute SHA-256 of `reader` and return the digest as lowercase hex, failing with
/// [`ChecksumError::Timeout`] once more than `timeout_secs` have passed since `start`.
pub fn sha256_with_deadline<R: Read + ?Sized>(
    reader: &mut R,
    start: Instant,
    timeout_secs: u64,
) -> Result<String, ChecksumError> {
    sha256_with_deadline_using(
        reader,
        start,
        timeout_secs,
        &DigestOptions::default(),
        &SystemClock,
    )
}

/// Same as [`sha256_with_deadline`] with explicit options and time source.
pub fn sha256_with_deadline_using<R, C>(
    reader: &mut R,
    start: Instant,
    timeout_secs: u64,
    opts: &DigestOptions,
    clock: &C,
) -> Result<String, ChecksumError>
where
    R: Read + ?Sized,
    C: Clock + ?Sized,
{
    let timeout = Duration::from_secs(timeout_secs);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];
    let mut total: u64 = 0;

    tracing::debug!(timeout_secs, "sha256 digest started");

    let elapsed = loop {
        // None: the read was interrupted; check the deadline and re-issue it.
        let read = read_chunk(reader, &mut buf, opts.read_errors)?;
        let n = read.unwrap_or_default();
        hasher.update(&buf[..n]);
        total += n as u64;

        let elapsed = clock.now().saturating_duration_since(start);
        if elapsed > timeout {
            tracing::warn!(
                bytes = total,
                elapsed_ms = elapsed.as_millis() as u64,
                timeout_secs,
                "sha256 digest timed out"
            );
            return Err(ChecksumError::Timeout);
        }

        if read == Some(0) {
            break elapsed;
        }
    };

    let digest = hasher.finalize();
    tracing::debug!(
        bytes = total,
        elapsed_ms = elapsed.as_millis() as u64,
        "sha256 digest finished"
    );
    Ok(hex::encode(digest))
}

/// One read into `buf`. Returns `None` for an interrupted read; other errors
/// follow `policy`.
fn read_chunk<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    policy: ReadErrorPolicy,
) -> Result<Option<usize>, ChecksumError> {
    match reader.read(buf) {
        Ok(n) => Ok(Some(n)),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => match policy {
            ReadErrorPolicy::Eof => {
                tracing::warn!(error = %e, "read failed; treating as end of stream");
                Ok(Some(0))
            }
            ReadErrorPolicy::Fail => Err(ChecksumError::Read(e)),
        },
    }
}
