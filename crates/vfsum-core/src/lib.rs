pub mod config;
pub mod logging;

pub mod checksum;
pub mod clock;
pub mod item;

pub use checksum::{
    sha256_with_deadline, sha256_with_deadline_using, ChecksumError, DigestOptions,
    ReadErrorPolicy, CHUNK_SIZE,
};
pub use item::{sha256_file, ItemResult};
