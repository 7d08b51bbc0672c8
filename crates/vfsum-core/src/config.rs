use crate::checksum::{DigestOptions, ReadErrorPolicy};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Allowed item timeout range in seconds (same bounds as the agent's plugin timeout).
pub const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=30;

/// Global configuration loaded from `~/.config/vfsum/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VfsumConfig {
    /// Item timeout in seconds, measured from just before the file is opened.
    pub timeout_secs: u64,
    /// Read failure handling: "eof" (hash what was read) or "fail".
    #[serde(default)]
    pub read_errors: ReadErrorPolicy,
}

impl Default for VfsumConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 3,
            read_errors: ReadErrorPolicy::Eof,
        }
    }
}

impl VfsumConfig {
    pub fn validate(&self) -> Result<()> {
        if !TIMEOUT_RANGE.contains(&self.timeout_secs) {
            bail!(
                "timeout_secs must be between {} and {}, got {}",
                TIMEOUT_RANGE.start(),
                TIMEOUT_RANGE.end(),
                self.timeout_secs
            );
        }
        Ok(())
    }

    pub fn digest_options(&self) -> DigestOptions {
        DigestOptions {
            read_errors: self.read_errors,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vfsum")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
/// Values are not range-checked here; callers run [`VfsumConfig::validate`]
/// once command-line overrides are known.
pub fn load_or_init() -> Result<VfsumConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VfsumConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: VfsumConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = VfsumConfig::default();
        assert_eq!(cfg.timeout_secs, 3);
        assert_eq!(cfg.read_errors, ReadErrorPolicy::Eof);
        cfg.validate().unwrap();
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = VfsumConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: VfsumConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.timeout_secs, cfg.timeout_secs);
        assert_eq!(parsed.read_errors, cfg.read_errors);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            timeout_secs = 10
            read_errors = "fail"
        "#;
        let cfg: VfsumConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.timeout_secs, 10);
        assert_eq!(cfg.digest_options().read_errors, ReadErrorPolicy::Fail);
    }

    #[test]
    fn config_toml_read_errors_optional() {
        let cfg: VfsumConfig = toml::from_str("timeout_secs = 5").unwrap();
        assert_eq!(cfg.read_errors, ReadErrorPolicy::Eof);
    }

    #[test]
    fn validate_rejects_out_of_range_timeout() {
        for bad in [0, 31, 600] {
            let cfg = VfsumConfig {
                timeout_secs: bad,
                ..VfsumConfig::default()
            };
            assert!(cfg.validate().is_err(), "timeout {} should be rejected", bad);
        }
        let cfg = VfsumConfig {
            timeout_secs: 30,
            ..VfsumConfig::default()
        };
        cfg.validate().unwrap();
    }
}
