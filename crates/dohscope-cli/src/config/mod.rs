//! Configuration management.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// DoH JSON resolver endpoint.
    pub resolver_url: Option<String>,

    /// Certificate fetch proxy endpoint.
    pub certificate_proxy_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Always show explanations (as if --explain was passed).
    #[serde(default)]
    pub explain_by_default: bool,
}

/// Keys accepted by `dohscope config set`.
pub const KEYS: &str = "Available keys:\n  \
    resolver_url          - DoH JSON resolver endpoint\n  \
    certificate_proxy_url - Certificate fetch proxy endpoint\n  \
    timeout_secs          - Per-request timeout in seconds\n  \
    output_format         - Default output format (pretty/json/csv/yaml)\n  \
    explain_by_default    - Always explain commands (true/false)";

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "dohscope", "dohscope")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a file, falling back to defaults if missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set a value by key name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "resolver_url" | "resolver" => {
                self.resolver_url = Some(value.to_string());
            }
            "certificate_proxy_url" | "proxy" => {
                self.certificate_proxy_url = Some(value.to_string());
            }
            "timeout_secs" | "timeout" => {
                let secs: u64 = value.parse()?;
                if secs == 0 {
                    anyhow::bail!("timeout_secs must be at least 1");
                }
                self.timeout_secs = Some(secs);
            }
            "output_format" | "output" => {
                self.output_format = Some(value.parse()?);
            }
            "explain_by_default" | "explain" => {
                self.explain_by_default = value.parse()?;
            }
            _ => anyhow::bail!("Unknown config key: {}\n\n{}", key, KEYS),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("resolver", "https://cloudflare-dns.com/dns-query").unwrap();
        config.set("timeout_secs", "4").unwrap();
        config.set("output", "yaml").unwrap();
        config.set("explain", "true").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.timeout_secs, Some(4));
        assert_eq!(loaded.output_format, Some(OutputFormat::Yaml));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("timeout_secs", "0").is_err());
        assert!(config.set("timeout_secs", "soon").is_err());
        assert!(config.set("output_format", "xml").is_err());
        assert!(config.set("api_key", "x").is_err());
    }
}
