use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub transcript: TranscriptConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// Live transcript feed settings.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TranscriptConfig {
    /// WebSocket endpoint delivering transcript lines. Absent means the live
    /// feature is disabled, which is a valid state rather than an error.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    /// Override for the data directory. Defaults to `~/hotmem/data`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct IngestConfig {
    /// Artificial delay applied before manual-path extraction, purely for
    /// perceived feedback. Zero skips the delay entirely.
    #[serde(default)]
    pub processing_delay_ms: u64,
}

impl Config {
    /// Load `~/hotmem/config.json`. A missing file yields the defaults
    /// (no live feed, standard data directory) rather than an error.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_dir()?.join("config.json");

        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Resolved data directory for the JSON store.
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }
        Ok(Self::config_dir()?.join("data"))
    }

    /// Manual-path processing delay as a [`Duration`].
    #[must_use]
    pub const fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.ingest.processing_delay_ms)
    }

    fn config_dir() -> anyhow::Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join("hotmem"))
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "transcript": {
    "url": null
  },
  "storage": {
    "data_dir": null
  },
  "ingest": {
    "processing_delay_ms": 0
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Set \"transcript.url\" to a WebSocket endpoint to enable the live feed");
        println!("   2. Run 'hotmem process \"note this: try it out\"' to extract a first memory");
        println!("   3. Run 'hotmem rules list' to see the default trigger phrases");
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").expect("empty object should deserialize");

        assert!(config.transcript.url.is_none());
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.processing_delay(), Duration::ZERO);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_explicit_fields_are_read() {
        let json = r#"{
            "transcript": { "url": "ws://localhost:8900/feed" },
            "ingest": { "processing_delay_ms": 250 }
        }"#;

        let config: Config = serde_json::from_str(json).expect("config should deserialize");

        assert_eq!(
            config.transcript.url.as_deref(),
            Some("ws://localhost:8900/feed")
        );
        assert_eq!(config.processing_delay(), Duration::from_millis(250));
    }
}
