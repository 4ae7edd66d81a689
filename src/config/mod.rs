use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// YouTube caption provider settings
    pub youtube: YoutubeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeConfig {
    /// Innertube player endpoint used to look up caption tracks
    pub player_url: String,

    /// Preferred caption language code (falls back to the first available track)
    pub preferred_language: String,

    /// Client version reported to the player endpoint
    pub client_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            youtube: YoutubeConfig {
                player_url: "https://www.youtube.com/youtubei/v1/player".to_string(),
                preferred_language: "en".to_string(),
                client_version: "20.10.38".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let config: Config = serde_yaml::from_str(&content)
                .context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("yt-transcript-api").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        let parsed = Url::parse(&self.youtube.player_url)
            .context("youtube.player_url is not a valid URL")?;

        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("youtube.player_url must use HTTP or HTTPS");
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Listen: {}:{}", self.server.host, self.server.port);
        println!("  Player URL: {}", self.youtube.player_url);
        println!("  Preferred Language: {}", self.youtube.preferred_language);
        println!("  Client Version: {}", self.youtube.client_version);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_rejects_non_http_player_url() {
        let mut config = Config::default();
        config.youtube.player_url = "ftp://example.com/player".to_string();
        assert!(config.validate().is_err());

        config.youtube.player_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
