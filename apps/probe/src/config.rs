//! Probe configuration.
//!
//! Stored as TOML:
//! - Linux: `$XDG_CONFIG_HOME/steambridge/probe.toml` (`~/.config` fallback)
//! - Windows: `%APPDATA%/steambridge/probe.toml`
//!
//! A path given as the first command-line argument takes precedence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use steambridge::{ClientOptions, PollOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Overrides the platform default library name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_path: Option<PathBuf>,

    /// App to initialise as. Unset lets Steam read `steam_appid.txt`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<u32>,

    /// Used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub poll: PollConfig,

    /// Leaderboard to look up and sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaderboard: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_max_retries() -> u32 {
    50
}

fn default_retry_delay_ms() -> u64 {
    100
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_path: None,
            app_id: None,
            log_level: default_log_level(),
            poll: PollConfig::default(),
            leaderboard: None,
        }
    }
}

impl Config {
    /// Loads `path`, or the platform location when `None`. A missing file
    /// yields defaults, which are written back.
    pub fn load(path: Option<PathBuf>) -> anyhow::Result<(Self, PathBuf)> {
        let path = match path {
            Some(path) => path,
            None => config_path()?,
        };
        Ok((Self::load_from(&path)?, path))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            library_path: self.library_path.clone(),
            app_id: self.app_id,
            poll: PollOptions::new(
                self.poll.max_retries,
                Duration::from_millis(self.poll.retry_delay_ms),
            ),
        }
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("steambridge").join("probe.toml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let base = match std::env::var_os("XDG_CONFIG_HOME") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => {
                let home = std::env::var_os("HOME")
                    .ok_or_else(|| anyhow::anyhow!("neither XDG_CONFIG_HOME nor HOME is set"))?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("steambridge").join("probe.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.library_path, None);
        assert_eq!(config.app_id, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.poll.max_retries, 50);
        assert_eq!(config.poll.retry_delay_ms, 100);
        assert_eq!(config.leaderboard, None);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
            app_id = 480

            [poll]
            max_retries = 5
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.app_id, Some(480));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.poll.max_retries, 5);
        assert_eq!(config.poll.retry_delay_ms, 100);
    }

    #[test]
    fn client_options_carry_poll_budget() {
        let config = Config {
            library_path: Some("/opt/steam/libsteam_api.so".into()),
            app_id: Some(480),
            poll: PollConfig {
                max_retries: 10,
                retry_delay_ms: 250,
            },
            ..Config::default()
        };
        let options = config.client_options();
        assert_eq!(options.app_id, Some(480));
        assert_eq!(
            options.library_path.as_deref(),
            Some(Path::new("/opt/steam/libsteam_api.so"))
        );
        assert_eq!(options.poll.max_retries, 10);
        assert_eq!(options.poll.retry_delay, Duration::from_millis(250));
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("probe.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("probe.toml");

        let config = Config {
            leaderboard: Some("Feet Traveled".into()),
            log_level: "debug".into(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let (loaded, loaded_path) = Config::load(Some(path.clone())).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded_path, path);
    }
}
