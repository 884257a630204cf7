// ABOUTME: Configuration management for the tmplgate application
// ABOUTME: Loads the global config snapshot and logging settings from YAML and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::template::{CompilerOptions, ConfigSnapshot, Context};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Process-wide values merged under every render context
    #[serde(default)]
    pub global: Context,

    #[serde(default = "default_escape_html")]
    pub escape_html: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_escape_html() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global: Context::new(),
            escape_html: default_escape_html(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => {
                anyhow::bail!("Configuration file '{}' does not exist", p.display());
            }
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(|e| {
                anyhow::anyhow!("Failed to read config '{}': {}", config_path.display(), e)
            })?;
            Self::from_yaml(&contents)?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("tmplgate.yaml"),
            PathBuf::from("tmplgate.yml"),
            PathBuf::from(".tmplgate.yaml"),
            PathBuf::from(".tmplgate.yml"),
        ];

        // Check current directory
        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        // Check home directory
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".tmplgate").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Return default path (may not exist)
        PathBuf::from("tmplgate.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var("TMPLGATE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TMPLGATE_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(escape) = std::env::var("TMPLGATE_ESCAPE_HTML") {
            self.escape_html = escape.parse()?;
        }

        Ok(())
    }

    /// The `global` section as a read-only snapshot
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot::new(self.global.clone())
    }

    pub fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions {
            escape_html: self.escape_html,
        }
    }
}
