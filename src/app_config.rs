use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target languages, processed in this order
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Directory holding one exported document per language
    #[serde(default = "default_localization_path")]
    pub localization_path: PathBuf,

    /// Document file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Project passed to the export tool
    #[serde(default)]
    pub project_path: Option<PathBuf>,

    /// JSON file with the UI-derived node list
    #[serde(default)]
    pub nodes_path: Option<PathBuf>,

    /// Process languages as concurrent tasks
    #[serde(default)]
    pub concurrent_languages: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_localization_path() -> PathBuf {
    PathBuf::from("localizations")
}

fn default_extension() -> String {
    crate::sync::driver::DEFAULT_EXTENSION.to_string()
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load the configuration, writing a default file first if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(anyhow!("At least one language is required"));
        }

        let mut seen = HashSet::new();
        for language in &self.languages {
            language_utils::validate_language_code(language)?;
            if !seen.insert(language.as_str()) {
                return Err(anyhow!("Language listed twice: {}", language));
            }
            if !language_utils::is_known_language(language) {
                warn!("Unrecognized language code '{}'", language);
            }
        }

        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(anyhow!(
                "Extension must be non-empty and given without a dot: '{}'",
                self.extension
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            languages: default_languages(),
            localization_path: default_localization_path(),
            extension: default_extension(),
            project_path: None,
            nodes_path: None,
            concurrent_languages: false,
            log_level: LogLevel::default(),
        }
    }
}
