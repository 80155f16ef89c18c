//! Configuration management for `kindred-climates`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::KindredError;
use crate::location_resolver::GazetteerEntry;
use crate::similarity::{Criterion, DEFAULT_SIMILAR_THRESHOLD, SimilarityScorer};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KindredConfig {
    /// Archived weather data settings
    pub archive: ArchiveConfig,
    /// Similarity scoring settings
    pub similarity: SimilarityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Known places the resolver can look up
    pub locations: Vec<GazetteerEntry>,
}

/// Archived weather data settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Directory holding saved `OpenMeteo` archive responses
    pub data_dir: PathBuf,
}

/// Similarity scoring settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Minimum score for a `Similar` verdict
    pub similar_threshold: u32,
    /// Ordered scoring criteria
    pub criteria: Vec<Criterion>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("kindred-climates").join("archive"))
        .unwrap_or_else(|| PathBuf::from("archive"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_locations() -> Vec<GazetteerEntry> {
    vec![
        GazetteerEntry {
            city: "Chattanooga".to_string(),
            region: "Tennessee".to_string(),
            latitude: 35.0456,
            longitude: -85.3097,
        },
        GazetteerEntry {
            city: "Austin".to_string(),
            region: "Texas".to_string(),
            latitude: 30.2672,
            longitude: -97.7431,
        },
    ]
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            similar_threshold: DEFAULT_SIMILAR_THRESHOLD,
            criteria: Criterion::default_set(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for KindredConfig {
    fn default() -> Self {
        Self {
            archive: ArchiveConfig::default(),
            similarity: SimilarityConfig::default(),
            logging: LoggingConfig::default(),
            locations: default_locations(),
        }
    }
}

impl SimilarityConfig {
    /// Build the scorer these settings describe
    pub fn scorer(&self) -> crate::Result<SimilarityScorer> {
        SimilarityScorer::new(self.criteria.clone(), self.similar_threshold)
    }
}

impl KindredConfig {
    /// Load configuration from `config_path`, or the default location when `None`,
    /// then apply environment overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. KINDRED_LOGGING__LEVEL=debug
        builder = builder.add_source(
            Environment::with_prefix("KINDRED")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: KindredConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kindred-climates").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.archive.data_dir.as_os_str().is_empty() {
            self.archive.data_dir = default_data_dir();
        }
        if self.similarity.criteria.is_empty() {
            self.similarity.criteria = Criterion::default_set();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_similarity()?;
        self.validate_locations()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_similarity(&self) -> Result<()> {
        self.similarity
            .scorer()
            .with_context(|| "Invalid similarity settings")?;
        Ok(())
    }

    fn validate_locations(&self) -> Result<()> {
        for entry in &self.locations {
            if entry.city.trim().is_empty() || entry.region.trim().is_empty() {
                return Err(KindredError::config(
                    "Every location needs a city and a region",
                )
                .into());
            }

            if !(-90.0..=90.0).contains(&entry.latitude)
                || !(-180.0..=180.0).contains(&entry.longitude)
            {
                return Err(KindredError::config(format!(
                    "Coordinates for {}, {} are out of range: ({}, {})",
                    entry.city, entry.region, entry.latitude, entry.longitude
                ))
                .into());
            }
        }
        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(KindredError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(KindredError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
