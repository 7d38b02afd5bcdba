//! Configuration handling for the LaRA CLI
//!
//! Supports loading configuration from lara.toml files with CLI argument overrides.
//! Scores are given in real units and scaled onto the integer DP axis by the
//! precision factor.

use anyhow::{Result, Context};
use lara_core::scoring::{scale, ScorePreset, SubstitutionMatrix};
use lara_core::{BatchParams, FailurePolicy, ScoreConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Name of the configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lara.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default number of threads to use
    #[serde(default = "default_threads")]
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Substitution scheme ("ribosum85-60" or "simple")
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Gap open score (negative)
    #[serde(default = "default_gap_open")]
    pub gap_open: f32,

    /// Gap extend score (negative)
    #[serde(default = "default_gap_extend")]
    pub gap_extend: f32,

    /// Match score for the simple preset
    #[serde(default = "default_match_score")]
    pub match_score: f32,

    /// Mismatch score for the simple preset
    #[serde(default = "default_mismatch_score")]
    pub mismatch_score: f32,

    /// Scale between real scores and the integer DP axis
    #[serde(default = "default_precision_factor")]
    pub precision_factor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Admit edges on alignments scoring at most this far below the optimum
    #[serde(default = "default_suboptimal_diff")]
    pub suboptimal_diff: f32,

    /// Policy for sequence pairs that fail ("abort" or "skip")
    #[serde(default)]
    pub on_error: FailurePolicy,
}

// Default value functions
fn default_threads() -> usize { num_cpus::get() }
fn default_preset() -> String { ScorePreset::Ribosum85_60.name().to_string() }
fn default_gap_open() -> f32 { -6.0 }
fn default_gap_extend() -> f32 { -2.0 }
fn default_match_score() -> f32 { 1.0 }
fn default_mismatch_score() -> f32 { -1.0 }
fn default_precision_factor() -> f32 { lara_core::DEFAULT_PRECISION_FACTOR }
fn default_suboptimal_diff() -> f32 { 10.0 }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            gap_open: default_gap_open(),
            gap_extend: default_gap_extend(),
            match_score: default_match_score(),
            mismatch_score: default_mismatch_score(),
            precision_factor: default_precision_factor(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            suboptimal_diff: default_suboptimal_diff(),
            on_error: FailurePolicy::Abort,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::info!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default configuration")
    }

    /// Build the core score configuration.
    pub fn score_config(&self) -> Result<ScoreConfig> {
        let s = &self.scoring;
        let preset: ScorePreset = s.preset.parse()
            .map_err(|_| CliError::config(format!(
                "Unknown scoring preset '{}'. Available presets: {}",
                s.preset,
                ScorePreset::available().join(", ")
            )))?;

        if s.gap_open > 0.0 || s.gap_extend > 0.0 {
            return Err(CliError::config(format!(
                "Gap scores must not be positive (open {}, extend {})",
                s.gap_open, s.gap_extend
            )).into());
        }

        let config = match preset {
            ScorePreset::Ribosum85_60 => {
                ScoreConfig::ribosum85_60(s.gap_open, s.gap_extend, s.precision_factor)?
            }
            ScorePreset::Simple => {
                let factor = s.precision_factor;
                let matrix = SubstitutionMatrix::uniform(
                    scale(s.match_score, factor)?,
                    scale(s.mismatch_score, factor)?,
                );
                ScoreConfig::new(matrix, scale(s.gap_open, factor)?, scale(s.gap_extend, factor)?, factor)?
            }
        };

        log::debug!(
            "Scoring: {} (gap open {}, gap extend {}, factor {})",
            preset.name(), config.gap_open(), config.gap_extend(), config.precision_factor()
        );
        Ok(config)
    }

    /// Build batch parameters on the axis of `score_config`.
    pub fn batch_params(&self, score_config: &ScoreConfig) -> Result<BatchParams> {
        if self.filter.suboptimal_diff < 0.0 {
            return Err(CliError::config(format!(
                "suboptimal_diff must be non-negative, got {}",
                self.filter.suboptimal_diff
            )).into());
        }

        Ok(BatchParams {
            suboptimal_diff: score_config.to_scaled(self.filter.suboptimal_diff)?,
            on_error: self.filter.on_error,
        })
    }
}
