//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use crate::output::export::CsvQuoting;
use crate::processing::catalog::{MatchMode, SkillCatalogEntry};
use crate::processing::scoring::MAX_SCORE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub matching: MatchingConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub skill_weight: f64,
    pub thematic_weight: f64,
    /// Scores at or above this get the positive summary
    pub summary_threshold: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub mode: MatchMode,
    /// TOML catalog replacing the built-in skills
    pub catalog_path: Option<PathBuf>,
    pub extra_skills: Vec<SkillCatalogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub max_candidates: usize,
    pub enable_caching: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub csv_quoting: CsvQuoting,
    pub color_output: bool,
    pub detailed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Markdown,
    Csv,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skill_weight: 0.6,
            thematic_weight: 0.4,
            summary_threshold: 5.0,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_candidates: 25,
            enable_caching: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            csv_quoting: CsvQuoting::Necessary,
            color_output: true,
            detailed: false,
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config = Self::from_toml_str(&content)?;
            log::debug!("Loaded configuration from {}", config_path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            log::info!("Wrote default configuration to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        for (name, weight) in [
            ("scoring.skill_weight", scoring.skill_weight),
            ("scoring.thematic_weight", scoring.thematic_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScreenerError::Configuration(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, weight
                )));
            }
        }

        if !(0.0..=MAX_SCORE).contains(&scoring.summary_threshold) {
            return Err(ScreenerError::Configuration(format!(
                "scoring.summary_threshold must lie in [0, {}] (got {})",
                MAX_SCORE, scoring.summary_threshold
            )));
        }

        if self.processing.max_candidates == 0 {
            return Err(ScreenerError::Configuration(
                "processing.max_candidates must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Set a single dotted key such as `scoring.skill_weight`.
    ///
    /// `self` is left untouched when the value does not parse or the result
    /// fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        updated.apply(key, value)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
            value.parse().map_err(|_| {
                ScreenerError::Configuration(format!("Invalid value for {}: {}", key, value))
            })
        }

        match key {
            "scoring.skill_weight" => self.scoring.skill_weight = parse(key, value)?,
            "scoring.thematic_weight" => self.scoring.thematic_weight = parse(key, value)?,
            "scoring.summary_threshold" => self.scoring.summary_threshold = parse(key, value)?,
            "matching.mode" => self.matching.mode = crate::cli::parse_match_mode(value)
                .map_err(ScreenerError::Configuration)?,
            "matching.catalog_path" => {
                self.matching.catalog_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "processing.max_candidates" => self.processing.max_candidates = parse(key, value)?,
            "processing.enable_caching" => self.processing.enable_caching = parse(key, value)?,
            "output.format" => self.output.format = crate::cli::parse_output_format(value)
                .map_err(ScreenerError::Configuration)?,
            "output.csv_quoting" => self.output.csv_quoting = crate::cli::parse_csv_quoting(value)
                .map_err(ScreenerError::Configuration)?,
            "output.color_output" => self.output.color_output = parse(key, value)?,
            "output.detailed" => self.output.detailed = parse(key, value)?,
            _ => {
                return Err(ScreenerError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scoring.skill_weight, 0.6);
        assert_eq!(config.scoring.thematic_weight, 0.4);
        assert_eq!(config.processing.max_candidates, 25);
        assert_eq!(config.matching.mode, MatchMode::Substring);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [scoring]
            skill_weight = 0.7
            thematic_weight = 0.3

            [matching]
            mode = "word_boundary"

            [[matching.extra_skills]]
            name = "Rust"
            variants = ["rust", "cargo"]
            "#,
        )
        .unwrap();

        assert_eq!(config.scoring.skill_weight, 0.7);
        assert_eq!(config.scoring.summary_threshold, 5.0);
        assert_eq!(config.matching.mode, MatchMode::WordBoundary);
        assert_eq!(config.matching.extra_skills.len(), 1);
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_rejects_negative_weight() {
        let result = Config::from_toml_str("[scoring]\nskill_weight = -0.1\n");
        assert!(matches!(result, Err(ScreenerError::Configuration(_))));
    }

    #[test]
    fn test_rejects_threshold_above_max() {
        let result = Config::from_toml_str("[scoring]\nsummary_threshold = 11.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_set_dotted_keys() {
        let mut config = Config::default();
        config.set("output.format", "json").unwrap();
        config.set("output.csv_quoting", "verbatim").unwrap();
        config.set("processing.max_candidates", "10").unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.csv_quoting, CsvQuoting::Verbatim);
        assert_eq!(config.processing.max_candidates, 10);

        assert!(config.set("processing.max_candidates", "zero").is_err());
        assert!(config.set("no.such_key", "1").is_err());
    }

    #[test]
    fn test_failed_set_leaves_config_unchanged() {
        let mut config = Config::default();

        assert!(config.set("scoring.skill_weight", "-1").is_err());
        assert_eq!(config.scoring.skill_weight, 0.6);

        assert!(config.set("scoring.summary_threshold", "10.5").is_err());
        assert_eq!(config.scoring.summary_threshold, 5.0);

        assert!(config.set("processing.max_candidates", "0").is_err());
        assert_eq!(config.processing.max_candidates, 25);
    }

    #[test]
    fn test_score_scale_is_not_configurable() {
        let mut config = Config::default();
        assert!(config.set("scoring.max_score", "100").is_err());

        let config = Config::from_toml_str("[scoring]\nsummary_threshold = 50.0\n");
        assert!(matches!(config, Err(ScreenerError::Configuration(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let first = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let mut changed = first.clone();
        changed.scoring.summary_threshold = 6.5;
        changed.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.scoring.summary_threshold, 6.5);
    }
}
