//! Configuration management for the skill-gap analyzer

use crate::error::{Result, SkillGapError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub artifacts: ArtifactConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

/// Locations of the optional learned artifacts. A missing file simply
/// leaves the matching capability absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub artifacts_dir: PathBuf,
    pub readiness_model: String,
    pub gap_ranker: String,
    pub skill_embeddings: String,
    pub recommender: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub roadmap_weeks: usize,
    pub max_resources_per_skill: usize,
    pub similarity: SimilarityBackend,
    pub extractor: ExtractorBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityBackend {
    None,
    Lexical,
    Embeddings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorBackend {
    None,
    Keywords,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let artifacts_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skillgap")
            .join("artifacts");

        Self {
            artifacts: ArtifactConfig {
                artifacts_dir,
                readiness_model: "readiness_model.json".to_string(),
                gap_ranker: "gap_ranker.json".to_string(),
                skill_embeddings: "skill_embeddings.json".to_string(),
                recommender: "recommender.json".to_string(),
            },
            analysis: AnalysisConfig {
                roadmap_weeks: 4,
                max_resources_per_skill: 2,
                similarity: SimilarityBackend::Lexical,
                extractor: ExtractorBackend::Keywords,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the config from the default location, writing defaults on first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| SkillGapError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skillgap")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.analysis.max_resources_per_skill == 0 {
            return Err(SkillGapError::Configuration(
                "analysis.max_resources_per_skill must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.artifacts.artifacts_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.analysis.roadmap_weeks, 4);
        assert_eq!(parsed.analysis.max_resources_per_skill, 2);
        assert_eq!(parsed.analysis.similarity, SimilarityBackend::Lexical);
        assert_eq!(parsed.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_load_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.analysis.roadmap_weeks, 4);
    }

    #[test]
    fn test_load_rejects_zero_resource_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.analysis.max_resources_per_skill = 0;
        config.save_to(&path).unwrap();

        assert!(matches!(Config::load_from(&path), Err(SkillGapError::Configuration(_))));
    }
}
