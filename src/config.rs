use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::tally::ModeSelection;
use crate::model::thresholds::AcceptanceThreshold;
use crate::model::vocabulary::ResponseVocabulary;
use crate::schema::{DiseasePolicy, HeaderMarkers};

pub const DEFAULT_MAX_DISEASE_DISPLAY_LEN: usize = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything the core needs besides the dataset. Every field can be
/// overridden from a JSON file; absent fields keep the built-in profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub markers: HeaderMarkers,
    pub vocabulary: ResponseVocabulary,
    pub acceptance_threshold: AcceptanceThreshold,
    pub mode_selection: ModeSelection,
    pub disease_policy: DiseasePolicy,
    pub max_disease_display_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::german_v1()
    }
}

impl EngineConfig {
    pub fn german_v1() -> Self {
        Self {
            markers: HeaderMarkers::german_v1(),
            vocabulary: ResponseVocabulary::german_v1(),
            acceptance_threshold: AcceptanceThreshold::default_v1(),
            mode_selection: ModeSelection::Auto,
            disease_policy: DiseasePolicy::FirstSeen,
            max_disease_display_len: DEFAULT_MAX_DISEASE_DISPLAY_LEN,
        }
    }

    pub fn from_json_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_json::from_str(text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.markers.named() {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("marker `{name}` is empty")));
            }
        }
        if self.markers.national == self.markers.study {
            return Err(ConfigError::Invalid(
                "national and study track tokens must differ".to_string(),
            ));
        }

        let vocab = &self.vocabulary;
        let literals = [
            ("yes", &vocab.yes),
            ("no", &vocab.no),
            ("cannot_answer", &vocab.cannot_answer),
        ];
        for (name, value) in literals {
            if value.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "vocabulary literal `{name}` is empty"
                )));
            }
        }
        if vocab.yes == vocab.no || vocab.yes == vocab.cannot_answer || vocab.no == vocab.cannot_answer
        {
            return Err(ConfigError::Invalid(
                "vocabulary literals must be pairwise distinct".to_string(),
            ));
        }

        let pct = self.acceptance_threshold.min_yes_pct;
        if !(0.0..=100.0).contains(&pct) {
            return Err(ConfigError::Invalid(format!(
                "acceptance threshold {pct} is outside [0, 100]"
            )));
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    EngineConfig::from_json_str(&text, path)
}
