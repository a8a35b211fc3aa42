//! Optional settings read from `skill-lens.json` in the working directory.
//!
//! Every field has a default, so a missing file or a partial one is fine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "skill-lens.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where saved figures are written.
    pub output_dir: PathBuf,
    /// Where `<title>.json` posting stores and the stopword list live.
    pub data_dir: PathBuf,
    /// Stopword CSV file name inside `data_dir`.
    pub stopwords_file: String,
    pub wordcloud: WordCloudSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            data_dir: PathBuf::from("."),
            stopwords_file: "stopwords.csv".to_string(),
            wordcloud: WordCloudSettings::default(),
        }
    }
}

/// Word-cloud canvas and font parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WordCloudSettings {
    pub width: f32,
    pub height: f32,
    pub max_words: usize,
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// Offset into the colour palette; fixes word colours between runs.
    pub seed: usize,
}

impl Default for WordCloudSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            max_words: 200,
            min_font_size: 6.0,
            max_font_size: 110.0,
            seed: 8,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        serde_json::from_str(&text).context("parsing settings JSON")
    }

    /// Load [`SETTINGS_FILE`] if present, otherwise defaults.
    ///
    /// A malformed file is logged and ignored.
    pub fn load_or_default() -> Self {
        let path = Path::new(SETTINGS_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn stopwords_path(&self) -> PathBuf {
        self.data_dir.join(&self.stopwords_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fill_in_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"output_dir": "figures", "wordcloud": {"max_words": 50}}"#)
                .unwrap();

        assert_eq!(settings.output_dir, PathBuf::from("figures"));
        assert_eq!(settings.stopwords_path(), PathBuf::from("./stopwords.csv"));
        assert_eq!(settings.wordcloud.max_words, 50);
        assert_eq!(settings.wordcloud.width, 800.0);
    }

    #[test]
    fn malformed_settings_are_an_error() {
        let path = std::env::temp_dir().join(format!("skill-lens-settings-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Settings::load(&path).is_err());
    }
}
