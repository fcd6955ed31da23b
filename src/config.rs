use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "textlens.toml";

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub resources: ResourceConfig,
    pub window: WindowConfig,
}

/// Locations of the language resources loaded once at startup.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ResourceConfig {
    /// Falls back to the bundled English list when unset.
    pub stopwords: Option<PathBuf>,
    /// nlprule tokenizer binary; the one compiled into the program when unset.
    pub english_tokenizer: Option<PathBuf>,
    /// Extra `lemma<TAB>form` entries that win over the English dictionary.
    pub lemma_dictionary: Option<PathBuf>,
    pub pos_model_dir: PathBuf,
    pub ner_model_dir: PathBuf,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            stopwords: None,
            english_tokenizer: None,
            lemma_dictionary: None,
            pos_model_dir: PathBuf::from("models/pos"),
            ner_model_dir: PathBuf::from("models/ner"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "TextLens - NLP Explorer".to_string(),
            width: 800.0,
            height: 700.0,
        }
    }
}

impl Config {
    /// Loads the config named on the command line, or the default file if present.
    ///
    /// An explicitly requested file must exist. A missing default file yields
    /// the built-in defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Config, ConfigError> {
        match explicit_path {
            Some(path) => load_config_from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    load_config_from_file(default_path)
                } else {
                    tracing::info!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                    Ok(Config::default())
                }
            }
        }
    }

    fn resolve_relative_to(mut self, base_dir: &Path) -> Self {
        let resolve = |p: &PathBuf| if p.is_relative() { base_dir.join(p) } else { p.clone() };
        self.resources.stopwords = self.resources.stopwords.as_ref().map(resolve);
        self.resources.english_tokenizer = self.resources.english_tokenizer.as_ref().map(resolve);
        self.resources.lemma_dictionary = self.resources.lemma_dictionary.as_ref().map(resolve);
        self.resources.pos_model_dir = resolve(&self.resources.pos_model_dir);
        self.resources.ner_model_dir = resolve(&self.resources.ner_model_dir);
        self
    }
}

pub fn load_config_from_file(file_path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(file_path).map_err(|source| ConfigError::Read {
        path: file_path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str::<Config>(&contents).map_err(|source| ConfigError::Parse {
        path: file_path.to_path_buf(),
        source,
    })?;
    let base_dir = file_path.parent().unwrap_or_else(|| Path::new(""));
    tracing::info!("Loaded config from {:?}", file_path);
    Ok(config.resolve_relative_to(base_dir))
}
