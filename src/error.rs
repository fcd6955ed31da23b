use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}. Please ensure it exists.")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failures while loading language resources at startup.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("{what} not found at {path:?}")]
    Missing { what: &'static str, path: PathBuf },
    #[error("Failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid model config {path:?}")]
    ModelConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid label map in {path:?}: {message}")]
    Labels { path: PathBuf, message: String },
    #[error("Failed to load tokenizer {path:?}: {message}")]
    Tokenizer { path: PathBuf, message: String },
    #[error("Failed to load English language data ({source_name}): {message}")]
    LanguageData { source_name: String, message: String },
    #[error("Failed to load model weights")]
    Model(#[from] candle_core::Error),
}

/// Failures during a single analysis request.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Tokenization failed: {0}")]
    Tokenizer(String),
    #[error("Model inference failed: {0}")]
    Model(#[from] candle_core::Error),
    #[error("Linguistic pipeline failed: {0}")]
    Pipeline(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown POS filter '{0}' (expected one of All, NOUN, VERB, ADJ, ADV)")]
pub struct UnknownPosFilter(pub String);
