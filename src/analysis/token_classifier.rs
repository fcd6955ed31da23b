//! Pretrained BERT token-classification models (POS tagging, NER) run on candle.
//!
//! A model directory holds `config.json` (including `id2label`), `tokenizer.json`
//! and `model.safetensors`, as exported for Hugging Face token classification.

use candle_core::{DType, Device, Tensor, D};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

use crate::error::{AnalysisError, ResourceError};

/// One whole word of the input with the label predicted for its first sub-token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordLabel {
    /// Byte offsets into the classified text.
    pub start: usize,
    pub end: usize,
    pub label: String,
}

/// Anything that labels the words of a piece of text.
pub trait WordClassifier {
    /// Labels every word of `text`. Offsets in the result are relative to `text`.
    fn classify_words(&self, text: &str) -> Result<Vec<WordLabel>, AnalysisError>;

    fn name(&self) -> &str;
}

#[derive(Deserialize)]
struct HeadConfig {
    hidden_size: usize,
    id2label: HashMap<String, String>,
    #[serde(default = "default_max_positions")]
    max_position_embeddings: usize,
}

fn default_max_positions() -> usize {
    512
}

pub struct TokenClassifier {
    name: String,
    model: BertModel,
    classifier: Linear,
    tokenizer: Tokenizer,
    id2label: Vec<String>,
    cls_id: u32,
    sep_id: u32,
    /// Sub-tokens per model call, excluding `[CLS]` and `[SEP]`.
    max_tokens: usize,
    device: Device,
}

impl TokenClassifier {
    pub fn load(model_dir: &Path) -> Result<Self, ResourceError> {
        let config_path = require_file(model_dir, "config.json", "Model config")?;
        let tokenizer_path = require_file(model_dir, "tokenizer.json", "Tokenizer")?;
        let weights_path = require_file(model_dir, "model.safetensors", "Model weights")?;

        let raw_config = fs::read_to_string(&config_path).map_err(|source| ResourceError::Io { path: config_path.clone(), source })?;
        let bert_config: BertConfig = serde_json::from_str(&raw_config)
            .map_err(|source| ResourceError::ModelConfig { path: config_path.clone(), source })?;
        let head_config: HeadConfig = serde_json::from_str(&raw_config)
            .map_err(|source| ResourceError::ModelConfig { path: config_path.clone(), source })?;
        let id2label = ordered_labels(head_config.id2label)
            .map_err(|message| ResourceError::Labels { path: config_path.clone(), message })?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ResourceError::Tokenizer { path: tokenizer_path.clone(), message: e.to_string() })?;
        // Long inputs are split into windows here; the tokenizer must see the whole text.
        tokenizer
            .with_truncation(None)
            .map_err(|e| ResourceError::Tokenizer { path: tokenizer_path.clone(), message: e.to_string() })?;
        tokenizer.with_padding(None);
        let special_id = |token: &str| {
            tokenizer.token_to_id(token).ok_or_else(|| ResourceError::Tokenizer {
                path: tokenizer_path.clone(),
                message: format!("vocabulary has no {} token", token),
            })
        };
        let cls_id = special_id("[CLS]")?;
        let sep_id = special_id("[SEP]")?;
        let max_tokens = head_config.max_position_embeddings.saturating_sub(2).max(1);

        let device = Device::Cpu;
        // SAFETY: the weights file is memory-mapped read-only and not modified while loaded.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)? };
        let model = BertModel::load(vb.clone(), &bert_config)?;
        let classifier = candle_nn::linear(head_config.hidden_size, id2label.len(), vb.pp("classifier"))?;

        let name = model_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| model_dir.display().to_string());
        tracing::info!("Loaded token classifier '{}' with {} labels", name, id2label.len());

        Ok(Self { name, model, classifier, tokenizer, id2label, cls_id, sep_id, max_tokens, device })
    }

    pub fn labels(&self) -> &[String] {
        &self.id2label
    }

    /// Runs `[CLS] window [SEP]` through the model and returns the class of
    /// each window sub-token.
    fn predict(&self, window_ids: &[u32]) -> Result<Vec<u32>, AnalysisError> {
        let mut ids = Vec::with_capacity(window_ids.len() + 2);
        ids.push(self.cls_id);
        ids.extend_from_slice(window_ids);
        ids.push(self.sep_id);

        let input_ids = Tensor::new(ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let type_ids = input_ids.zeros_like()?;
        let attention_mask = input_ids.ones_like()?;

        let hidden = self.model.forward(&input_ids, &type_ids, Some(&attention_mask))?;
        let logits = self.classifier.forward(&hidden)?.squeeze(0)?;
        let mut predictions = logits.argmax(D::Minus1)?.to_vec1::<u32>()?;
        predictions.pop();
        predictions.remove(0);
        Ok(predictions)
    }
}

impl WordClassifier for TokenClassifier {
    fn classify_words(&self, text: &str) -> Result<Vec<WordLabel>, AnalysisError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| AnalysisError::Tokenizer(e.to_string()))?;
        let ids = encoding.get_ids();
        let word_ids = encoding.get_word_ids();
        let offsets = encoding.get_offsets();

        let windows = plan_windows(word_ids, self.max_tokens);
        if windows.len() > 1 {
            tracing::debug!("{}: {} sub-tokens split into {} windows", self.name, ids.len(), windows.len());
        }
        let mut words = Vec::new();
        for window in windows {
            let predictions = self.predict(&ids[window.clone()])?;
            words.extend(group_words(&word_ids[window.clone()], &offsets[window], &predictions, &self.id2label));
        }
        Ok(words)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn require_file(dir: &Path, file_name: &str, what: &'static str) -> Result<PathBuf, ResourceError> {
    let path = dir.join(file_name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ResourceError::Missing { what, path })
    }
}

/// Turns the `{"0": "O", "1": "B-PER", ...}` map into a dense vector indexed by class id.
fn ordered_labels(id2label: HashMap<String, String>) -> Result<Vec<String>, String> {
    let mut labels = vec![None; id2label.len()];
    for (id, label) in id2label {
        let index: usize = id.parse().map_err(|_| format!("label id '{}' is not a number", id))?;
        let slot = labels
            .get_mut(index)
            .ok_or_else(|| format!("label id {} is out of range", index))?;
        *slot = Some(label);
    }
    if labels.is_empty() {
        return Err("no labels defined".to_string());
    }
    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| label.ok_or_else(|| format!("label id {} is missing", i)))
        .collect()
}

/// Splits `0..word_ids.len()` into ranges of at most `max_tokens`. A cut only
/// falls inside a word when that word alone is longer than the limit.
pub(crate) fn plan_windows(word_ids: &[Option<u32>], max_tokens: usize) -> Vec<Range<usize>> {
    let max_tokens = max_tokens.max(1);
    let mut windows = Vec::new();
    let mut start = 0;
    while start < word_ids.len() {
        let hard_end = (start + max_tokens).min(word_ids.len());
        let mut end = hard_end;
        if hard_end < word_ids.len() {
            while end > start && word_ids[end].is_some() && word_ids[end] == word_ids[end - 1] {
                end -= 1;
            }
            if end == start {
                end = hard_end;
            }
        }
        windows.push(start..end);
        start = end;
    }
    windows
}

/// Collapses sub-token predictions into whole words. Special tokens carry no
/// word id and are skipped; the first sub-token decides the word's label.
pub(crate) fn group_words(
    word_ids: &[Option<u32>],
    offsets: &[(usize, usize)],
    predictions: &[u32],
    id2label: &[String],
) -> Vec<WordLabel> {
    let mut words: Vec<WordLabel> = Vec::new();
    let mut current_word: Option<u32> = None;

    for ((word_id, &(start, end)), &class) in word_ids.iter().zip(offsets).zip(predictions) {
        let Some(word_id) = *word_id else {
            current_word = None;
            continue;
        };
        if current_word == Some(word_id) {
            if let Some(last) = words.last_mut() {
                last.end = last.end.max(end);
            }
            continue;
        }
        current_word = Some(word_id);
        let label = id2label.get(class as usize).cloned().unwrap_or_else(|| "O".to_string());
        words.push(WordLabel { start, end, label });
    }
    words
}
