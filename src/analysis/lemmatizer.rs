use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::english::EnglishTokenizer;
use crate::error::ResourceError;

/// Word-by-word lemmatizer: user dictionary entries first, then the English
/// dictionary, otherwise the word unchanged.
#[derive(Clone)]
pub struct Lemmatizer {
    overrides: DictionaryLemmatizer,
    english: EnglishTokenizer,
}

impl Lemmatizer {
    pub fn new(english: EnglishTokenizer) -> Self {
        Self { overrides: DictionaryLemmatizer::new(), english }
    }

    pub fn with_overrides(mut self, overrides: DictionaryLemmatizer) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.overrides.lookup(word) {
            return lemma.to_string();
        }
        self.english.lemma_of(word).unwrap_or_else(|| word.to_string())
    }

    pub fn override_count(&self) -> usize {
        self.overrides.form_count()
    }
}

/// User lemma table read from `lemma<TAB>form` lines.
///
/// Lemma strings are interned once; every inflected form points at a lemma id.
#[derive(Debug, Default, Clone)]
pub struct DictionaryLemmatizer {
    form_to_id: HashMap<String, u32>,
    id_to_lemma: Vec<String>, // Index is the u32 ID
    lemma_to_id: HashMap<String, u32>,
}

impl DictionaryLemmatizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self, ResourceError> {
        if !path.is_file() {
            return Err(ResourceError::Missing { what: "Lemma dictionary", path: path.to_path_buf() });
        }
        let contents = fs::read_to_string(path).map_err(|source| ResourceError::Io { path: path.to_path_buf(), source })?;
        let lemmatizer = Self::parse(&contents);
        if lemmatizer.form_count() == 0 {
            tracing::warn!("Lemma dictionary {:?} has no entries; words will pass through unchanged", path);
        }
        Ok(lemmatizer)
    }

    /// One `lemma<TAB>form` pair per line. Lines without a tab, blank lines and
    /// `#` comments are skipped. The first lemma listed for a form wins.
    pub fn parse(contents: &str) -> Self {
        let mut lemmatizer = Self::new();
        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('\t') {
                Some((lemma, form)) if !lemma.trim().is_empty() && !form.trim().is_empty() => {
                    lemmatizer.insert(lemma.trim(), form.trim());
                }
                _ => tracing::debug!("Skipping malformed lemma dictionary line {}: '{}'", line_no + 1, line),
            }
        }
        lemmatizer
    }

    pub fn insert(&mut self, lemma: &str, form: &str) {
        let id = self.lemma_id_or_insert(lemma);
        self.form_to_id.entry(form.to_string()).or_insert(id);
    }

    fn lemma_id_or_insert(&mut self, lemma: &str) -> u32 {
        if let Some(id) = self.lemma_to_id.get(lemma) {
            return *id;
        }
        let id = self.id_to_lemma.len() as u32;
        self.id_to_lemma.push(lemma.to_string());
        self.lemma_to_id.insert(lemma.to_string(), id);
        id
    }

    /// Exact-form lookup, case sensitive.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.form_to_id
            .get(word)
            .and_then(|id| self.id_to_lemma.get(*id as usize))
            .map(String::as_str)
    }

    pub fn form_count(&self) -> usize {
        self.form_to_id.len()
    }

    pub fn lemma_count(&self) -> usize {
        self.id_to_lemma.len()
    }
}
