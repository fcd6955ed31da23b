//! English sentence boundaries and dictionary lemmas from LanguageTool data,
//! via nlprule. The tokenizer binary is embedded at build time.

use nlprule::Tokenizer;
use std::path::Path;
use std::sync::Arc;

use crate::error::ResourceError;

/// Shared handle to an nlprule English tokenizer. Cloning is cheap.
#[derive(Clone)]
pub struct EnglishTokenizer {
    inner: Arc<Tokenizer>,
}

impl EnglishTokenizer {
    /// The tokenizer compiled into the binary.
    pub fn bundled() -> Result<Self, ResourceError> {
        let mut bytes: &'static [u8] =
            include_bytes!(concat!(env!("OUT_DIR"), "/", nlprule::tokenizer_filename!("en")));
        let tokenizer = Tokenizer::from_reader(&mut bytes)
            .map_err(|e| ResourceError::LanguageData { source_name: "bundled en".to_string(), message: e.to_string() })?;
        Ok(Self { inner: Arc::new(tokenizer) })
    }

    /// A tokenizer binary from the nlprule releases, e.g. `en_tokenizer.bin`.
    pub fn from_file(path: &Path) -> Result<Self, ResourceError> {
        if !path.is_file() {
            return Err(ResourceError::Missing { what: "English tokenizer", path: path.to_path_buf() });
        }
        let tokenizer = Tokenizer::new(path)
            .map_err(|e| ResourceError::LanguageData { source_name: path.display().to_string(), message: e.to_string() })?;
        Ok(Self { inner: Arc::new(tokenizer) })
    }

    /// Byte offset and trimmed text of each sentence. Abbreviations such as
    /// `Mr.` or `U.K.` do not end a sentence.
    pub fn sentence_spans<'a>(&self, text: &'a str) -> Vec<(usize, &'a str)> {
        let mut spans = Vec::new();
        if text.trim().is_empty() {
            return spans;
        }
        let mut cursor = 0;
        for sentence in self.inner.pipe(text) {
            let trimmed = sentence.text().trim();
            if trimmed.is_empty() {
                continue;
            }
            match text[cursor..].find(trimmed) {
                Some(at) => {
                    let start = cursor + at;
                    cursor = start + trimmed.len();
                    spans.push((start, &text[start..cursor]));
                }
                None => tracing::debug!("Sentence '{}' not found after byte {}", trimmed, cursor),
            }
        }
        spans
    }

    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        self.sentence_spans(text).into_iter().map(|(_, s)| s.to_string()).collect()
    }

    /// Dictionary lemma of a single word. A noun reading is preferred when the
    /// word has several; words the dictionary does not know yield `None`.
    pub fn lemma_of(&self, word: &str) -> Option<String> {
        if word.trim().is_empty() {
            return None;
        }
        let sentence = self.inner.pipe(word).next()?;
        let token = sentence.tokens().iter().find(|t| t.word().text().as_str() == word)?;
        let readings: Vec<(&str, &str)> = token
            .word()
            .tags()
            .iter()
            .map(|data| (data.lemma().as_str(), data.pos().as_str()))
            .filter(|(lemma, _)| !lemma.is_empty())
            .collect();
        let lemma = readings
            .iter()
            .find(|(_, pos)| pos.starts_with("NN"))
            .or_else(|| readings.first())
            .map(|(lemma, _)| lemma.to_string());
        lemma
    }
}
