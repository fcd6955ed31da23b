pub mod english;
pub mod lemmatizer;
pub mod pipeline;
pub mod segmenter;
pub mod sentiment;
pub mod stopwords;
pub mod token_classifier;

pub use english::EnglishTokenizer;
pub use lemmatizer::{DictionaryLemmatizer, Lemmatizer};
pub use pipeline::{LinguisticPipeline, TransformerPipeline};
pub use sentiment::SentimentScorer;
pub use stopwords::StopwordSet;
pub use token_classifier::{TokenClassifier, WordClassifier, WordLabel};

use crate::config::ResourceConfig;
use crate::error::{AnalysisError, ResourceError};
use crate::types::analysis_data::{AnalysisReport, Annotation, Segmentation, SentimentScores};

/// Facade over the segmentation, tagging and sentiment libraries.
///
/// All resources are loaded once up front and only read afterwards.
pub struct TextAnalyzer {
    stopwords: StopwordSet,
    english: EnglishTokenizer,
    lemmatizer: Lemmatizer,
    pipeline: Box<dyn LinguisticPipeline>,
    sentiment: SentimentScorer,
}

impl TextAnalyzer {
    pub fn new(
        stopwords: StopwordSet,
        english: EnglishTokenizer,
        lemmatizer: Lemmatizer,
        pipeline: Box<dyn LinguisticPipeline>,
        sentiment: SentimentScorer,
    ) -> Self {
        Self { stopwords, english, lemmatizer, pipeline, sentiment }
    }

    /// Loads every resource named in `config`. Any missing piece is an error.
    pub fn from_config(config: &ResourceConfig) -> Result<Self, ResourceError> {
        let stopwords = match &config.stopwords {
            Some(path) => StopwordSet::from_file(path)?,
            None => StopwordSet::english(),
        };
        tracing::info!("Loaded {} stopwords", stopwords.len());

        let (english, lemmatizer) = load_language_data(config)?;
        let pipeline = TransformerPipeline::load(english.clone(), &config.pos_model_dir, &config.ner_model_dir)?;
        let sentiment = SentimentScorer::new();

        Ok(Self::new(stopwords, english, lemmatizer, Box::new(pipeline), sentiment))
    }

    pub fn segment_and_lemmatize(&self, text: &str) -> Segmentation {
        let sentences = self.english.split_sentences(text);
        let filtered_words: Vec<String> = segmenter::split_words(text)
            .into_iter()
            .filter(|word| !self.stopwords.contains(word))
            .collect();
        let lemmatized_words = filtered_words.iter().map(|word| self.lemmatizer.lemmatize(word)).collect();
        Segmentation { sentences, filtered_words, lemmatized_words }
    }

    pub fn tag_and_extract_entities(&self, text: &str) -> Result<Annotation, AnalysisError> {
        if text.trim().is_empty() {
            return Ok(Annotation::default());
        }
        self.pipeline.annotate(text)
    }

    pub fn score_sentiment(&self, text: &str) -> SentimentScores {
        self.sentiment.score(text)
    }

    /// Runs all three analyses on the same input.
    pub fn analyze(&self, text: &str) -> Result<AnalysisReport, AnalysisError> {
        let segmentation = self.segment_and_lemmatize(text);
        let annotation = self.tag_and_extract_entities(text)?;
        let sentiment = self.score_sentiment(text);
        Ok(AnalysisReport::from_parts(segmentation, annotation, sentiment))
    }

    pub fn pipeline_name(&self) -> &str {
        self.pipeline.name()
    }
}

/// The English tokenizer and lemmatizer named in `config`; no models are touched.
pub fn load_language_data(config: &ResourceConfig) -> Result<(EnglishTokenizer, Lemmatizer), ResourceError> {
    let english = match &config.english_tokenizer {
        Some(path) => EnglishTokenizer::from_file(path)?,
        None => EnglishTokenizer::bundled()?,
    };
    let mut lemmatizer = Lemmatizer::new(english.clone());
    if let Some(path) = &config.lemma_dictionary {
        let overrides = DictionaryLemmatizer::from_file(path)?;
        tracing::info!(
            "Loaded lemma dictionary: {} forms, {} lemmas",
            overrides.form_count(),
            overrides.lemma_count()
        );
        lemmatizer = lemmatizer.with_overrides(overrides);
    }
    Ok((english, lemmatizer))
}
