use std::path::Path;

use super::english::EnglishTokenizer;
use super::token_classifier::{TokenClassifier, WordClassifier, WordLabel};
use crate::error::{AnalysisError, ResourceError};
use crate::types::analysis_data::{Annotation, NamedEntity, TokenTag};

/// Pretrained linguistic pipeline: per-token coarse POS tags plus named entities.
pub trait LinguisticPipeline {
    fn annotate(&self, text: &str) -> Result<Annotation, AnalysisError>;

    fn name(&self) -> &str;
}

/// POS tagging and NER backed by two word classifiers, run one sentence at a time.
pub struct TransformerPipeline<C = TokenClassifier> {
    sentences: EnglishTokenizer,
    pos_model: C,
    ner_model: C,
}

impl<C: WordClassifier> TransformerPipeline<C> {
    pub fn new(sentences: EnglishTokenizer, pos_model: C, ner_model: C) -> Self {
        Self { sentences, pos_model, ner_model }
    }
}

impl TransformerPipeline {
    pub fn load(sentences: EnglishTokenizer, pos_model_dir: &Path, ner_model_dir: &Path) -> Result<Self, ResourceError> {
        tracing::info!("Loading POS model from {:?}", pos_model_dir);
        let pos_model = TokenClassifier::load(pos_model_dir)?;
        tracing::info!("Loading NER model from {:?}", ner_model_dir);
        let ner_model = TokenClassifier::load(ner_model_dir)?;
        for model in [&pos_model, &ner_model] {
            tracing::debug!("{} labels: {:?}", model.name(), model.labels());
        }
        Ok(Self::new(sentences, pos_model, ner_model))
    }
}

impl<C: WordClassifier> LinguisticPipeline for TransformerPipeline<C> {
    fn annotate(&self, text: &str) -> Result<Annotation, AnalysisError> {
        let mut annotation = Annotation::default();
        // Entity spans never cross a sentence boundary.
        for (offset, sentence) in self.sentences.sentence_spans(text) {
            let pos_words = shift(self.pos_model.classify_words(sentence)?, offset);
            annotation.token_tags.extend(pos_words.iter().map(|w| TokenTag::new(span_text(text, w.start, w.end), w.label.clone())));

            let ner_words = shift(self.ner_model.classify_words(sentence)?, offset);
            annotation.entities.extend(merge_entity_spans(text, &ner_words));
        }
        tracing::debug!(
            "{} annotated {} tokens, {} entities",
            self.name(),
            annotation.token_tags.len(),
            annotation.entities.len()
        );
        Ok(annotation)
    }

    fn name(&self) -> &str {
        "transformer pipeline"
    }
}

fn shift(mut words: Vec<WordLabel>, offset: usize) -> Vec<WordLabel> {
    for word in &mut words {
        word.start += offset;
        word.end += offset;
    }
    words
}

fn span_text(text: &str, start: usize, end: usize) -> &str {
    text.get(start..end).unwrap_or_default()
}

/// Splits a BIO, BIOES or BILOU label into (is_begin, entity type). `O` and
/// empty labels yield `None`; a label without a prefix starts a span.
fn parse_bio(label: &str) -> Option<(bool, &str)> {
    match label.split_once('-') {
        Some(("B" | "S" | "U", kind)) => Some((true, kind)),
        Some(("I" | "E" | "L", kind)) => Some((false, kind)),
        _ if label == "O" || label.is_empty() => None,
        _ => Some((true, label)),
    }
}

/// Merges consecutive tagged words into entity spans. An `I-` word
/// (or `E-`) continues the open span only when its type matches; otherwise it opens a
/// new one. Span text is the original slice of `text`, whitespace included.
pub(crate) fn merge_entity_spans(text: &str, words: &[WordLabel]) -> Vec<NamedEntity> {
    let mut entities = Vec::new();
    let mut open: Option<(usize, usize, &str)> = None;

    for word in words {
        match parse_bio(&word.label) {
            Some((false, kind)) if open.is_some_and(|(_, _, open_kind)| open_kind == kind) => {
                if let Some(span) = open.as_mut() {
                    span.1 = word.end;
                }
            }
            Some((_, kind)) => {
                if let Some((start, end, open_kind)) = open.take() {
                    entities.push(NamedEntity::new(span_text(text, start, end), open_kind));
                }
                open = Some((word.start, word.end, kind));
            }
            None => {
                if let Some((start, end, open_kind)) = open.take() {
                    entities.push(NamedEntity::new(span_text(text, start, end), open_kind));
                }
            }
        }
    }
    if let Some((start, end, kind)) = open {
        entities.push(NamedEntity::new(span_text(text, start, end), kind));
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use unicode_segmentation::UnicodeSegmentation;

    fn word(text: &str, needle: &str, label: &str) -> WordLabel {
        let start = text.find(needle).unwrap();
        WordLabel { start, end: start + needle.len(), label: label.to_string() }
    }

    #[test]
    fn bio_spans_merge_across_punctuation_words() {
        let text = "Apple is looking at buying U.K. startup";
        let words = vec![
            word(text, "Apple", "B-ORG"),
            word(text, "is", "O"),
            word(text, "U", "B-LOC"),
            WordLabel { start: 28, end: 29, label: "I-LOC".to_string() },
            WordLabel { start: 29, end: 30, label: "I-LOC".to_string() },
            WordLabel { start: 30, end: 31, label: "I-LOC".to_string() },
            word(text, "startup", "O"),
        ];
        assert_eq!(
            merge_entity_spans(text, &words),
            vec![NamedEntity::new("Apple", "ORG"), NamedEntity::new("U.K.", "LOC")]
        );
    }

    #[test]
    fn multi_word_entities_keep_inner_whitespace() {
        let text = "Tim Cook visited New York";
        let words = vec![
            word(text, "Tim", "B-PER"),
            word(text, "Cook", "I-PER"),
            word(text, "visited", "O"),
            word(text, "New", "B-LOC"),
            word(text, "York", "I-LOC"),
        ];
        assert_eq!(
            merge_entity_spans(text, &words),
            vec![NamedEntity::new("Tim Cook", "PER"), NamedEntity::new("New York", "LOC")]
        );
    }

    #[test]
    fn type_change_or_begin_tag_starts_a_new_span() {
        let text = "Paris Hilton Berlin";
        let words = vec![
            word(text, "Paris", "I-LOC"),
            word(text, "Hilton", "I-PER"),
            word(text, "Berlin", "B-PER"),
        ];
        let entities = merge_entity_spans(text, &words);
        assert_eq!(entities.len(), 3);
        assert_eq!(entities[0], NamedEntity::new("Paris", "LOC"));
    }

    #[test]
    fn outside_labels_produce_no_entities() {
        let text = "nothing here";
        let words = vec![word(text, "nothing", "O"), word(text, "here", "O")];
        assert!(merge_entity_spans(text, &words).is_empty());
    }

    #[test]
    fn bare_labels_are_treated_as_span_starts() {
        assert_eq!(parse_bio("ORG"), Some((true, "ORG")));
        assert_eq!(parse_bio("I-MISC"), Some((false, "MISC")));
        assert_eq!(parse_bio("O"), None);
    }

    #[test]
    fn bioes_prefixes_are_understood() {
        assert_eq!(parse_bio("S-ORG"), Some((true, "ORG")));
        assert_eq!(parse_bio("E-PER"), Some((false, "PER")));
        assert_eq!(parse_bio("U-LOC"), Some((true, "LOC")));
        assert_eq!(parse_bio("L-LOC"), Some((false, "LOC")));

        let text = "Acme met Jane Doe";
        let words = vec![
            word(text, "Acme", "S-ORG"),
            word(text, "met", "O"),
            word(text, "Jane", "B-PER"),
            word(text, "Doe", "E-PER"),
        ];
        assert_eq!(
            merge_entity_spans(text, &words),
            vec![NamedEntity::new("Acme", "ORG"), NamedEntity::new("Jane Doe", "PER")]
        );
    }

    /// Labels words of each sentence from a fixed table; unknown words get `fallback`.
    struct TableClassifier {
        labels: HashMap<&'static str, &'static str>,
        fallback: &'static str,
    }

    impl WordClassifier for TableClassifier {
        fn classify_words(&self, text: &str) -> Result<Vec<WordLabel>, AnalysisError> {
            Ok(text
                .split_word_bound_indices()
                .filter(|(_, w)| !w.trim().is_empty())
                .map(|(start, w)| WordLabel {
                    start,
                    end: start + w.len(),
                    label: self.labels.get(w).copied().unwrap_or(self.fallback).to_string(),
                })
                .collect())
        }

        fn name(&self) -> &str {
            "table"
        }
    }

    fn fixture_pipeline() -> TransformerPipeline<TableClassifier> {
        let pos = TableClassifier {
            labels: HashMap::from([
                ("Apple", "PROPN"),
                ("is", "AUX"),
                ("big", "ADJ"),
                ("Tim", "PROPN"),
                ("Cook", "PROPN"),
                ("lives", "VERB"),
                ("in", "ADP"),
                ("New", "PROPN"),
                ("York", "PROPN"),
                (".", "PUNCT"),
            ]),
            fallback: "X",
        };
        let ner = TableClassifier {
            labels: HashMap::from([
                ("Apple", "B-ORG"),
                ("Tim", "B-PER"),
                ("Cook", "I-PER"),
                ("New", "B-LOC"),
                ("York", "I-LOC"),
            ]),
            fallback: "O",
        };
        TransformerPipeline::new(EnglishTokenizer::bundled().unwrap(), pos, ner)
    }

    #[test]
    fn later_sentences_map_back_into_the_full_text() {
        let text = "Apple is big.  Tim Cook lives in New York.";
        let annotation = fixture_pipeline().annotate(text).unwrap();

        let tokens: Vec<(&str, &str)> =
            annotation.token_tags.iter().map(|t| (t.token.as_str(), t.tag.as_str())).collect();
        assert_eq!(
            tokens,
            vec![
                ("Apple", "PROPN"),
                ("is", "AUX"),
                ("big", "ADJ"),
                (".", "PUNCT"),
                ("Tim", "PROPN"),
                ("Cook", "PROPN"),
                ("lives", "VERB"),
                ("in", "ADP"),
                ("New", "PROPN"),
                ("York", "PROPN"),
                (".", "PUNCT"),
            ]
        );
        assert_eq!(
            annotation.entities,
            vec![
                NamedEntity::new("Apple", "ORG"),
                NamedEntity::new("Tim Cook", "PER"),
                NamedEntity::new("New York", "LOC"),
            ]
        );
    }

    #[test]
    fn entities_do_not_span_sentence_boundaries() {
        let text = "I met Tim. Cook arrived later.";
        let annotation = fixture_pipeline().annotate(text).unwrap();
        assert_eq!(annotation.entities, vec![NamedEntity::new("Tim", "PER"), NamedEntity::new("Cook", "PER")]);
    }

    #[test]
    fn shift_moves_offsets() {
        let words = shift(vec![WordLabel { start: 0, end: 3, label: "O".into() }], 10);
        assert_eq!((words[0].start, words[0].end), (10, 13));
    }
}
