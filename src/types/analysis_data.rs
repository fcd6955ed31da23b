use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownPosFilter;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenTag {
    pub token: String,
    pub tag: String,
}

impl TokenTag {
    pub fn new(token: impl Into<String>, tag: impl Into<String>) -> Self {
        Self { token: token.into(), tag: tag.into() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NamedEntity {
    pub text: String,
    pub label: String,
}

impl NamedEntity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self { text: text.into(), label: label.into() }
    }
}

/// Polarity scores: `compound` in [-1, 1], the other three in [0, 1].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct SentimentScores {
    #[serde(rename = "neg")]
    pub negative: f64,
    #[serde(rename = "neu")]
    pub neutral: f64,
    #[serde(rename = "pos")]
    pub positive: f64,
    pub compound: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Segmentation {
    pub sentences: Vec<String>,
    pub filtered_words: Vec<String>,
    pub lemmatized_words: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Annotation {
    pub token_tags: Vec<TokenTag>,
    pub entities: Vec<NamedEntity>,
}

/// Everything produced for one input snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AnalysisReport {
    pub sentences: Vec<String>,
    pub filtered_words: Vec<String>,
    pub lemmatized_words: Vec<String>,
    pub token_tags: Vec<TokenTag>,
    pub entities: Vec<NamedEntity>,
    pub sentiment: SentimentScores,
}

impl AnalysisReport {
    pub fn from_parts(segmentation: Segmentation, annotation: Annotation, sentiment: SentimentScores) -> Self {
        Self {
            sentences: segmentation.sentences,
            filtered_words: segmentation.filtered_words,
            lemmatized_words: segmentation.lemmatized_words,
            token_tags: annotation.token_tags,
            entities: annotation.entities,
            sentiment,
        }
    }
}

/// Coarse part-of-speech filter offered by the UI.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum PosFilter {
    #[default]
    All,
    Noun,
    Verb,
    Adj,
    Adv,
}

impl PosFilter {
    pub const ALL: [PosFilter; 5] = [PosFilter::All, PosFilter::Noun, PosFilter::Verb, PosFilter::Adj, PosFilter::Adv];

    /// The UPOS tag this filter keeps; `None` keeps everything.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            PosFilter::All => None,
            PosFilter::Noun => Some("NOUN"),
            PosFilter::Verb => Some("VERB"),
            PosFilter::Adj => Some("ADJ"),
            PosFilter::Adv => Some("ADV"),
        }
    }

    pub fn label(self) -> &'static str {
        self.tag().unwrap_or("All")
    }

    pub fn matches(self, tag: &str) -> bool {
        self.tag().map_or(true, |wanted| wanted == tag)
    }
}

impl fmt::Display for PosFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PosFilter {
    type Err = UnknownPosFilter;

    /// Accepts exactly the labels shown in the UI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PosFilter::ALL
            .into_iter()
            .find(|filter| filter.label() == s)
            .ok_or_else(|| UnknownPosFilter(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_labels_round_trip_through_from_str() {
        for filter in PosFilter::ALL {
            assert_eq!(filter.label().parse::<PosFilter>(), Ok(filter));
        }
    }

    #[test]
    fn unknown_filter_is_rejected_at_construction() {
        assert_eq!("noun".parse::<PosFilter>(), Err(UnknownPosFilter("noun".to_string())));
        assert!("PROPN".parse::<PosFilter>().is_err());
    }

    #[test]
    fn all_matches_every_tag() {
        assert!(PosFilter::All.matches("PUNCT"));
        assert!(PosFilter::Verb.matches("VERB"));
        assert!(!PosFilter::Verb.matches("AUX"));
        assert!(!PosFilter::Noun.matches("noun"));
    }

    #[test]
    fn sentiment_serializes_with_short_keys() {
        let json = serde_json::to_value(SentimentScores { negative: 0.1, neutral: 0.7, positive: 0.2, compound: 0.3 }).unwrap();
        assert_eq!(json["neg"], 0.1);
        assert_eq!(json["compound"], 0.3);
    }
}
