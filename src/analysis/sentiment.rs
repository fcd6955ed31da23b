use vader_sentiment::SentimentIntensityAnalyzer;

use crate::types::analysis_data::SentimentScores;

/// VADER polarity scoring. Building the scorer loads the lexicon.
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self { analyzer: SentimentIntensityAnalyzer::new() }
    }

    pub fn score(&self, text: &str) -> SentimentScores {
        if text.trim().is_empty() {
            return SentimentScores::default();
        }
        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().filter(|v| v.is_finite()).unwrap_or(0.0);
        SentimentScores {
            negative: round_to(get("neg"), 3),
            neutral: round_to(get("neu"), 3),
            positive: round_to(get("pos"), 3),
            compound: round_to(get("compound"), 4).clamp(-1.0, 1.0),
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_scores_zero() {
        let scores = SentimentScorer::new().score("");
        assert_eq!(scores, SentimentScores::default());
        assert_eq!(SentimentScorer::new().score("   \n").compound, 0.0);
    }

    #[test]
    fn positive_text_has_positive_compound() {
        let scores = SentimentScorer::new().score("I love this!");
        assert!(scores.compound > 0.5, "compound was {}", scores.compound);
        assert!(scores.positive > scores.negative);
    }

    #[test]
    fn negative_text_has_negative_compound() {
        let scores = SentimentScorer::new().score("This is a terrible, awful day.");
        assert!(scores.compound < -0.3, "compound was {}", scores.compound);
    }

    #[test]
    fn proportions_sum_to_one_for_non_empty_text() {
        for text in ["I love this!", "The sky is blue.", "I hate waiting but the food was great."] {
            let s = SentimentScorer::new().score(text);
            let total = s.negative + s.neutral + s.positive;
            assert!((total - 1.0).abs() < 0.01, "{} summed to {}", text, total);
            assert!((-1.0..=1.0).contains(&s.compound));
        }
    }

    #[test]
    fn one_scorer_serves_repeated_requests() {
        let scorer = SentimentScorer::new();
        let first = scorer.score("The food was great.");
        assert_eq!(scorer.score("The food was great."), first);
        assert_eq!(scorer.score(""), SentimentScores::default());
    }

    #[test]
    fn rounding_keeps_requested_places() {
        assert_eq!(round_to(0.123456, 3), 0.123);
        assert_eq!(round_to(-0.98765, 4), -0.9877);
    }
}
