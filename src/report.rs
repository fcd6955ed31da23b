use crate::types::analysis_data::{AnalysisReport, NamedEntity, PosFilter, SentimentScores, TokenTag};

/// Keeps the pairs whose tag equals the filter's tag, in order. `All` keeps everything.
pub fn filter_token_tags(token_tags: &[TokenTag], pos_filter: PosFilter) -> Vec<TokenTag> {
    token_tags.iter().filter(|pair| pos_filter.matches(&pair.tag)).cloned().collect()
}

/// Renders the six result sections in fixed order, separated by blank lines.
pub fn format_results(
    sentences: &[String],
    filtered_words: &[String],
    lemmatized_words: &[String],
    token_tags: &[TokenTag],
    entities: &[NamedEntity],
    sentiment: &SentimentScores,
    pos_filter: PosFilter,
) -> String {
    let token_tags = filter_token_tags(token_tags, pos_filter);

    let mut results = format!("Sentences:\n{}\n\n", render_strings(sentences));
    results += &format!("Filtered Words:\n{}\n\n", render_strings(filtered_words));
    results += &format!("Lemmatized Words:\n{}\n\n", render_strings(lemmatized_words));
    results += &format!(
        "Tokens and POS Tags:\n{}\n\n",
        render_pairs(token_tags.iter().map(|t| (t.token.as_str(), t.tag.as_str())))
    );
    results += &format!(
        "Named Entities:\n{}\n\n",
        render_pairs(entities.iter().map(|e| (e.text.as_str(), e.label.as_str())))
    );
    results += &format!("Sentiment Analysis:\n{}\n", render_sentiment(sentiment));
    results
}

impl AnalysisReport {
    pub fn render(&self, pos_filter: PosFilter) -> String {
        format_results(
            &self.sentences,
            &self.filtered_words,
            &self.lemmatized_words,
            &self.token_tags,
            &self.entities,
            &self.sentiment,
            pos_filter,
        )
    }

    /// Copy of the report with the token/tag pairs reduced by `pos_filter`.
    pub fn filtered(&self, pos_filter: PosFilter) -> AnalysisReport {
        AnalysisReport { token_tags: filter_token_tags(&self.token_tags, pos_filter), ..self.clone() }
    }
}

fn render_strings(items: &[String]) -> String {
    render_list(items.iter().map(|s| quote(s)))
}

fn render_pairs<'a>(items: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    render_list(items.map(|(a, b)| format!("({}, {})", quote(a), quote(b))))
}

fn render_list(items: impl Iterator<Item = String>) -> String {
    format!("[{}]", items.collect::<Vec<_>>().join(", "))
}

fn render_sentiment(s: &SentimentScores) -> String {
    format!(
        "{{'neg': {}, 'neu': {}, 'pos': {}, 'compound': {}}}",
        render_score(s.negative),
        render_score(s.neutral),
        render_score(s.positive),
        render_score(s.compound)
    )
}

/// Whole numbers keep one decimal place so scores always read as floats.
fn render_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Single-quoted unless the text contains a single quote and no double quote.
fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') { '"' } else { '\'' };
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            }
            c => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_tags() -> Vec<TokenTag> {
        vec![
            TokenTag::new("Apple", "PROPN"),
            TokenTag::new("is", "AUX"),
            TokenTag::new("looking", "VERB"),
            TokenTag::new("startup", "NOUN"),
            TokenTag::new("buying", "VERB"),
        ]
    }

    #[test]
    fn all_filter_passes_pairs_through_unchanged() {
        assert_eq!(filter_token_tags(&sample_tags(), PosFilter::All), sample_tags());
    }

    #[test]
    fn tag_filter_keeps_only_matching_pairs_in_order() {
        let verbs = filter_token_tags(&sample_tags(), PosFilter::Verb);
        assert_eq!(verbs, vec![TokenTag::new("looking", "VERB"), TokenTag::new("buying", "VERB")]);
        assert!(filter_token_tags(&sample_tags(), PosFilter::Adv).is_empty());
    }

    #[test]
    fn sections_appear_in_fixed_order_even_when_empty() {
        let out = format_results(&[], &[], &[], &[], &[], &SentimentScores::default(), PosFilter::All);
        assert_eq!(
            out,
            "Sentences:\n[]\n\nFiltered Words:\n[]\n\nLemmatized Words:\n[]\n\nTokens and POS Tags:\n[]\n\n\
             Named Entities:\n[]\n\nSentiment Analysis:\n{'neg': 0.0, 'neu': 0.0, 'pos': 0.0, 'compound': 0.0}\n"
        );
    }

    #[test]
    fn populated_sections_render_lists_and_pairs() {
        let out = format_results(
            &strings(&["I love this!"]),
            &strings(&["love", "!"]),
            &strings(&["love", "!"]),
            &sample_tags(),
            &[NamedEntity::new("Apple", "ORG")],
            &SentimentScores { negative: 0.0, neutral: 0.192, positive: 0.808, compound: 0.6696 },
            PosFilter::Noun,
        );
        assert!(out.contains("Sentences:\n['I love this!']\n\n"));
        assert!(out.contains("Filtered Words:\n['love', '!']\n\n"));
        assert!(out.contains("Tokens and POS Tags:\n[('startup', 'NOUN')]\n\n"));
        assert!(out.contains("Named Entities:\n[('Apple', 'ORG')]\n\n"));
        assert!(out.ends_with("{'neg': 0.0, 'neu': 0.192, 'pos': 0.808, 'compound': 0.6696}\n"));
    }

    #[test]
    fn quoting_escapes_like_a_repr() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("n't"), "\"n't\"");
        assert_eq!(quote("both ' and \""), "'both \\' and \"'");
        assert_eq!(quote("line\nbreak"), "'line\\nbreak'");
    }

    #[test]
    fn report_render_matches_format_results() {
        let report = AnalysisReport { token_tags: sample_tags(), ..Default::default() };
        let filtered = report.filtered(PosFilter::Verb);
        assert_eq!(filtered.token_tags.len(), 2);
        assert_eq!(report.render(PosFilter::Verb), filtered.render(PosFilter::All));
    }
}
