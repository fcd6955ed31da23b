use lazy_static::lazy_static;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    // Penn Treebank clitics: "don't" -> "do" + "n't", "it's" -> "it" + "'s".
    static ref CLITIC_RE: Regex = Regex::new(r"(?i)^(.+?)(n['’]t|['’](?:s|re|ve|ll|d|m))$").unwrap();
}

/// Word tokens: UAX #29 word-boundary segments minus whitespace, with
/// punctuation kept as separate tokens and English clitics split off.
pub fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    for segment in text.split_word_bounds() {
        if segment.trim().is_empty() {
            continue;
        }
        match CLITIC_RE.captures(segment) {
            Some(caps) => {
                words.push(caps[1].to_string());
                words.push(caps[2].to_string());
            }
            None => words.push(segment.to_string()),
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_words() {
        assert!(split_words("").is_empty());
        assert!(split_words("  \n\t").is_empty());
    }

    #[test]
    fn punctuation_and_currency_are_separate_tokens() {
        let words = split_words("It costs $1 billion.");
        assert_eq!(words, vec!["It", "costs", "$", "1", "billion", "."]);
    }

    #[test]
    fn clitics_are_split() {
        assert_eq!(split_words("I don't know"), vec!["I", "do", "n't", "know"]);
        assert_eq!(split_words("She's here"), vec!["She", "'s", "here"]);
        assert_eq!(split_words("we'll"), vec!["we", "'ll"]);
    }
}
