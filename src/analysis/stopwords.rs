use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::ResourceError;

const BUNDLED_ENGLISH: &str = include_str!("../../resources/stopwords/english.txt");

/// Lower-cased stopword set, one word per line in its source file.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn english() -> Self {
        Self::parse(BUNDLED_ENGLISH)
    }

    pub fn from_file(path: &Path) -> Result<Self, ResourceError> {
        if !path.is_file() {
            return Err(ResourceError::Missing { what: "Stopword list", path: path.to_path_buf() });
        }
        let contents = fs::read_to_string(path).map_err(|source| ResourceError::Io { path: path.to_path_buf(), source })?;
        Ok(Self::parse(&contents))
    }

    /// Blank lines and `#` comments are skipped.
    pub fn parse(contents: &str) -> Self {
        let words = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    /// Compares the lower-cased form of `word`.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_list_matches_case_insensitively() {
        let set = StopwordSet::english();
        assert_eq!(set.len(), 179);
        assert!(set.contains("the"));
        assert!(set.contains("The"));
        assert!(set.contains("IS"));
        assert!(set.contains("don't"));
        assert!(!set.contains("apple"));
        assert!(!set.contains("billion"));
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let set = StopwordSet::parse("# header\n\n  Foo \nbar\n");
        assert_eq!(set.len(), 2);
        assert!(set.contains("foo"));
        assert!(!set.contains("# header"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = StopwordSet::from_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, ResourceError::Missing { .. }));
    }
}
