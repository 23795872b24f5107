//! Default cleaning pass for free-text posting fields
//!
//! Lowercase, punctuation to spaces, standalone digit blocks removed,
//! stopwords removed, whitespace collapsed. Digits inside words ("s3",
//! "python3") are kept.

use rustc_hash::FxHashMap;

use super::stopwords::StopwordFilter;
use crate::types::WordCount;

/// Cleans free text before word counting
#[derive(Debug, Clone, Default)]
pub struct TextCleaner {
    stopwords: StopwordFilter,
}

impl TextCleaner {
    /// Cleaner with the stopword list for `language`
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: StopwordFilter::new(language),
        }
    }

    /// Cleaner with an explicit stopword filter
    pub fn with_stopwords(stopwords: StopwordFilter) -> Self {
        Self { stopwords }
    }

    /// Iterate over the cleaned words of `text` without joining them
    pub fn words<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split(|c: char| c.is_whitespace() || is_punctuation(c))
            .filter(|w| !w.is_empty())
            .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
            .map(str::to_lowercase)
            .filter(move |w| !self.stopwords.is_stopword(w))
    }

    /// Clean `text` into a single space-separated string
    pub fn clean(&self, text: &str) -> String {
        self.words(text).collect::<Vec<_>>().join(" ")
    }
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_whitespace())
}

/// Most frequent cleaned words across `texts`, count descending then word
/// ascending, truncated to `k`.
pub fn word_frequencies<'a, I>(texts: I, cleaner: &TextCleaner, k: usize) -> Vec<WordCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for text in texts {
        for word in cleaner.words(text) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words.truncate(k);
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_default_pass() {
        let cleaner = TextCleaner::with_stopwords(StopwordFilter::from_list(&["the", "with", "of"]));
        let cleaned = cleaner.clean("The Data-Engineer, with 5 years of   SQL & python3!");
        assert_eq!(cleaned, "data engineer years sql python3");
    }

    #[test]
    fn test_clean_drops_english_function_words() {
        let cleaner = TextCleaner::new("en");
        let cleaned = cleaner.clean("the python and the sql");
        assert!(!cleaned.split(' ').any(|w| w == "the" || w == "and"));
        assert!(cleaned.contains("python"));
    }

    #[test]
    fn test_clean_empty_and_symbol_only() {
        let cleaner = TextCleaner::new("en");
        assert_eq!(cleaner.clean(""), "");
        assert_eq!(cleaner.clean("--- 2023 ..."), "");
    }

    #[test]
    fn test_clean_without_stopwords() {
        let cleaner = TextCleaner::with_stopwords(StopwordFilter::empty());
        assert_eq!(cleaner.clean("The model"), "the model");
    }

    #[test]
    fn test_word_frequencies_ordering() {
        let cleaner = TextCleaner::with_stopwords(StopwordFilter::from_list(&["and"]));
        let texts = ["spark and sql", "sql, python", "python sql airflow"];
        let words = word_frequencies(texts, &cleaner, 3);

        assert_eq!(
            words,
            vec![
                WordCount { word: "sql".into(), count: 3 },
                WordCount { word: "python".into(), count: 2 },
                WordCount { word: "airflow".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_word_frequencies_zero_k() {
        let cleaner = TextCleaner::new("en");
        assert!(word_frequencies(["sql"], &cleaner, 0).is_empty());
    }
}
