//! Stopword lists for text cleaning
//!
//! Backed by the `stop-words` crate. Job postings in the datasets are mostly
//! English, but the cleaning language is configurable.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Resolve a language code or name to a `stop-words` list.
///
/// Returns `None` for languages without a bundled list.
pub fn resolve_language(language: &str) -> Option<LANGUAGE> {
    let lang = match language.trim().to_lowercase().as_str() {
        "en" | "english" => LANGUAGE::English,
        "de" | "german" => LANGUAGE::German,
        "fr" | "french" => LANGUAGE::French,
        "es" | "spanish" => LANGUAGE::Spanish,
        "it" | "italian" => LANGUAGE::Italian,
        "pt" | "portuguese" => LANGUAGE::Portuguese,
        "nl" | "dutch" => LANGUAGE::Dutch,
        "ru" | "russian" => LANGUAGE::Russian,
        "sv" | "swedish" => LANGUAGE::Swedish,
        "no" | "norwegian" => LANGUAGE::Norwegian,
        "da" | "danish" => LANGUAGE::Danish,
        "fi" | "finnish" => LANGUAGE::Finnish,
        "pl" | "polish" => LANGUAGE::Polish,
        _ => return None,
    };
    Some(lang)
}

/// Lowercase stopword set used by the text cleaner
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("en")
    }
}

impl StopwordFilter {
    /// Load the list for `language`, falling back to English when the
    /// language has no bundled list.
    pub fn new(language: &str) -> Self {
        let lang = resolve_language(language).unwrap_or(LANGUAGE::English);
        let stopwords = get(lang).iter().map(|s| s.to_lowercase()).collect();
        Self { stopwords }
    }

    /// A filter that removes nothing
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Build a filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add domain stopwords on top of the loaded list
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Case-insensitive membership check
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.stopwords.contains(word) {
            return true;
        }
        word.chars().any(char::is_uppercase) && self.stopwords.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::new("en");

        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The"));
        assert!(filter.is_stopword("and"));
        assert!(!filter.is_stopword("python"));
        assert!(!filter.is_stopword("pipeline"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert!(resolve_language("klingon").is_none());
        let filter = StopwordFilter::new("klingon");
        assert!(filter.is_stopword("the"));
    }

    #[test]
    fn test_language_names_resolve() {
        assert!(resolve_language("English").is_some());
        assert!(resolve_language(" de ").is_some());
    }

    #[test]
    fn test_custom_stopwords() {
        let mut filter = StopwordFilter::from_list(&["Experience"]);
        assert!(filter.is_stopword("experience"));
        assert!(!filter.is_stopword("the"));

        filter.add_stopwords(&["years"]);
        assert!(filter.is_stopword("Years"));
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopwordFilter::empty();
        assert!(filter.is_empty());
        assert!(!filter.is_stopword("the"));
    }
}
