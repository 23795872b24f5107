//! Single-token part-of-speech tagging
//!
//! [`LexiconTagger`] assigns Penn Treebank codes to isolated tokens using a
//! closed-class lexicon, a list of verbs common in job postings, and suffix
//! rules. Open-class words it knows nothing about default to nouns (`NN` or
//! `NNS`), which is also what statistical taggers do for unseen single
//! tokens. Tokens without any alphanumeric character get the empty tag.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::pipeline::traits::PosTagger;

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "another",
];

const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "of", "for", "with", "from", "by", "about", "into", "onto", "over", "under",
    "between", "through", "during", "within", "without", "across", "against", "among", "around",
    "before", "after", "behind", "beyond", "upon", "per", "via", "like", "than", "while",
    "because", "if", "whether", "although", "though", "since", "unless", "until", "as",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "plus"];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "myself",
    "yourself", "itself", "ourselves", "themselves", "one",
];

const POSSESSIVES: &[&str] = &["my", "your", "his", "its", "our", "their"];

const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would",
];

const WH_WORDS: &[(&str, &str)] = &[
    ("which", "WDT"),
    ("what", "WP"),
    ("who", "WP"),
    ("whom", "WP"),
    ("whose", "WP$"),
    ("where", "WRB"),
    ("when", "WRB"),
    ("why", "WRB"),
    ("how", "WRB"),
];

const AUXILIARIES: &[(&str, &str)] = &[
    ("be", "VB"),
    ("is", "VBZ"),
    ("are", "VBP"),
    ("am", "VBP"),
    ("was", "VBD"),
    ("were", "VBD"),
    ("been", "VBN"),
    ("being", "VBG"),
    ("have", "VBP"),
    ("has", "VBZ"),
    ("had", "VBD"),
    ("do", "VBP"),
    ("does", "VBZ"),
    ("did", "VBD"),
    ("done", "VBN"),
    ("get", "VB"),
    ("got", "VBD"),
    ("made", "VBN"),
    ("built", "VBN"),
    ("written", "VBN"),
    ("taken", "VBN"),
    ("given", "VBN"),
    ("known", "VBN"),
];

const ADVERBS: &[&str] = &[
    "not", "also", "very", "well", "often", "always", "never", "already", "too", "just", "only",
    "even", "still", "ever", "here", "there", "then", "now", "again", "preferably", "ideally",
];

const ADJECTIVES: &[&str] = &[
    "good", "great", "strong", "new", "large", "big", "small", "high", "low", "key", "able",
    "senior", "junior", "excellent", "solid", "deep", "broad", "complex", "fast", "related",
    "relevant", "equivalent", "other", "such", "same", "own", "preferred", "proficient",
    "familiar", "hands-on", "remote", "full", "various", "multiple", "several", "advanced",
];

/// Base forms of verbs that show up in requirement sections.
///
/// Ambiguous words that are mostly nouns in postings ("design", "work",
/// "experience", "lead", "support") are left out on purpose so they tag as
/// nouns.
const VERBS: &[&str] = &[
    "analyze", "apply", "assist", "automate", "build", "collaborate", "collect", "communicate",
    "contribute", "create", "define", "deliver", "deploy", "develop", "drive", "enable",
    "ensure", "establish", "evaluate", "execute", "explain", "explore", "extract", "help",
    "identify", "implement", "improve", "include", "integrate", "interpret", "know", "learn",
    "maintain", "make", "manage", "mentor", "monitor", "need", "optimize", "own", "partner",
    "perform", "prepare", "present", "prioritize", "provide", "require", "scale", "solve",
    "take", "translate", "understand", "use", "utilize", "validate", "want", "write",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ical", "ial", "less", "ish",
];

/// Lexicon and suffix based Penn Treebank tagger for isolated tokens
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: FxHashMap<&'static str, &'static str>,
    verbs: FxHashSet<&'static str>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        let mut lexicon = FxHashMap::default();
        let closed: &[(&[&str], &str)] = &[
            (DETERMINERS, "DT"),
            (PREPOSITIONS, "IN"),
            (CONJUNCTIONS, "CC"),
            (PRONOUNS, "PRP"),
            (POSSESSIVES, "PRP$"),
            (MODALS, "MD"),
            (ADVERBS, "RB"),
            (ADJECTIVES, "JJ"),
        ];
        for (words, tag) in closed {
            for word in words.iter() {
                lexicon.insert(*word, *tag);
            }
        }
        for (word, tag) in WH_WORDS.iter().chain(AUXILIARIES) {
            lexicon.insert(*word, *tag);
        }
        lexicon.insert("to", "TO");

        let verbs = VERBS.iter().copied().collect();
        Self { lexicon, verbs }
    }

    fn is_verb_base(&self, stem: &str) -> bool {
        self.verbs.contains(stem)
    }

    /// Match an inflected verb form against the base list
    fn verb_form(&self, word: &str) -> Option<&'static str> {
        if self.is_verb_base(word) {
            return Some("VB");
        }
        if let Some(stem) = word.strip_suffix("ing") {
            if self.stem_matches(stem) {
                return Some("VBG");
            }
        }
        if let Some(stem) = word.strip_suffix("ed") {
            if self.stem_matches(stem) {
                return Some("VBD");
            }
        }
        if let Some(stem) = word.strip_suffix("es") {
            if self.is_verb_base(stem) {
                return Some("VBZ");
            }
        }
        if let Some(stem) = word.strip_suffix('s') {
            if self.is_verb_base(stem) {
                return Some("VBZ");
            }
        }
        None
    }

    /// "analyz" -> "analyze", "appli" -> "apply", "scal" -> "scale"
    fn stem_matches(&self, stem: &str) -> bool {
        if stem.is_empty() {
            return false;
        }
        if self.is_verb_base(stem) || self.is_verb_base(&format!("{stem}e")) {
            return true;
        }
        if let Some(root) = stem.strip_suffix('i') {
            if self.is_verb_base(&format!("{root}y")) {
                return true;
            }
        }
        // doubled final consonant: "planned" -> "plan"
        let mut tail = stem.chars().rev();
        match (tail.next(), tail.next()) {
            (Some(last), Some(prev)) if last == prev && stem.len() > 2 => {
                self.is_verb_base(&stem[..stem.len() - last.len_utf8()])
            }
            _ => false,
        }
    }

    fn classify(&self, token: &str) -> &'static str {
        if !token.chars().any(char::is_alphanumeric) {
            return "";
        }

        let word = token.to_lowercase();
        if let Some(&tag) = self.lexicon.get(word.as_str()) {
            return tag;
        }
        if is_number(&word) {
            return "CD";
        }
        if let Some(tag) = self.verb_form(&word) {
            return tag;
        }
        if word.len() > 4 && word.ends_with("ly") {
            return "RB";
        }
        if word.len() > 4 && word.ends_with("ed") {
            return "VBN";
        }
        if word.len() > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return "JJ";
        }
        if is_plural(&word) {
            return "NNS";
        }
        "NN"
    }
}

fn is_number(word: &str) -> bool {
    let digits = word.chars().filter(|c| c.is_ascii_digit()).count();
    digits > 0
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%' | '+' | '-' | '$' | 'k'))
}

fn is_plural(word: &str) -> bool {
    word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
}

impl PosTagger for LexiconTagger {
    fn tag(&self, token: &str) -> String {
        self.classify(token).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(token: &str) -> String {
        LexiconTagger::new().tag(token)
    }

    #[test]
    fn test_unknown_words_are_nouns() {
        assert_eq!(tag("engineer"), "NN");
        assert_eq!(tag("pipeline"), "NN");
        assert_eq!(tag("python"), "NN");
        assert_eq!(tag("sql"), "NN");
        assert_eq!(tag("c++"), "NN");
    }

    #[test]
    fn test_plural_nouns() {
        assert_eq!(tag("pipelines"), "NNS");
        assert_eq!(tag("requirements"), "NNS");
        assert_eq!(tag("analysis"), "NN");
        assert_eq!(tag("business"), "NN");
    }

    #[test]
    fn test_verb_forms() {
        assert_eq!(tag("builds"), "VBZ");
        assert_eq!(tag("analyzes"), "VBZ");
        assert_eq!(tag("build"), "VB");
        assert_eq!(tag("building"), "VBG");
        assert_eq!(tag("analyzing"), "VBG");
        assert_eq!(tag("applied"), "VBD");
        assert_eq!(tag("required"), "VBD");
        assert_eq!(tag("is"), "VBZ");
    }

    #[test]
    fn test_ing_nouns_stay_nouns() {
        assert_eq!(tag("engineering"), "NN");
        assert_eq!(tag("modeling"), "NN");
    }

    #[test]
    fn test_function_words() {
        assert_eq!(tag("the"), "DT");
        assert_eq!(tag("with"), "IN");
        assert_eq!(tag("and"), "CC");
        assert_eq!(tag("should"), "MD");
        assert_eq!(tag("to"), "TO");
        assert_eq!(tag("their"), "PRP$");
    }

    #[test]
    fn test_adjectives_and_adverbs() {
        assert_eq!(tag("strong"), "JJ");
        assert_eq!(tag("analytical"), "JJ");
        assert_eq!(tag("collaborative"), "JJ");
        assert_eq!(tag("quickly"), "RB");
    }

    #[test]
    fn test_numbers_and_symbols() {
        assert_eq!(tag("5+"), "CD");
        assert_eq!(tag("2023"), "CD");
        assert_eq!(tag("..."), "");
        assert_eq!(tag(""), "");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(tag("The"), "DT");
        assert_eq!(tag("Builds"), "VBZ");
    }
}
