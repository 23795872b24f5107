use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("corpus is empty: no document has a usable text field")]
    EmptyCorpus,

    #[error("at least two categories are required for scoring, found {found}")]
    SingleCategory { found: usize },

    #[error("category has no tokens after tokenization: {0}")]
    EmptyCategory(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("scorer returned a non-finite score {score} for term \"{term}\" in category \"{category}\"")]
    NonFiniteScore {
        category: String,
        term: String,
        score: f64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
