//! # job_terms
//!
//! Ranks the nouns that best characterize each category of a labeled
//! collection of job postings.
//!
//! Records are grouped by a category field into a term-frequency corpus.
//! Every term gets a discriminative score per category from a pluggable
//! [`TermScorer`]; the terms a [`PosTagger`] marks as nouns are kept and the
//! top N form the category's ranking.
//!
//! ```
//! use job_terms::{DefaultPipeline, NoopObserver, PipelineConfig, Record};
//!
//! let records = vec![
//!     Record::new().with("title", "X").with("requirements", "engineer builds pipeline"),
//!     Record::new().with("title", "X").with("requirements", "engineer"),
//!     Record::new().with("title", "Y").with("requirements", "analyst builds report"),
//! ];
//! let pipeline = DefaultPipeline::from_config(PipelineConfig::default().with_top_n(1)).unwrap();
//! let analysis = pipeline.run(&records, &mut NoopObserver).unwrap();
//! assert_eq!(analysis.ranking("X").unwrap().term_names(), vec!["engineer"]);
//! ```

pub mod corpus;
pub mod error;
pub mod nlp;
pub mod pipeline;
pub mod rank;
pub mod scoring;
pub mod source;
pub mod types;

pub use corpus::{build_corpus, Corpus, CorpusBuilder};
pub use error::{Error, Result};
pub use pipeline::config::PipelineConfig;
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageTimingObserver};
pub use pipeline::runner::{Analysis, DefaultPipeline, PipelineBuilder, TermScoringPipeline};
pub use pipeline::traits::{PosTagger, TermScorer, Tokenizer};
pub use rank::{filter_to_nouns, rank, top_n};
pub use scoring::{compute_discriminative_scores, ScaledFScore, Scaler, TermScores};
pub use types::{RankedTermList, Record, ScoredTerm, TermStats, TermStatsTable};
