//! Pipeline runner: orchestrates stage execution and result assembly.
//!
//! The [`TermScoringPipeline`] struct holds a validated [`PipelineConfig`]
//! and a statically-composed set of collaborators. Calling
//! [`TermScoringPipeline::run`] executes the stages in order, threading the
//! corpus and scores between them and notifying a [`PipelineObserver`] at
//! each boundary.
//!
//! # Static dispatch
//!
//! `TermScoringPipeline` is generic over the tokenizer, scorer and tagger,
//! so each combination is monomorphized into its own concrete type. Use
//! [`PipelineBuilder`] to swap any of them.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::corpus::{build_corpus, Corpus};
use crate::error::{Error, Result};
use crate::nlp::clean::{word_frequencies, TextCleaner};
use crate::nlp::tagger::LexiconTagger;
use crate::nlp::tokenizer::WhitespaceTokenizer;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReportBuilder, STAGE_COMPACT, STAGE_CORPUS,
    STAGE_FILTER, STAGE_RANK, STAGE_SCORE, STAGE_TAG,
};
use crate::pipeline::traits::{PosTagger, TermScorer, Tokenizer};
use crate::pipeline::validation::ValidationEngine;
use crate::rank::{self, NounLookup};
use crate::scoring::{
    compute_discriminative_scores, into_scored_terms, score_all, stats_table, ScaledFScore,
    TermScores,
};
use crate::source::{hosts_by_category, top_hosts};
use crate::types::{Document, HostCount, RankedTermList, Record, TermStatsTable, WordCount};

/// Enter a tracing span for a pipeline stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Analysis: the result of one run
// ============================================================================

/// Everything a run produces, ready for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Categories of the scored corpus, sorted
    pub categories: Vec<String>,
    /// Documents per category, indexed like `categories`
    pub document_counts: Vec<usize>,
    pub stats: TermStatsTable,
    /// One ranking per requested category
    pub rankings: Vec<RankedTermList>,
    /// Hosts of postings that carry the cleaned text field
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<HostCount>,
    /// Hosts of the analyzed documents, per category
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub category_hosts: BTreeMap<String, Vec<HostCount>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<WordCount>,
}

impl Analysis {
    /// Ranking for `category`, if it was requested
    pub fn ranking(&self, category: &str) -> Option<&RankedTermList> {
        self.rankings.iter().find(|r| r.category == category)
    }
}

// ============================================================================
// TermScoringPipeline
// ============================================================================

/// A pipeline composed of a configuration and three collaborators.
///
/// | Param | Trait | Default impl |
/// |-------|-------|--------------|
/// | `Tok` | [`Tokenizer`] | [`WhitespaceTokenizer`] |
/// | `Sc`  | [`TermScorer`] | [`ScaledFScore`] |
/// | `Tg`  | [`PosTagger`] | [`LexiconTagger`] |
#[derive(Debug, Clone)]
pub struct TermScoringPipeline<Tok, Sc, Tg> {
    config: PipelineConfig,
    tokenizer: Tok,
    scorer: Sc,
    tagger: Tg,
}

/// Type alias for the pipeline with all default collaborators.
pub type DefaultPipeline = TermScoringPipeline<WhitespaceTokenizer, ScaledFScore, LexiconTagger>;

impl DefaultPipeline {
    /// Validate `config` and build a pipeline with the default collaborators.
    /// The scorer follows `config.scoring`.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        PipelineBuilder::new(config).build()
    }
}

impl<Tok, Sc, Tg> TermScoringPipeline<Tok, Sc, Tg> {
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &Tok {
        &self.tokenizer
    }

    pub fn scorer(&self) -> &Sc {
        &self.scorer
    }

    pub fn tagger(&self) -> &Tg {
        &self.tagger
    }
}

// ============================================================================
// TermScoringPipeline::run: execute stages in order
// ============================================================================

impl<Tok, Sc, Tg> TermScoringPipeline<Tok, Sc, Tg>
where
    Tok: Tokenizer,
    Sc: TermScorer,
    Tg: PosTagger,
{
    /// Build the scoring corpus: tokenize, drop infrequent terms, compact.
    ///
    /// Runs the corpus, filter and compact stages.
    pub fn prepare_corpus(
        &self,
        records: &[Record],
        observer: &mut impl PipelineObserver,
    ) -> Result<Corpus> {
        let cfg = &self.config;

        // Stage 1: Corpus
        let corpus = {
            trace_stage!(STAGE_CORPUS);
            observer.on_stage_start(STAGE_CORPUS);
            let clock = StageClock::start();
            let corpus = build_corpus(
                records,
                &cfg.text_field,
                &cfg.category_field,
                &self.tokenizer,
            )?;
            let report = StageReportBuilder::new(clock.elapsed())
                .documents(corpus.num_documents())
                .terms(corpus.num_terms())
                .categories(corpus.categories().len())
                .build();
            observer.on_stage_end(STAGE_CORPUS, &report);
            corpus
        };

        // Stage 2: Filter infrequent terms
        let corpus = {
            trace_stage!(STAGE_FILTER);
            observer.on_stage_start(STAGE_FILTER);
            let clock = StageClock::start();
            let corpus = corpus.remove_infrequent(cfg.min_term_frequency);
            ensure_categories_have_tokens(&corpus)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .terms(corpus.num_terms())
                .build();
            observer.on_stage_end(STAGE_FILTER, &report);
            corpus
        };

        // Stage 3: Compact vocabulary
        let corpus = {
            trace_stage!(STAGE_COMPACT);
            observer.on_stage_start(STAGE_COMPACT);
            let clock = StageClock::start();
            let corpus = match cfg.max_terms {
                Some(max_terms) => corpus.compact(&self.scorer, max_terms)?,
                None => corpus,
            };
            ensure_categories_have_tokens(&corpus)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .terms(corpus.num_terms())
                .build();
            observer.on_stage_end(STAGE_COMPACT, &report);
            corpus
        };

        observer.on_corpus(&corpus);
        Ok(corpus)
    }

    /// Execute the pipeline over `records`, producing an [`Analysis`].
    ///
    /// Stages run in order:
    /// 1. Corpus (select documents, tokenize, count)
    /// 2. Filter (drop terms below `min_term_frequency`)
    /// 3. Compact (keep the best `max_terms` per category)
    /// 4. Score (every term in every category)
    /// 5. Tag (noun decision per vocabulary term)
    /// 6. Rank (top `top_n` nouns per requested category)
    ///
    /// Any failure aborts the run; no partial analysis is returned.
    pub fn run(
        &self,
        records: &[Record],
        observer: &mut impl PipelineObserver,
    ) -> Result<Analysis> {
        let cfg = &self.config;
        let corpus = self.prepare_corpus(records, observer)?;

        let requested = self.requested_categories(&corpus)?;

        // Stage 4: Score
        let (scores, stats) = {
            trace_stage!(STAGE_SCORE);
            observer.on_stage_start(STAGE_SCORE);
            let clock = StageClock::start();
            let scores = score_all(&corpus, &self.scorer)?;
            let stats = stats_table(&corpus, &scores);
            let report = StageReportBuilder::new(clock.elapsed())
                .terms(stats.rows.len())
                .categories(stats.categories.len())
                .build();
            observer.on_stage_end(STAGE_SCORE, &report);
            observer.on_stats(&stats);
            (scores, stats)
        };

        // Stage 5: Tag
        let nouns = {
            trace_stage!(STAGE_TAG);
            observer.on_stage_start(STAGE_TAG);
            let clock = StageClock::start();
            let nouns = NounLookup::from_corpus(&corpus, &self.tagger);
            debug!(terms = nouns.len(), nouns = nouns.num_nouns(), "tagged vocabulary");
            let report = StageReportBuilder::new(clock.elapsed())
                .terms(nouns.num_nouns())
                .build();
            observer.on_stage_end(STAGE_TAG, &report);
            nouns
        };

        // Stage 6: Rank
        let rankings = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let mut rankings = Vec::with_capacity(requested.len());
            for category_idx in requested {
                let category = &corpus.categories()[category_idx];
                let candidates = nouns.filter(into_scored_terms(scores[category_idx].clone()));
                let ranking = rank::top_n(category, candidates, cfg.top_n);
                observer.on_ranking(&ranking);
                rankings.push(ranking);
            }
            let report = StageReportBuilder::new(clock.elapsed())
                .categories(rankings.len())
                .build();
            observer.on_stage_end(STAGE_RANK, &report);
            rankings
        };

        let (hosts, category_hosts) = match &cfg.url_field {
            Some(url_field) => self.count_hosts(records, url_field),
            None => (Vec::new(), BTreeMap::new()),
        };
        let words = match &cfg.cloud_field {
            Some(field) => {
                let cleaner = TextCleaner::new(&cfg.stopword_language);
                let texts = records.iter().filter_map(|r| r.get_non_empty(field));
                word_frequencies(texts, &cleaner, cfg.cloud_words)
            }
            None => Vec::new(),
        };

        info!(
            documents = corpus.num_documents(),
            terms = corpus.num_terms(),
            rankings = rankings.len(),
            "analysis complete"
        );

        let document_counts = corpus
            .categories()
            .iter()
            .map(|c| corpus.document_count(c).unwrap_or(0))
            .collect();

        Ok(Analysis {
            categories: corpus.categories().to_vec(),
            document_counts,
            stats,
            rankings,
            hosts,
            category_hosts,
            words,
        })
    }

    /// Overall hosts of the records with cleaned text (all records when no
    /// text field is configured), and per-category hosts of the analyzed
    /// documents.
    fn count_hosts(
        &self,
        records: &[Record],
        url_field: &str,
    ) -> (Vec<HostCount>, BTreeMap<String, Vec<HostCount>>) {
        let cfg = &self.config;
        let described = records.iter().filter(|r| match &cfg.cloud_field {
            Some(field) => r.get_non_empty(field).is_some(),
            None => true,
        });
        let hosts = top_hosts(described, url_field, cfg.top_hosts);

        let documents: Vec<Document> = records
            .iter()
            .filter_map(|r| {
                Document::from_record(r, &cfg.text_field, &cfg.category_field)
                    .map(|doc| doc.with_source_host(r, url_field))
            })
            .collect();
        (hosts, hosts_by_category(&documents, cfg.top_hosts))
    }

    /// Rank the top `n` nouns of `category` against an already built corpus.
    pub fn rank(&self, corpus: &Corpus, category: &str, n: usize) -> Result<RankedTermList> {
        rank::rank(corpus, category, n, &self.scorer, &self.tagger)
    }

    /// Discriminative scores of every term for `category`.
    pub fn scores(&self, corpus: &Corpus, category: &str) -> Result<TermScores> {
        compute_discriminative_scores(corpus, category, &self.scorer)
    }

    /// Indices of the categories to rank: the configured ones, or all.
    fn requested_categories(&self, corpus: &Corpus) -> Result<Vec<usize>> {
        if self.config.categories.is_empty() {
            return Ok((0..corpus.categories().len()).collect());
        }
        let mut indices = Vec::with_capacity(self.config.categories.len());
        for category in &self.config.categories {
            let idx = corpus
                .category_index(category)
                .ok_or_else(|| Error::UnknownCategory(category.clone()))?;
            if !indices.contains(&idx) {
                indices.push(idx);
            }
        }
        Ok(indices)
    }
}

fn ensure_categories_have_tokens(corpus: &Corpus) -> Result<()> {
    for (idx, category) in corpus.categories().iter().enumerate() {
        if corpus.total_tokens(idx) == 0 {
            return Err(Error::EmptyCategory(category.clone()));
        }
    }
    Ok(())
}

// ============================================================================
// PipelineBuilder: fluent construction with custom collaborators
// ============================================================================

/// Fluent builder for a [`TermScoringPipeline`].
///
/// Starts from the default collaborators, with the scorer taken from the
/// config's `scoring` section, and allows overriding each one.
///
/// ```
/// # use job_terms::pipeline::config::PipelineConfig;
/// # use job_terms::pipeline::runner::PipelineBuilder;
/// # use job_terms::nlp::tokenizer::WhitespaceTokenizer;
/// let pipeline = PipelineBuilder::new(PipelineConfig::default())
///     .tokenizer(WhitespaceTokenizer::new().with_keep_case(true))
///     .build()
///     .unwrap();
/// assert_eq!(pipeline.config().top_n, 30);
/// ```
pub struct PipelineBuilder<Tok = WhitespaceTokenizer, Sc = ScaledFScore, Tg = LexiconTagger> {
    config: PipelineConfig,
    tokenizer: Tok,
    scorer: Sc,
    tagger: Tg,
}

impl PipelineBuilder {
    pub fn new(config: PipelineConfig) -> Self {
        let scorer = config.scoring.scorer();
        PipelineBuilder {
            config,
            tokenizer: WhitespaceTokenizer::new(),
            scorer,
            tagger: LexiconTagger::new(),
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl<Tok, Sc, Tg> PipelineBuilder<Tok, Sc, Tg> {
    /// Override the tokenizer.
    pub fn tokenizer<T: Tokenizer>(self, tokenizer: T) -> PipelineBuilder<T, Sc, Tg> {
        PipelineBuilder {
            config: self.config,
            tokenizer,
            scorer: self.scorer,
            tagger: self.tagger,
        }
    }

    /// Override the scorer. `config.scoring` is then ignored.
    pub fn scorer<S: TermScorer>(self, scorer: S) -> PipelineBuilder<Tok, S, Tg> {
        PipelineBuilder {
            config: self.config,
            tokenizer: self.tokenizer,
            scorer,
            tagger: self.tagger,
        }
    }

    /// Override the part-of-speech tagger.
    pub fn tagger<P: PosTagger>(self, tagger: P) -> PipelineBuilder<Tok, Sc, P> {
        PipelineBuilder {
            config: self.config,
            tokenizer: self.tokenizer,
            scorer: self.scorer,
            tagger,
        }
    }

    /// Validate the config and consume the builder.
    ///
    /// Validation errors become [`Error::InvalidConfig`]; warnings are
    /// logged.
    pub fn build(self) -> Result<TermScoringPipeline<Tok, Sc, Tg>> {
        let report = ValidationEngine::with_defaults().validate(&self.config);
        for warning in report.warnings() {
            warn!(%warning, "config warning");
        }
        report.into_result()?;

        Ok(TermScoringPipeline {
            config: self.config,
            tokenizer: self.tokenizer,
            scorer: self.scorer,
            tagger: self.tagger,
        })
    }
}
