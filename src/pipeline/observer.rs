//! Pipeline observer: hooks for logging, profiling and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Every method has a no-op default, so an observer only
//! implements the callbacks it cares about.

use std::time::{Duration, Instant};

use crate::corpus::Corpus;
use crate::types::{RankedTermList, TermStatsTable};

// ============================================================================
// Stage names
// ============================================================================

pub const STAGE_CORPUS: &str = "corpus";
pub const STAGE_FILTER: &str = "filter";
pub const STAGE_COMPACT: &str = "compact";
pub const STAGE_SCORE: &str = "score";
pub const STAGE_TAG: &str = "tag";
pub const STAGE_RANK: &str = "rank";

/// All stages in execution order.
pub const STAGES: [&str; 6] = [
    STAGE_CORPUS,
    STAGE_FILTER,
    STAGE_COMPACT,
    STAGE_SCORE,
    STAGE_TAG,
    STAGE_RANK,
];

// ============================================================================
// StageClock / StageReport
// ============================================================================

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What a stage did: how long it took and, where meaningful, how many
/// documents, terms or categories it produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    documents: Option<usize>,
    terms: Option<usize>,
    categories: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn documents(&self) -> Option<usize> {
        self.documents
    }

    /// Vocabulary size after the stage (or noun count for the tag stage)
    pub fn terms(&self) -> Option<usize> {
        self.terms
    }

    pub fn categories(&self) -> Option<usize> {
        self.categories
    }
}

/// Builder for reports that carry counts.
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn documents(mut self, n: usize) -> Self {
        self.report.documents = Some(n);
        self
    }

    pub fn terms(mut self, n: usize) -> Self {
        self.report.terms = Some(n);
        self
    }

    pub fn categories(mut self, n: usize) -> Self {
        self.report.categories = Some(n);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

// ============================================================================
// PipelineObserver
// ============================================================================

/// Callbacks fired by [`TermScoringPipeline::run`](super::runner::TermScoringPipeline::run).
///
/// Stage callbacks bracket each stage in [`STAGES`] order. Artifact
/// callbacks hand out read-only views of intermediate results.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Corpus after filtering and compaction, as scored
    fn on_corpus(&mut self, _corpus: &Corpus) {}

    fn on_stats(&mut self, _stats: &TermStatsTable) {}

    fn on_ranking(&mut self, _ranking: &RankedTermList) {}
}

impl<O: PipelineObserver + ?Sized> PipelineObserver for &mut O {
    fn on_stage_start(&mut self, stage: &'static str) {
        (**self).on_stage_start(stage)
    }

    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        (**self).on_stage_end(stage, report)
    }

    fn on_corpus(&mut self, corpus: &Corpus) {
        (**self).on_corpus(corpus)
    }

    fn on_stats(&mut self, stats: &TermStatsTable) {
        (**self).on_stats(stats)
    }

    fn on_ranking(&mut self, ranking: &RankedTermList) {
        (**self).on_ranking(ranking)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Records the report of every finished stage.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(stage, report)` pairs in completion order
    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_counts() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .documents(10)
            .terms(42)
            .build();
        assert_eq!(report.elapsed(), Duration::from_millis(3));
        assert_eq!(report.documents(), Some(10));
        assert_eq!(report.terms(), Some(42));
        assert_eq!(report.categories(), None);
    }

    #[test]
    fn test_timing_observer_records_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_start(STAGE_CORPUS);
        obs.on_stage_end(STAGE_CORPUS, &StageReport::new(Duration::from_millis(1)));
        obs.on_stage_end(STAGE_SCORE, &StageReport::new(Duration::from_millis(2)));

        let names: Vec<&str> = obs.reports().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![STAGE_CORPUS, STAGE_SCORE]);
        assert_eq!(obs.total(), Duration::from_millis(3));
        assert!(obs.report(STAGE_SCORE).is_some());
        assert!(obs.report(STAGE_RANK).is_none());
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn finish_tag(mut observer: impl PipelineObserver) {
            observer.on_stage_end(STAGE_TAG, &StageReport::default());
        }

        let mut obs = StageTimingObserver::new();
        finish_tag(&mut obs);
        assert_eq!(obs.reports().len(), 1);
    }
}
