//! Per-run orchestration of ingestion, encoding, and evaluation
//!
//! One [`Pipeline`] owns everything a single analysis run needs — the
//! feature plan, the optional rating roster and sentiment scorer, the
//! filter toggles — so independent runs never share state.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::data::{CourseRecord, Dataset, Field, RatingRoster};
use crate::error::Result;
use crate::features::{FeatureContext, FeaturePlan, FeatureSet, SentimentScorer};
use crate::model::Regressor;
use crate::preprocessing::standardize;
use crate::validation::{cross_validate, CvConfig, CvReport};

/// Counts of what ingestion kept and dropped. Dropping is a filtering
/// policy, not an error; the counts are the only trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    pub retained: usize,
    /// A field the active feature set requires was absent or sentinel.
    pub dropped_missing_field: usize,
    /// Fill ratio not computable (no counts, or zero capacity).
    pub dropped_no_target: usize,
    /// Excluded by the lab-section rule.
    pub dropped_lab_section: usize,
    /// Rating feature active but no roster entry matched the instructor.
    pub dropped_no_rating: usize,
}

impl IngestStats {
    pub fn total(&self) -> usize {
        self.retained
            + self.dropped_missing_field
            + self.dropped_no_target
            + self.dropped_lab_section
            + self.dropped_no_rating
    }
}

/// Result of an end-to-end [`Pipeline::run`].
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub dataset: Dataset,
    pub stats: IngestStats,
    pub report: CvReport,
}

/// One analysis run: plan, collaborators, and filter policy.
pub struct Pipeline {
    plan: FeaturePlan,
    roster: Option<RatingRoster>,
    sentiment: Option<Box<dyn SentimentScorer>>,
    keep_lab_sections: bool,
}

impl Pipeline {
    pub fn new(plan: FeaturePlan) -> Self {
        Self {
            plan,
            roster: None,
            sentiment: None,
            keep_lab_sections: false,
        }
    }

    pub fn with_ratings(mut self, roster: RatingRoster) -> Self {
        self.roster = Some(roster);
        self
    }

    pub fn with_sentiment(mut self, scorer: Box<dyn SentimentScorer>) -> Self {
        self.sentiment = Some(scorer);
        self
    }

    /// Keep sections the lab-section rule would otherwise exclude.
    pub fn keep_lab_sections(mut self, keep: bool) -> Self {
        self.keep_lab_sections = keep;
        self
    }

    pub fn plan(&self) -> &FeaturePlan {
        &self.plan
    }

    fn context(&self) -> FeatureContext<'_> {
        FeatureContext {
            roster: self.roster.as_ref(),
            sentiment: self.sentiment.as_deref(),
        }
    }

    /// Filter raw records down to the retained set and derive targets.
    ///
    /// A record is retained iff every field the plan requires is present
    /// and non-sentinel, its fill ratio is computable, it passes the
    /// lab-section rule, and (when the rating feature is active) its
    /// instructor matches a roster entry. Each dropped record is counted
    /// under its first failing check.
    pub fn ingest(&self, records: Vec<CourseRecord>) -> Result<(Dataset, IngestStats)> {
        self.plan.validate(&self.context())?;

        let required = self.plan.required_fields();
        let needs_rating = required.contains(&Field::InstructorRating);

        let mut stats = IngestStats::default();
        let mut retained = Vec::new();
        let mut targets = Vec::new();

        for record in records {
            if let Some(field) = required.iter().find(|&&f| !record.has_field(f)) {
                debug!(field = field.name(), title = %record.title, "dropping record: missing field");
                stats.dropped_missing_field += 1;
                continue;
            }

            let target = match record.fill_ratio() {
                Some(target) => target,
                None => {
                    stats.dropped_no_target += 1;
                    continue;
                }
            };

            if !self.keep_lab_sections && record.is_lab_section() {
                stats.dropped_lab_section += 1;
                continue;
            }

            if needs_rating {
                let matched = self
                    .roster
                    .as_ref()
                    .is_some_and(|roster| roster.rating_for(&record.instructor).is_some());
                if !matched {
                    stats.dropped_no_rating += 1;
                    continue;
                }
            }

            retained.push(record);
            targets.push(target);
        }

        stats.retained = retained.len();
        info!(
            retained = stats.retained,
            missing_field = stats.dropped_missing_field,
            no_target = stats.dropped_no_target,
            lab_section = stats.dropped_lab_section,
            no_rating = stats.dropped_no_rating,
            "ingested course records"
        );

        Ok((Dataset::new(retained, targets)?, stats))
    }

    /// Fit the plan's category tables over a retained dataset.
    pub fn fit_features(&self, dataset: &Dataset) -> Result<FeatureSet> {
        FeatureSet::fit(self.plan.clone(), dataset.records(), &self.context())
    }

    /// Build the (unstandardized) feature matrix for a retained dataset.
    pub fn feature_matrix(&self, features: &FeatureSet, dataset: &Dataset) -> Result<Array2<f64>> {
        features.build_matrix(dataset.records(), &self.context())
    }

    /// Cross-validate a model family over a prepared matrix.
    pub fn evaluate<M, F>(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        factory: F,
        config: &CvConfig,
    ) -> Result<CvReport>
    where
        M: Regressor,
        F: FnMut() -> M,
    {
        cross_validate(x, y, factory, config)
    }

    /// The whole pipeline: ingest, fit encoders, build and standardize the
    /// matrix, cross-validate.
    pub fn run<M, F>(
        &self,
        records: Vec<CourseRecord>,
        factory: F,
        config: &CvConfig,
    ) -> Result<PipelineRun>
    where
        M: Regressor,
        F: FnMut() -> M,
    {
        let (dataset, stats) = self.ingest(records)?;
        let features = self.fit_features(&dataset)?;
        let mut matrix = self.feature_matrix(&features, &dataset)?;
        standardize(&mut matrix)?;

        let targets = dataset.target_array();
        let report = self.evaluate(&matrix, &targets, factory, config)?;
        info!(
            trials = report.trials(),
            best = report.best,
            mean = report.mean,
            "cross-validation complete"
        );

        Ok(PipelineRun {
            dataset,
            stats,
            report,
        })
    }
}
