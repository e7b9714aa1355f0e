//! Feature plans: the ordered declaration of engineered features

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::{Field, RatingRoster};
use crate::error::{CoursecastError, Result};
use crate::features::text::SentimentScorer;

/// One engineered feature and how it is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureSpec {
    /// Department code, single categorical.
    Department,
    /// Distribution requirements, multi categorical over a fixed number of
    /// slots. Each record fills slots left-to-right with its requirement
    /// codes, remaining slots stay zero. A zero slot is indistinguishable
    /// from the requirement coded 0 — an accepted modeling limitation of
    /// the fixed-width layout, not a bug.
    Distributions { slots: usize },
    /// Start time bucketed as a categorical over observed clock times.
    StartTime,
    /// Section length in fractional hours, numeric passthrough.
    Duration,
    /// Instructor field, single categorical.
    Instructor,
    /// Section title, single categorical.
    Title,
    /// Summary length in characters, numeric passthrough.
    SummaryLength,
    /// Summary sentiment via the caller-supplied scorer, numeric.
    SummarySentiment,
    /// 0/1 presence of a keyword in the summary. The keyword must be
    /// lowercase; use [`FeatureSpec::keyword`].
    Keyword(String),
    /// Joined instructor rating from the roster, numeric.
    InstructorRating,
}

impl FeatureSpec {
    /// Keyword-presence feature with the keyword normalized to lowercase.
    pub fn keyword(word: &str) -> Self {
        FeatureSpec::Keyword(word.to_lowercase())
    }

    /// Number of matrix columns this feature occupies.
    pub fn slots(&self) -> usize {
        match self {
            FeatureSpec::Distributions { slots } => *slots,
            _ => 1,
        }
    }

    /// Source fields a record must have for this feature to encode.
    pub fn required_fields(&self) -> Vec<Field> {
        match self {
            FeatureSpec::Department => vec![Field::Department],
            FeatureSpec::Distributions { .. } => vec![Field::Requirements],
            FeatureSpec::StartTime => vec![Field::StartTime],
            FeatureSpec::Duration => vec![Field::StartTime, Field::EndTime],
            FeatureSpec::Instructor => vec![Field::Instructor],
            FeatureSpec::Title => vec![Field::Title],
            FeatureSpec::SummaryLength
            | FeatureSpec::SummarySentiment
            | FeatureSpec::Keyword(_) => vec![Field::Summary],
            FeatureSpec::InstructorRating => vec![Field::InstructorRating],
        }
    }

    /// Label used in error messages and reports.
    pub fn label(&self) -> String {
        match self {
            FeatureSpec::Department => "department".to_string(),
            FeatureSpec::Distributions { .. } => "distributions".to_string(),
            FeatureSpec::StartTime => "start time".to_string(),
            FeatureSpec::Duration => "duration".to_string(),
            FeatureSpec::Instructor => "instructor".to_string(),
            FeatureSpec::Title => "title".to_string(),
            FeatureSpec::SummaryLength => "summary length".to_string(),
            FeatureSpec::SummarySentiment => "summary sentiment".to_string(),
            FeatureSpec::Keyword(word) => format!("keyword '{word}'"),
            FeatureSpec::InstructorRating => "instructor rating".to_string(),
        }
    }
}

/// Collaborators a feature set may need while fitting and encoding.
///
/// Both are optional; [`FeaturePlan::validate`] rejects plans whose specs
/// need an absent collaborator.
#[derive(Clone, Copy, Default)]
pub struct FeatureContext<'a> {
    pub roster: Option<&'a RatingRoster>,
    pub sentiment: Option<&'a dyn SentimentScorer>,
}

impl<'a> FeatureContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(mut self, roster: &'a RatingRoster) -> Self {
        self.roster = Some(roster);
        self
    }

    pub fn with_sentiment(mut self, scorer: &'a dyn SentimentScorer) -> Self {
        self.sentiment = Some(scorer);
        self
    }
}

/// Ordered list of engineered features; the matrix column layout follows
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturePlan {
    specs: Vec<FeatureSpec>,
}

impl FeaturePlan {
    pub fn new(specs: Vec<FeatureSpec>) -> Self {
        Self { specs }
    }

    /// The plan the original analysis converged on: department,
    /// distribution requirements, start time, duration, instructor, title.
    pub fn standard() -> Self {
        Self::new(vec![
            FeatureSpec::Department,
            FeatureSpec::Distributions { slots: 3 },
            FeatureSpec::StartTime,
            FeatureSpec::Duration,
            FeatureSpec::Instructor,
            FeatureSpec::Title,
        ])
    }

    pub fn specs(&self) -> &[FeatureSpec] {
        &self.specs
    }

    /// Total matrix width: one column per declared scalar slot.
    pub fn total_slots(&self) -> usize {
        self.specs.iter().map(FeatureSpec::slots).sum()
    }

    /// Union of source fields the active features require.
    pub fn required_fields(&self) -> BTreeSet<Field> {
        self.specs
            .iter()
            .flat_map(FeatureSpec::required_fields)
            .collect()
    }

    /// Reject plans that cannot fit: zero-slot distributions, or specs
    /// needing a collaborator the context does not carry.
    pub fn validate(&self, ctx: &FeatureContext<'_>) -> Result<()> {
        for spec in &self.specs {
            match spec {
                FeatureSpec::Distributions { slots: 0 } => {
                    return Err(CoursecastError::ConfigError(
                        "distributions feature needs at least one slot".to_string(),
                    ));
                }
                FeatureSpec::SummarySentiment if ctx.sentiment.is_none() => {
                    return Err(CoursecastError::ConfigError(
                        "summary sentiment feature needs a sentiment scorer".to_string(),
                    ));
                }
                FeatureSpec::InstructorRating if ctx.roster.is_none() => {
                    return Err(CoursecastError::ConfigError(
                        "instructor rating feature needs a rating roster".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InstructorRating;

    #[test]
    fn test_total_slots_counts_multi_features() {
        let plan = FeaturePlan::new(vec![
            FeatureSpec::Department,
            FeatureSpec::Distributions { slots: 3 },
            FeatureSpec::Duration,
        ]);
        assert_eq!(plan.total_slots(), 5);
    }

    #[test]
    fn test_required_fields_union() {
        let plan = FeaturePlan::new(vec![
            FeatureSpec::Duration,
            FeatureSpec::StartTime,
            FeatureSpec::keyword("Writing"),
        ]);
        let fields = plan.required_fields();
        assert!(fields.contains(&Field::StartTime));
        assert!(fields.contains(&Field::EndTime));
        assert!(fields.contains(&Field::Summary));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_keyword_constructor_lowercases() {
        assert_eq!(
            FeatureSpec::keyword("Writing"),
            FeatureSpec::Keyword("writing".to_string())
        );
    }

    #[test]
    fn test_validate_missing_collaborators() {
        let ctx = FeatureContext::new();

        let plan = FeaturePlan::new(vec![FeatureSpec::SummarySentiment]);
        assert!(matches!(
            plan.validate(&ctx),
            Err(CoursecastError::ConfigError(_))
        ));

        let plan = FeaturePlan::new(vec![FeatureSpec::InstructorRating]);
        assert!(matches!(
            plan.validate(&ctx),
            Err(CoursecastError::ConfigError(_))
        ));

        let roster = RatingRoster::new(vec![InstructorRating {
            name: "Jane Smith".to_string(),
            rating: 4.2,
            count: 17,
        }]);
        let ctx = FeatureContext::new().with_roster(&roster);
        assert!(plan.validate(&ctx).is_ok());
    }

    #[test]
    fn test_validate_zero_slot_distributions() {
        let plan = FeaturePlan::new(vec![FeatureSpec::Distributions { slots: 0 }]);
        assert!(plan.validate(&FeatureContext::new()).is_err());
    }

    #[test]
    fn test_standard_plan_shape() {
        let plan = FeaturePlan::standard();
        assert_eq!(plan.total_slots(), 8);
        assert!(plan.validate(&FeatureContext::new()).is_ok());
    }
}
