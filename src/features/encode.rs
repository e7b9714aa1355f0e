//! Fitted feature sets and feature-matrix assembly

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::data::{CourseRecord, Field};
use crate::error::{CoursecastError, Result};
use crate::features::category::CategoryTable;
use crate::features::plan::{FeatureContext, FeaturePlan, FeatureSpec};
use crate::features::text::{keyword_present, summary_length};
use crate::features::time::ClockTime;

/// A [`FeaturePlan`] plus the category tables fitted for it.
///
/// The fit-once / apply-many pair: [`FeatureSet::fit`] builds every lookup
/// table over the full retained record set, [`FeatureSet::encode`] and
/// [`FeatureSet::build_matrix`] apply them. Tables are only valid for the
/// record set they were fitted on; encoding other records can surface
/// [`CoursecastError::UnknownCategory`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSet {
    plan: FeaturePlan,
    departments: Option<CategoryTable<String>>,
    distributions: Option<CategoryTable<String>>,
    start_times: Option<CategoryTable<ClockTime>>,
    instructors: Option<CategoryTable<String>>,
    titles: Option<CategoryTable<String>>,
}

fn missing(field: Field) -> CoursecastError {
    CoursecastError::MissingField {
        field: field.name().to_string(),
    }
}

fn fitted<'t, K: Ord>(
    table: &'t Option<CategoryTable<K>>,
    label: &str,
) -> Result<&'t CategoryTable<K>> {
    table
        .as_ref()
        .ok_or_else(|| CoursecastError::ConfigError(format!("no fitted table for {label}")))
}

impl FeatureSet {
    /// Build every category table the plan needs over `records`.
    ///
    /// `records` must already be filtered to the retained set; unparseable
    /// clock times simply contribute no bucket here and error later at
    /// encode time.
    pub fn fit(
        plan: FeaturePlan,
        records: &[CourseRecord],
        ctx: &FeatureContext<'_>,
    ) -> Result<Self> {
        plan.validate(ctx)?;

        let mut departments = None;
        let mut distributions = None;
        let mut start_times = None;
        let mut instructors = None;
        let mut titles = None;

        for spec in plan.specs() {
            match spec {
                FeatureSpec::Department if departments.is_none() => {
                    departments = Some(CategoryTable::fit("department", records, |r| {
                        r.department.clone()
                    }));
                }
                FeatureSpec::Distributions { .. } if distributions.is_none() => {
                    distributions = Some(CategoryTable::fit_multi(
                        "distribution requirement",
                        records,
                        |r| r.requirements_met.iter().flatten().cloned(),
                    ));
                }
                FeatureSpec::StartTime if start_times.is_none() => {
                    start_times = Some(CategoryTable::fit_multi("start time", records, |r| {
                        ClockTime::parse(&r.start_time).ok()
                    }));
                }
                FeatureSpec::Instructor if instructors.is_none() => {
                    instructors = Some(CategoryTable::fit("instructor", records, |r| {
                        r.instructor.clone()
                    }));
                }
                FeatureSpec::Title if titles.is_none() => {
                    titles = Some(CategoryTable::fit("title", records, |r| r.title.clone()));
                }
                _ => {}
            }
        }

        Ok(Self {
            plan,
            departments,
            distributions,
            start_times,
            instructors,
            titles,
        })
    }

    pub fn plan(&self) -> &FeaturePlan {
        &self.plan
    }

    /// Matrix width the fitted plan produces.
    pub fn width(&self) -> usize {
        self.plan.total_slots()
    }

    /// Encode one record into its feature row.
    ///
    /// Records outside the fitted set surface `UnknownCategory` or
    /// `MissingField` errors rather than panicking.
    pub fn encode(&self, record: &CourseRecord, ctx: &FeatureContext<'_>) -> Result<Vec<f64>> {
        let mut row = Vec::with_capacity(self.width());

        for spec in self.plan.specs() {
            for field in spec.required_fields() {
                if field != Field::InstructorRating && !record.has_field(field) {
                    return Err(missing(field));
                }
            }

            match spec {
                FeatureSpec::Department => {
                    let table = fitted(&self.departments, "department")?;
                    row.push(table.code(&record.department)? as f64);
                }
                FeatureSpec::Distributions { slots } => {
                    let table = fitted(&self.distributions, "distribution requirement")?;
                    let requirements = record
                        .requirements_met
                        .as_deref()
                        .ok_or_else(|| missing(Field::Requirements))?;
                    for value in requirements.iter().take(*slots) {
                        row.push(table.code(value)? as f64);
                    }
                    for _ in requirements.len().min(*slots)..*slots {
                        row.push(0.0);
                    }
                }
                FeatureSpec::StartTime => {
                    let table = fitted(&self.start_times, "start time")?;
                    let start = ClockTime::parse(&record.start_time)?;
                    row.push(table.code(&start)? as f64);
                }
                FeatureSpec::Duration => {
                    let start = ClockTime::parse(&record.start_time)?;
                    let end = ClockTime::parse(&record.end_time)?;
                    let hours = end.fractional_hours() - start.fractional_hours();
                    if hours <= 0.0 {
                        return Err(CoursecastError::DataError(format!(
                            "nonpositive section duration: {} to {}",
                            start, end
                        )));
                    }
                    row.push(hours);
                }
                FeatureSpec::Instructor => {
                    let table = fitted(&self.instructors, "instructor")?;
                    row.push(table.code(&record.instructor)? as f64);
                }
                FeatureSpec::Title => {
                    let table = fitted(&self.titles, "title")?;
                    row.push(table.code(&record.title)? as f64);
                }
                FeatureSpec::SummaryLength => {
                    row.push(summary_length(&record.summary));
                }
                FeatureSpec::SummarySentiment => {
                    let scorer = ctx.sentiment.ok_or_else(|| {
                        CoursecastError::ConfigError(
                            "summary sentiment feature needs a sentiment scorer".to_string(),
                        )
                    })?;
                    row.push(scorer.score(&record.summary));
                }
                FeatureSpec::Keyword(word) => {
                    row.push(keyword_present(&record.summary, word));
                }
                FeatureSpec::InstructorRating => {
                    let roster = ctx.roster.ok_or_else(|| {
                        CoursecastError::ConfigError(
                            "instructor rating feature needs a rating roster".to_string(),
                        )
                    })?;
                    let rating = roster
                        .rating_for(&record.instructor)
                        .ok_or_else(|| missing(Field::InstructorRating))?;
                    row.push(rating.rating);
                }
            }
        }

        Ok(row)
    }

    /// Assemble the feature matrix: one row per record in order, one column
    /// per declared slot.
    pub fn build_matrix(
        &self,
        records: &[CourseRecord],
        ctx: &FeatureContext<'_>,
    ) -> Result<Array2<f64>> {
        let width = self.width();
        let mut flat = Vec::with_capacity(records.len() * width);
        for record in records {
            flat.extend(self.encode(record, ctx)?);
        }
        Ok(Array2::from_shape_vec((records.len(), width), flat)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(department: &str, requirements: &[&str], start: &str, end: &str) -> CourseRecord {
        CourseRecord {
            term: "15WI".to_string(),
            title: format!("{department} Seminar"),
            department: department.to_string(),
            instructor: "Jane Q. Smith".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            requirements_met: Some(requirements.iter().map(|s| s.to_string()).collect()),
            credits: "6.00".to_string(),
            registered: Some(20),
            capacity: Some(30),
            summary: "A seminar with substantial writing.".to_string(),
        }
    }

    fn sample_records() -> Vec<CourseRecord> {
        vec![
            record("CS", &["FSR"], "8:30am", "9:40am"),
            record("ENGL", &["LA", "WR"], "9:50am", "11:00am"),
            record("PHYS", &[], "8:30am", "10:30am"),
        ]
    }

    #[test]
    fn test_matrix_shape_matches_plan() {
        let plan = FeaturePlan::new(vec![
            FeatureSpec::Department,
            FeatureSpec::Distributions { slots: 3 },
            FeatureSpec::StartTime,
            FeatureSpec::Duration,
        ]);
        let records = sample_records();
        let ctx = FeatureContext::new();
        let set = FeatureSet::fit(plan, &records, &ctx).unwrap();

        let matrix = set.build_matrix(&records, &ctx).unwrap();
        assert_eq!(matrix.nrows(), 3);
        assert_eq!(matrix.ncols(), 6);
    }

    #[test]
    fn test_department_codes_in_sorted_order() {
        let plan = FeaturePlan::new(vec![FeatureSpec::Department]);
        let records = sample_records();
        let ctx = FeatureContext::new();
        let set = FeatureSet::fit(plan, &records, &ctx).unwrap();

        let matrix = set.build_matrix(&records, &ctx).unwrap();
        // Sorted distinct departments: CS=0, ENGL=1, PHYS=2.
        assert_eq!(matrix[[0, 0]], 0.0);
        assert_eq!(matrix[[1, 0]], 1.0);
        assert_eq!(matrix[[2, 0]], 2.0);
    }

    #[test]
    fn test_distribution_slots_fill_left_to_right() {
        let plan = FeaturePlan::new(vec![FeatureSpec::Distributions { slots: 3 }]);
        let records = sample_records();
        let ctx = FeatureContext::new();
        let set = FeatureSet::fit(plan, &records, &ctx).unwrap();

        // Sorted distinct requirements: FSR=0, LA=1, WR=2.
        let row = set.encode(&records[1], &ctx).unwrap();
        assert_eq!(row, vec![1.0, 2.0, 0.0]);

        // No requirements at all leaves every slot zero.
        let row = set.encode(&records[2], &ctx).unwrap();
        assert_eq!(row, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_duration_in_fractional_hours() {
        let plan = FeaturePlan::new(vec![FeatureSpec::Duration]);
        let records = sample_records();
        let ctx = FeatureContext::new();
        let set = FeatureSet::fit(plan, &records, &ctx).unwrap();

        let row = set.encode(&records[0], &ctx).unwrap();
        assert!((row[0] - 70.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_nonpositive_duration_is_a_data_error() {
        let plan = FeaturePlan::new(vec![FeatureSpec::Duration]);
        let records = sample_records();
        let ctx = FeatureContext::new();
        let set = FeatureSet::fit(plan, &records, &ctx).unwrap();

        let backwards = record("CS", &[], "10:00am", "9:00am");
        assert!(matches!(
            set.encode(&backwards, &ctx),
            Err(CoursecastError::DataError(_))
        ));
    }

    #[test]
    fn test_unseen_department_errors() {
        let plan = FeaturePlan::new(vec![FeatureSpec::Department]);
        let records = sample_records();
        let ctx = FeatureContext::new();
        let set = FeatureSet::fit(plan, &records, &ctx).unwrap();

        let outsider = record("GEOL", &[], "8:30am", "9:40am");
        assert!(matches!(
            set.encode(&outsider, &ctx),
            Err(CoursecastError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_missing_field_surfaces_as_error() {
        let plan = FeaturePlan::new(vec![FeatureSpec::SummaryLength]);
        let records = sample_records();
        let ctx = FeatureContext::new();
        let set = FeatureSet::fit(plan, &records, &ctx).unwrap();

        let mut bare = records[0].clone();
        bare.summary = crate::data::NOT_AVAILABLE.to_string();
        assert!(matches!(
            set.encode(&bare, &ctx),
            Err(CoursecastError::MissingField { .. })
        ));
    }

    #[test]
    fn test_keyword_and_length_columns() {
        let plan = FeaturePlan::new(vec![
            FeatureSpec::SummaryLength,
            FeatureSpec::keyword("Writing"),
        ]);
        let records = sample_records();
        let ctx = FeatureContext::new();
        let set = FeatureSet::fit(plan, &records, &ctx).unwrap();

        let row = set.encode(&records[0], &ctx).unwrap();
        assert_eq!(row[0], records[0].summary.chars().count() as f64);
        assert_eq!(row[1], 1.0);
    }

    #[test]
    fn test_sentiment_column_uses_scorer() {
        let plan = FeaturePlan::new(vec![FeatureSpec::SummarySentiment]);
        let records = sample_records();
        let scorer = |_: &str| 0.25;
        let ctx = FeatureContext::new().with_sentiment(&scorer);
        let set = FeatureSet::fit(plan, &records, &ctx).unwrap();

        let matrix = set.build_matrix(&records, &ctx).unwrap();
        assert!(matrix.iter().all(|&v| v == 0.25));
    }
}
