//! Categorical encoding: value -> dense integer code lookup tables

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::{CoursecastError, Result};

/// A fitted value -> code lookup for one categorical feature.
///
/// Codes are assigned by enumerating the sorted set of distinct values
/// observed at fit time, so they are dense in `[0, N)` and deterministic
/// for a given record set. A table is only valid for the record set that
/// produced it; encoding against a different set must refit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTable<K: Ord> {
    feature: String,
    codes: BTreeMap<K, usize>,
}

impl<K: Ord + Clone + Display> CategoryTable<K> {
    /// Fit a table over one extracted value per record.
    pub fn fit<'r, R, F>(feature: &str, records: &'r [R], extract: F) -> Self
    where
        F: Fn(&'r R) -> K,
    {
        Self::fit_multi(feature, records, |record| Some(extract(record)))
    }

    /// Fit a table over zero or more extracted values per record
    /// (multi-valued features such as distribution requirements). The
    /// extractor may return an iterator borrowing from the record.
    pub fn fit_multi<'r, R, F, I>(feature: &str, records: &'r [R], extract: F) -> Self
    where
        F: Fn(&'r R) -> I,
        I: IntoIterator<Item = K>,
    {
        let mut distinct = BTreeSet::new();
        for record in records {
            distinct.extend(extract(record));
        }

        let codes = distinct
            .into_iter()
            .enumerate()
            .map(|(code, value)| (value, code))
            .collect();

        Self {
            feature: feature.to_string(),
            codes,
        }
    }

    /// Look up the code for `value`.
    ///
    /// Errs with [`CoursecastError::UnknownCategory`] when `value` was not
    /// observed at fit time. In-sample encoding never hits this; it marks
    /// an attempt to encode records outside the fitted set.
    pub fn code(&self, value: &K) -> Result<usize> {
        self.codes
            .get(value)
            .copied()
            .ok_or_else(|| CoursecastError::UnknownCategory {
                feature: self.feature.clone(),
                value: value.to_string(),
            })
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Feature name the table was fitted for.
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Distinct categories in code order.
    pub fn categories(&self) -> impl Iterator<Item = &K> {
        self.codes.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_contiguous_and_sorted() {
        let values = vec!["PHYS", "CS", "MUSC", "CS", "ARTH"];
        let table = CategoryTable::fit("department", &values, |v| v.to_string());

        assert_eq!(table.len(), 4);
        assert_eq!(table.code(&"ARTH".to_string()).unwrap(), 0);
        assert_eq!(table.code(&"CS".to_string()).unwrap(), 1);
        assert_eq!(table.code(&"MUSC".to_string()).unwrap(), 2);
        assert_eq!(table.code(&"PHYS".to_string()).unwrap(), 3);
    }

    #[test]
    fn test_fit_round_trip_never_errors() {
        let values = vec!["b", "a", "c", "a", "b"];
        let table = CategoryTable::fit("letter", &values, |v| v.to_string());

        for value in &values {
            let code = table.code(&value.to_string()).unwrap();
            assert!(code < table.len());
        }
    }

    #[test]
    fn test_unseen_value_is_an_error() {
        let values = vec!["a", "b"];
        let table = CategoryTable::fit("letter", &values, |v| v.to_string());

        let err = table.code(&"z".to_string()).unwrap_err();
        assert!(matches!(
            err,
            CoursecastError::UnknownCategory { ref feature, ref value }
                if feature == "letter" && value == "z"
        ));
    }

    #[test]
    fn test_fit_multi_flattens_per_record_sets() {
        let records = vec![vec!["HI", "IS"], vec![], vec!["LA", "HI"]];
        let table = CategoryTable::fit_multi("requirement", &records, |r| {
            r.iter().map(|s| s.to_string())
        });

        assert_eq!(table.len(), 3);
        assert_eq!(table.code(&"HI".to_string()).unwrap(), 0);
        assert_eq!(table.code(&"IS".to_string()).unwrap(), 1);
        assert_eq!(table.code(&"LA".to_string()).unwrap(), 2);
    }

    #[test]
    fn test_determinism_across_input_orderings() {
        let forward = vec!["x", "y", "z"];
        let backward = vec!["z", "y", "x"];
        let a = CategoryTable::fit("letter", &forward, |v| v.to_string());
        let b = CategoryTable::fit("letter", &backward, |v| v.to_string());

        for value in &forward {
            assert_eq!(
                a.code(&value.to_string()).unwrap(),
                b.code(&value.to_string()).unwrap()
            );
        }
    }

    #[test]
    fn test_empty_record_set() {
        let values: Vec<&str> = vec![];
        let table = CategoryTable::fit("letter", &values, |v| v.to_string());
        assert!(table.is_empty());
        assert!(table.code(&"a".to_string()).is_err());
    }
}
