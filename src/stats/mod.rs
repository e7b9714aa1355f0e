//! Grouped descriptive statistics over fill-ratio targets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{CourseRecord, Dataset};

/// Average target and record count for one group key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStat {
    pub key: String,
    pub mean: f64,
    pub count: usize,
}

/// Mean fill ratio per group, descending mean (the report ordering), ties
/// broken by key for determinism. Records for which `key` returns `None`
/// are skipped.
pub fn mean_by_group<F>(dataset: &Dataset, key: F) -> Vec<GroupStat>
where
    F: Fn(&CourseRecord) -> Option<String>,
{
    mean_by_groups(dataset, |record| key(record))
}

/// Like [`mean_by_group`], but one record may contribute to several groups
/// (e.g. every distribution requirement it satisfies).
pub fn mean_by_groups<F, I>(dataset: &Dataset, keys: F) -> Vec<GroupStat>
where
    F: Fn(&CourseRecord) -> I,
    I: IntoIterator<Item = String>,
{
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for (record, &target) in dataset.records().iter().zip(dataset.targets()) {
        for key in keys(record) {
            let entry = sums.entry(key).or_insert((0.0, 0));
            entry.0 += target;
            entry.1 += 1;
        }
    }

    let mut stats: Vec<GroupStat> = sums
        .into_iter()
        .map(|(key, (sum, count))| GroupStat {
            key,
            mean: sum / count as f64,
            count,
        })
        .collect();

    stats.sort_by(|a, b| {
        b.mean
            .partial_cmp(&a.mean)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(department: &str, requirements: &[&str], registered: u32, capacity: u32) -> CourseRecord {
        CourseRecord {
            term: "15WI".to_string(),
            title: format!("{department} Course"),
            department: department.to_string(),
            instructor: "Jane Q. Smith".to_string(),
            start_time: "8:30am".to_string(),
            end_time: "9:40am".to_string(),
            requirements_met: Some(requirements.iter().map(|s| s.to_string()).collect()),
            credits: "6.00".to_string(),
            registered: Some(registered),
            capacity: Some(capacity),
            summary: "A course.".to_string(),
        }
    }

    fn dataset() -> Dataset {
        let records = vec![
            record("CS", &["FSR"], 30, 30),
            record("CS", &["FSR"], 15, 30),
            record("ENGL", &["LA", "WR"], 24, 30),
        ];
        let targets: Vec<f64> = records.iter().map(|r| r.fill_ratio().unwrap()).collect();
        Dataset::new(records, targets).unwrap()
    }

    #[test]
    fn test_mean_by_department_sorted_descending() {
        let stats = mean_by_group(&dataset(), |r| Some(r.department.clone()));
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].key, "ENGL");
        assert!((stats[0].mean - 0.8).abs() < 1e-12);
        assert_eq!(stats[1].key, "CS");
        assert!((stats[1].mean - 0.75).abs() < 1e-12);
        assert_eq!(stats[1].count, 2);
    }

    #[test]
    fn test_none_keys_are_skipped() {
        let stats = mean_by_group(&dataset(), |r| {
            (r.department == "CS").then(|| r.department.clone())
        });
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].key, "CS");
    }

    #[test]
    fn test_multi_valued_keys_count_per_group() {
        let stats = mean_by_groups(&dataset(), |r| {
            r.requirements_met.clone().unwrap_or_default()
        });
        let keys: Vec<&str> = stats.iter().map(|s| s.key.as_str()).collect();
        assert!(keys.contains(&"FSR"));
        assert!(keys.contains(&"LA"));
        assert!(keys.contains(&"WR"));

        let la = stats.iter().find(|s| s.key == "LA").unwrap();
        assert_eq!(la.count, 1);
        assert!((la.mean - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_equal_means_tie_break_on_key() {
        let records = vec![record("B", &[], 10, 20), record("A", &[], 10, 20)];
        let targets: Vec<f64> = records.iter().map(|r| r.fill_ratio().unwrap()).collect();
        let ds = Dataset::new(records, targets).unwrap();

        let stats = mean_by_group(&ds, |r| Some(r.department.clone()));
        assert_eq!(stats[0].key, "A");
        assert_eq!(stats[1].key, "B");
    }
}
