//! K-nearest-neighbors regression

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{CoursecastError, Result};
use crate::model::Regressor;

/// Distance metric between feature rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// L2.
    #[default]
    Euclidean,
    /// L1.
    Manhattan,
}

/// How neighbor targets are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeightScheme {
    /// Plain mean of the k neighbor targets.
    #[default]
    Uniform,
    /// Inverse-distance weighted mean.
    Distance,
}

/// K-nearest-neighbors regressor; fit stores the training data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnRegressor {
    k: usize,
    metric: DistanceMetric,
    weights: WeightScheme,
    x_train: Option<Array2<f64>>,
    y_train: Option<Array1<f64>>,
}

impl KnnRegressor {
    pub fn new(k: usize) -> Self {
        Self {
            k: k.max(1),
            metric: DistanceMetric::default(),
            weights: WeightScheme::default(),
            x_train: None,
            y_train: None,
        }
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_weights(mut self, weights: WeightScheme) -> Self {
        self.weights = weights;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

impl Regressor for KnnRegressor {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(CoursecastError::ShapeError {
                expected: format!("{} targets", x.nrows()),
                actual: format!("{} targets", y.len()),
            });
        }
        if x.nrows() == 0 {
            return Err(CoursecastError::ValidationError(
                "cannot fit on an empty training set".to_string(),
            ));
        }
        self.x_train = Some(x.clone());
        self.y_train = Some(y.clone());
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let (x_train, y_train) = match (&self.x_train, &self.y_train) {
            (Some(x_train), Some(y_train)) => (x_train, y_train),
            _ => return Err(CoursecastError::ModelNotFitted),
        };
        if x.ncols() != x_train.ncols() {
            return Err(CoursecastError::ShapeError {
                expected: format!("{} columns", x_train.ncols()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let mut predictions = Vec::with_capacity(x.nrows());
        for row in x.rows() {
            let neighbors = k_nearest(row.as_slice().unwrap_or(&[]), x_train, y_train, self.k, self.metric);
            predictions.push(combine(&neighbors, self.weights));
        }
        Ok(Array1::from_vec(predictions))
    }
}

/// Max-heap entry keeping the k smallest distances.
#[derive(PartialEq)]
struct Neighbor {
    distance: f64,
    target: f64,
}

impl Eq for Neighbor {}
impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.distance.partial_cmp(&other.distance)
    }
}
impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

/// Partial sort via max-heap, O(n log k).
fn k_nearest(
    point: &[f64],
    x_train: &Array2<f64>,
    y_train: &Array1<f64>,
    k: usize,
    metric: DistanceMetric,
) -> Vec<Neighbor> {
    let mut heap = BinaryHeap::with_capacity(k + 1);

    for (i, row) in x_train.rows().into_iter().enumerate() {
        let dist = distance(point, row.as_slice().unwrap_or(&[]), metric);
        if heap.len() < k {
            heap.push(Neighbor {
                distance: dist,
                target: y_train[i],
            });
        } else if let Some(worst) = heap.peek() {
            if dist < worst.distance {
                heap.pop();
                heap.push(Neighbor {
                    distance: dist,
                    target: y_train[i],
                });
            }
        }
    }

    heap.into_vec()
}

fn distance(a: &[f64], b: &[f64], metric: DistanceMetric) -> f64 {
    match metric {
        DistanceMetric::Euclidean => a
            .iter()
            .zip(b.iter())
            .map(|(ai, bi)| {
                let d = ai - bi;
                d * d
            })
            .sum::<f64>()
            .sqrt(),
        DistanceMetric::Manhattan => a
            .iter()
            .zip(b.iter())
            .map(|(ai, bi)| (ai - bi).abs())
            .sum(),
    }
}

fn combine(neighbors: &[Neighbor], weights: WeightScheme) -> f64 {
    if neighbors.is_empty() {
        return 0.0;
    }
    match weights {
        WeightScheme::Uniform => {
            neighbors.iter().map(|n| n.target).sum::<f64>() / neighbors.len() as f64
        }
        WeightScheme::Distance => {
            let mut weighted = 0.0;
            let mut total = 0.0;
            for n in neighbors {
                let w = 1.0 / (n.distance + 1e-8);
                weighted += w * n.target;
                total += w;
            }
            weighted / total
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn clustered_data() -> (Array2<f64>, Array1<f64>) {
        // Two tight clusters with distinct targets.
        let x = array![
            [0.0, 0.0],
            [0.1, 0.0],
            [0.0, 0.1],
            [5.0, 5.0],
            [5.1, 5.0],
            [5.0, 5.1],
        ];
        let y = array![1.0, 1.0, 1.0, 3.0, 3.0, 3.0];
        (x, y)
    }

    #[test]
    fn test_predicts_cluster_targets() {
        let (x, y) = clustered_data();
        let mut model = KnnRegressor::new(3);
        model.fit(&x, &y).unwrap();

        let preds = model.predict(&array![[0.05, 0.05], [5.05, 5.05]]).unwrap();
        assert!((preds[0] - 1.0).abs() < 1e-12);
        assert!((preds[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_k_larger_than_training_set_uses_all_rows() {
        let (x, y) = clustered_data();
        let mut model = KnnRegressor::new(50);
        model.fit(&x, &y).unwrap();

        let preds = model.predict(&array![[0.0, 0.0]]).unwrap();
        assert!((preds[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_weighting_favors_close_neighbors() {
        let x = array![[0.0], [1.0]];
        let y = array![0.0, 10.0];
        let mut model = KnnRegressor::new(2).with_weights(WeightScheme::Distance);
        model.fit(&x, &y).unwrap();

        let preds = model.predict(&array![[0.1]]).unwrap();
        assert!(preds[0] < 5.0, "prediction {} should lean to target 0", preds[0]);
    }

    #[test]
    fn test_manhattan_metric() {
        let (x, y) = clustered_data();
        let mut model = KnnRegressor::new(3).with_metric(DistanceMetric::Manhattan);
        model.fit(&x, &y).unwrap();
        let preds = model.predict(&array![[5.0, 5.0]]).unwrap();
        assert!((preds[0] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unfitted_predict_errors() {
        let model = KnnRegressor::new(3);
        assert!(matches!(
            model.predict(&array![[1.0]]),
            Err(CoursecastError::ModelNotFitted)
        ));
    }

    #[test]
    fn test_column_mismatch_rejected() {
        let (x, y) = clustered_data();
        let mut model = KnnRegressor::new(3);
        model.fit(&x, &y).unwrap();
        assert!(matches!(
            model.predict(&array![[1.0]]),
            Err(CoursecastError::ShapeError { .. })
        ));
    }
}
