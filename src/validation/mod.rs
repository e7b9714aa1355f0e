//! Repeated random-holdout cross-validation

use ndarray::{Array1, Array2, Axis};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CoursecastError, Result};
use crate::model::Regressor;

/// Error statistic computed between holdout truth and predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorMetric {
    /// Root mean squared error.
    #[default]
    Rmse,
    /// Mean absolute error.
    Mae,
}

impl ErrorMetric {
    pub fn compute(&self, truth: &Array1<f64>, predictions: &Array1<f64>) -> Result<f64> {
        if truth.len() != predictions.len() {
            return Err(CoursecastError::ShapeError {
                expected: format!("{} predictions", truth.len()),
                actual: format!("{} predictions", predictions.len()),
            });
        }
        if truth.is_empty() {
            return Err(CoursecastError::ValidationError(
                "cannot score an empty holdout".to_string(),
            ));
        }

        let n = truth.len() as f64;
        match self {
            ErrorMetric::Rmse => {
                let mse = truth
                    .iter()
                    .zip(predictions.iter())
                    .map(|(t, p)| (t - p) * (t - p))
                    .sum::<f64>()
                    / n;
                Ok(mse.sqrt())
            }
            ErrorMetric::Mae => Ok(truth
                .iter()
                .zip(predictions.iter())
                .map(|(t, p)| (t - p).abs())
                .sum::<f64>()
                / n),
        }
    }
}

/// Cross-validation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvConfig {
    /// Independent repetitions.
    pub trials: usize,
    /// Per-row probability of landing in the holdout set. The realized
    /// holdout size varies per trial; this is not a fixed-size split.
    pub holdout_fraction: f64,
    /// Error statistic per trial.
    pub metric: ErrorMetric,
    /// RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for CvConfig {
    fn default() -> Self {
        Self {
            trials: 10,
            holdout_fraction: 0.2,
            metric: ErrorMetric::default(),
            seed: None,
        }
    }
}

impl CvConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_holdout_fraction(mut self, fraction: f64) -> Self {
        self.holdout_fraction = fraction;
        self
    }

    pub fn with_metric(mut self, metric: ErrorMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(CoursecastError::ValidationError(
                "trials must be at least 1".to_string(),
            ));
        }
        if !(self.holdout_fraction > 0.0 && self.holdout_fraction < 1.0) {
            return Err(CoursecastError::ValidationError(format!(
                "holdout_fraction must be in (0, 1), got {}",
                self.holdout_fraction
            )));
        }
        Ok(())
    }
}

/// Row-index partition for one trial: disjoint, and together covering
/// every row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldoutSplit {
    pub train: Vec<usize>,
    pub holdout: Vec<usize>,
}

impl HoldoutSplit {
    /// Assign each row independently, holdout with probability
    /// `holdout_fraction`. A draw leaving either side empty is repeated.
    ///
    /// Errs for `n_rows < 2`: no covering disjoint non-empty partition
    /// exists, so the redraw loop could never terminate.
    pub fn draw<R: Rng>(n_rows: usize, holdout_fraction: f64, rng: &mut R) -> Result<Self> {
        if n_rows < 2 {
            return Err(CoursecastError::ValidationError(format!(
                "cannot partition {n_rows} rows into non-empty train and holdout sets"
            )));
        }

        loop {
            let mut train = Vec::new();
            let mut holdout = Vec::new();
            for row in 0..n_rows {
                if rng.gen::<f64>() < holdout_fraction {
                    holdout.push(row);
                } else {
                    train.push(row);
                }
            }
            if !train.is_empty() && !holdout.is_empty() {
                return Ok(Self { train, holdout });
            }
        }
    }
}

/// Per-trial errors and the usual aggregates.
///
/// The original analysis reported only the best (minimum) trial; the full
/// sequence plus mean and std are all here so callers choose the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvReport {
    /// One error per trial, in trial order.
    pub errors: Vec<f64>,
    /// Minimum per-trial error.
    pub best: f64,
    /// Mean per-trial error.
    pub mean: f64,
    /// Population standard deviation of per-trial errors.
    pub std: f64,
    /// Metric the errors were computed with.
    pub metric: ErrorMetric,
}

impl CvReport {
    pub fn from_errors(metric: ErrorMetric, errors: Vec<f64>) -> Self {
        let n = errors.len() as f64;
        let best = errors.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = errors.iter().sum::<f64>() / n;
        let variance = errors.iter().map(|e| (e - mean) * (e - mean)).sum::<f64>() / n;
        Self {
            errors,
            best,
            mean,
            std: variance.sqrt(),
            metric,
        }
    }

    pub fn trials(&self) -> usize {
        self.errors.len()
    }
}

/// Evaluate a model family over repeated random holdout splits.
///
/// Each trial draws a fresh partition and a fresh model from `factory`;
/// nothing carries over between trials. Model fit/predict failures
/// propagate untouched.
pub fn cross_validate<M, F>(
    x: &Array2<f64>,
    y: &Array1<f64>,
    mut factory: F,
    config: &CvConfig,
) -> Result<CvReport>
where
    M: Regressor,
    F: FnMut() -> M,
{
    config.validate()?;
    if x.nrows() != y.len() {
        return Err(CoursecastError::ShapeError {
            expected: format!("{} targets", x.nrows()),
            actual: format!("{} targets", y.len()),
        });
    }
    if x.nrows() < 2 {
        return Err(CoursecastError::ValidationError(
            "cross-validation needs at least 2 rows".to_string(),
        ));
    }

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut errors = Vec::with_capacity(config.trials);
    for _ in 0..config.trials {
        let split = HoldoutSplit::draw(x.nrows(), config.holdout_fraction, &mut rng)?;

        let x_train = x.select(Axis(0), &split.train);
        let y_train = y.select(Axis(0), &split.train);
        let x_holdout = x.select(Axis(0), &split.holdout);
        let y_holdout = y.select(Axis(0), &split.holdout);

        let mut model = factory();
        model.fit(&x_train, &y_train)?;
        let predictions = model.predict(&x_holdout)?;
        errors.push(config.metric.compute(&y_holdout, &predictions)?);
    }

    Ok(CvReport::from_errors(config.metric, errors))
}
