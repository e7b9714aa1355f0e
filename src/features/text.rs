//! Scalar features over free-text course summaries

/// Sentiment scoring collaborator.
///
/// The library does not bundle a lexicon; callers supply whatever scorer
/// they like (a word-list average, an external service, a constant for
/// ablation runs). Scores are taken as-is into the feature matrix.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> f64;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> f64,
{
    fn score(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Summary length in characters.
pub fn summary_length(text: &str) -> f64 {
    text.chars().count() as f64
}

/// 1.0 when `keyword` occurs in `text`, case-insensitive; 0.0 otherwise.
///
/// `keyword` must already be lowercase (plans normalize keywords at
/// construction).
pub fn keyword_present(text: &str, keyword: &str) -> f64 {
    if text.to_lowercase().contains(keyword) {
        1.0
    } else {
        0.0
    }
}
