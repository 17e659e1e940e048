//! Evaluation score value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Upper bound of the evaluator's scoring scale
pub const MAX_SCORE: f64 = 100.0;

/// A score on the 0–100 scale (Value Object)
///
/// Construction rejects NaN and anything outside the range, so a `Score`
/// can always be persisted without tripping the store's CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if value.is_nan() || !(0.0..=MAX_SCORE).contains(&value) {
            return Err(DomainError::ScoreOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Build a score from an unchecked model output, clamping into range.
    ///
    /// NaN maps to zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, MAX_SCORE))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Total order over scores (valid scores are never NaN)
    pub fn cmp_value(&self, other: &Score) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for Score {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// One named criterion of an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub comment: String,
}

impl MetricScore {
    pub fn new(name: impl Into<String>, score: f64, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score,
            comment: comment.into(),
        }
    }
}

/// Result returned by the evaluator collaborator
///
/// The overall score drives ranking; the metrics are kept as the round's
/// score breakdown and never interpreted by the round controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub overall_score: Score,
    #[serde(default)]
    pub metrics: Vec<MetricScore>,
}

impl EvaluationResult {
    pub fn new(overall_score: Score) -> Self {
        Self {
            overall_score,
            metrics: Vec::new(),
        }
    }

    pub fn with_metric(mut self, metric: MetricScore) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn with_metrics(mut self, metrics: Vec<MetricScore>) -> Self {
        self.metrics = metrics;
        self
    }

    /// The breakdown as the opaque JSON document stored alongside the score
    pub fn score_details(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Metric comments formatted as feedback for the next round's prompt
    pub fn feedback(&self) -> String {
        self.metrics
            .iter()
            .filter(|m| !m.comment.trim().is_empty())
            .map(|m| format!("- {} ({:.0}): {}", m.name, m.score, m.comment.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Token counts reported by the leader collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }

    pub fn add(&mut self, other: TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}
