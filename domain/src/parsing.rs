//! Response parsing for evaluator and judge replies.
//!
//! Model replies are free-form text that should contain one JSON object,
//! sometimes wrapped in a markdown fence or surrounded by commentary. These
//! functions locate that object and turn it into validated domain types.
//! They are pure domain logic: no I/O, no sessions.
//!
//! A reply that cannot be parsed is an error, never a neutral default.

use crate::round::judgment::ImprovementJudgment;
use crate::round::score::{EvaluationResult, MetricScore, Score};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("No JSON object found in response")]
    NoJson,

    #[error("Malformed JSON: {0}")]
    Malformed(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Slice from the first `{` to the last `}`
fn extract_json_object(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

#[derive(Deserialize)]
struct RawMetric {
    name: String,
    score: f64,
    #[serde(default)]
    comment: String,
}

#[derive(Deserialize)]
struct RawEvaluation {
    #[serde(alias = "score")]
    overall_score: f64,
    #[serde(default)]
    metrics: Vec<RawMetric>,
}

/// Parse an evaluator reply.
///
/// # Example
///
/// ```
/// use arena_domain::parsing::parse_evaluation;
///
/// let reply = r#"Here you go:
/// {"overall_score": 81, "metrics": [{"name": "clarity", "score": 90, "comment": "crisp"}]}"#;
/// let evaluation = parse_evaluation(reply).unwrap();
/// assert_eq!(evaluation.overall_score.value(), 81.0);
/// assert_eq!(evaluation.metrics.len(), 1);
/// ```
pub fn parse_evaluation(response: &str) -> Result<EvaluationResult, ParseError> {
    let json = extract_json_object(response).ok_or(ParseError::NoJson)?;
    let raw: RawEvaluation =
        serde_json::from_str(json).map_err(|e| ParseError::Malformed(e.to_string()))?;

    let overall = Score::new(raw.overall_score)
        .map_err(|e| ParseError::InvalidValue(e.to_string()))?;

    // Per-metric scores are informational; clamp instead of rejecting.
    let metrics = raw
        .metrics
        .into_iter()
        .map(|m| MetricScore::new(m.name, Score::clamped(m.score).value(), m.comment))
        .collect();

    Ok(EvaluationResult::new(overall).with_metrics(metrics))
}

#[derive(Deserialize)]
struct RawJudgment {
    should_continue: bool,
    #[serde(default)]
    reasoning: String,
    #[serde(default = "default_confidence")]
    confidence: f64,
}

fn default_confidence() -> f64 {
    0.5
}

/// Parse a judge reply.
///
/// A missing `confidence` defaults to 0.5; a present but out-of-range one is
/// rejected.
///
/// # Example
///
/// ```
/// use arena_domain::parsing::parse_judgment;
///
/// let judgment = parse_judgment(
///     r#"```json
/// {"should_continue": false, "reasoning": "plateaued", "confidence": 0.9}
/// ```"#,
/// )
/// .unwrap();
/// assert!(!judgment.should_continue());
/// ```
pub fn parse_judgment(response: &str) -> Result<ImprovementJudgment, ParseError> {
    let json = extract_json_object(response).ok_or(ParseError::NoJson)?;
    let raw: RawJudgment =
        serde_json::from_str(json).map_err(|e| ParseError::Malformed(e.to_string()))?;

    ImprovementJudgment::new(raw.should_continue, raw.reasoning, raw.confidence)
        .map_err(|e| ParseError::InvalidValue(e.to_string()))
}
