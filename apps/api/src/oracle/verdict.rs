//! Reply parsing for the screening oracle.
//!
//! The prompts ask for a JSON object. Replies that are not valid JSON fall
//! back to the free-text rules the screening flow has always honoured:
//! a reply is fake iff it contains `Fake: yes` (any case for `yes`), and the
//! score is the first number following the word "score".

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::extraction::strip_nul;
use crate::llm_client::strip_json_fences;

static FAKE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"Fake: ((?i:yes))").unwrap());

static SCORE_STRICT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)score\s*(?:of)?\s*[:=\-]?\s*(\d+(?:\.\d+)?)").unwrap());

static SCORE_LOOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)score.*?(\d+(?:\.\d+)?)").unwrap());

/// Outcome of the authenticity check.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticityVerdict {
    pub is_fake: bool,
    /// Human-readable verdict returned to the caller. Always contains
    /// `Fake: Yes` when `is_fake` is set.
    pub summary: String,
}

/// Outcome of fit scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct FitVerdict {
    /// Out of 10. `None` when the reply carried no usable number.
    pub score: Option<f64>,
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
struct StructuredAuthenticity {
    fake: Value,
    #[serde(default)]
    reason: String,
}

#[derive(Debug, Deserialize)]
struct StructuredFit {
    #[serde(default)]
    score: Value,
    #[serde(default)]
    explanation: String,
}

impl AuthenticityVerdict {
    pub fn from_reply(reply: &str) -> Self {
        let reply = &strip_nul(reply);
        let structured = serde_json::from_str::<StructuredAuthenticity>(strip_json_fences(reply))
            .ok()
            .and_then(|s| parse_flag(&s.fake).map(|fake| (fake, s.reason)));

        match structured {
            Some((is_fake, reason)) => Self {
                is_fake,
                summary: format!(
                    "Fake: {}\nReason: {}",
                    if is_fake { "Yes" } else { "No" },
                    // Only the leading line may carry the marker.
                    FAKE_MARKER.replace_all(reason.trim(), "Fake - $1")
                ),
            },
            None => Self {
                is_fake: FAKE_MARKER.is_match(reply),
                summary: reply.trim().to_string(),
            },
        }
    }
}

impl FitVerdict {
    pub fn from_reply(reply: &str) -> Self {
        let reply = &strip_nul(reply);
        if let Ok(structured) = serde_json::from_str::<StructuredFit>(strip_json_fences(reply)) {
            let explanation = if structured.explanation.trim().is_empty() {
                reply.trim().to_string()
            } else {
                structured.explanation.trim().to_string()
            };
            return Self {
                score: parse_score_value(&structured.score),
                explanation,
            };
        }

        let score = SCORE_STRICT
            .captures(reply)
            .or_else(|| SCORE_LOOSE.captures(reply))
            .and_then(|caps| caps[1].parse::<f64>().ok())
            .and_then(valid_score);

        Self {
            score,
            explanation: reply.trim().to_string(),
        }
    }
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "yes" | "true" => Some(true),
            "no" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn parse_score_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .and_then(valid_score)
}

/// Scores are non-negative finite decimals; anything else counts as absent.
fn valid_score(score: f64) -> Option<f64> {
    (score.is_finite() && score >= 0.0).then_some(score)
}
