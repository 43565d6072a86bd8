use crate::decision::criteria::CanonicalCriterion;
use crate::decision::table::{Score, NEUTRAL_SCORE};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

static TAGGED_BLOCK: OnceLock<Regex> = OnceLock::new();

// Accepts `CAREER_MATRIX:` and the markdown-bold `**CAREER_MATRIX:**` form.
fn tagged_block() -> &'static Regex {
    TAGGED_BLOCK.get_or_init(|| {
        Regex::new(r"(?is)(?:\*\*)?CAREER_MATRIX:(?:\*\*)?\s*```json\s*(.*?)\s*```")
            .expect("tagged payload pattern must compile")
    })
}

/// Weight the agent attached to a criterion. Carried for display; scoring ignores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeight {
    pub key: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CareerPayload {
    pub(crate) careers: Vec<(String, Vec<Score>)>,
    pub(crate) weights: Vec<CriterionWeight>,
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload has no `careers` object")]
    MissingCareers,
    #[error("payload lists no careers")]
    NoCareers,
    #[error("career '{0}' is not an object of criterion scores")]
    CareerShape(String),
    #[error("career '{career}' has a non-numeric score for '{criterion}'")]
    NonNumericScore { career: String, criterion: String },
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    #[serde(default)]
    careers: Option<Value>,
    #[serde(default)]
    criteria_weights: Option<Map<String, Value>>,
}

/// Finds the structured payload in agent text.
///
/// Only a json fence tagged `CAREER_MATRIX:` counts; untagged fences are illustrative
/// prose. `None` means no structured payload was present.
pub(crate) fn find_payload(text: &str) -> Option<Result<CareerPayload, PayloadError>> {
    tagged_block()
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|body| parse_payload(body.as_str()))
}

pub(crate) fn parse_payload(body: &str) -> Result<CareerPayload, PayloadError> {
    let raw: RawPayload = serde_json::from_str(body)?;
    let careers = match raw.careers {
        Some(Value::Object(careers)) => careers,
        _ => return Err(PayloadError::MissingCareers),
    };
    if careers.is_empty() {
        return Err(PayloadError::NoCareers);
    }

    let mut parsed = Vec::with_capacity(careers.len());
    for (name, scores) in careers {
        let Value::Object(scores) = scores else {
            return Err(PayloadError::CareerShape(name));
        };
        let vector = canonical_vector(&name, &scores)?;
        parsed.push((name, vector));
    }

    let weights = raw
        .criteria_weights
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value.as_f64().map(|weight| CriterionWeight { key, weight }))
        .collect();

    Ok(CareerPayload {
        careers: parsed,
        weights,
    })
}

// Missing or null criteria take the neutral midpoint; unknown keys are ignored.
fn canonical_vector(career: &str, scores: &Map<String, Value>) -> Result<Vec<Score>, PayloadError> {
    CanonicalCriterion::ordered()
        .into_iter()
        .map(|criterion| match scores.get(criterion.key()) {
            None | Some(Value::Null) => Ok(NEUTRAL_SCORE),
            Some(value) => value.as_f64().ok_or_else(|| PayloadError::NonNumericScore {
                career: career.to_string(),
                criterion: criterion.key().to_string(),
            }),
        })
        .collect()
}
