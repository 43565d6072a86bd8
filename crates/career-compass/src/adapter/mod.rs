//! Boundary between free-form agent text and the typed payoff table.
//!
//! Nothing past this module sees untyped data. Every failure here degrades to an
//! [`Extraction::NoUsableData`] value; callers decide whether to ask the user for more.

mod defaults;
mod keywords;
mod normalizer;
mod payload;

pub use payload::{CriterionWeight, PayloadError};

use crate::decision::criteria::Criteria;
use crate::decision::table::{CareerOption, PayoffTable, TableError};
use serde::Serialize;
use tracing::{debug, warn};

/// Most options the keyword scan will put in one table.
pub const MAX_DISCOVERED_OPTIONS: usize = 6;
/// Fewer distinct keyword matches than this are not worth comparing.
pub const MIN_DISCOVERED_OPTIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    StructuredPayload,
    KeywordScan,
}

impl ExtractionSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::StructuredPayload => "Structured payload",
            Self::KeywordScan => "Keyword scan",
        }
    }
}

/// Why no candidate table could be produced. None of these are hard failures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NoDataReason {
    /// No payload and no recognizable role names.
    NothingFound,
    /// A payload was present but unusable, and the keyword scan found nothing either.
    MalformedPayload { error: String },
    /// Too few distinct roles to compare.
    InsufficientSignal { discovered: Vec<String> },
}

impl NoDataReason {
    pub fn summary(&self) -> String {
        match self {
            NoDataReason::NothingFound => "no career options found in the response".to_string(),
            NoDataReason::MalformedPayload { error } => {
                format!("structured career data could not be read ({error})")
            }
            NoDataReason::InsufficientSignal { discovered } => format!(
                "only {} career option(s) found ({}); at least {} are needed to compare",
                discovered.len(),
                discovered.join(", "),
                MIN_DISCOVERED_OPTIONS
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Table {
        table: PayoffTable,
        source: ExtractionSource,
        weights: Vec<CriterionWeight>,
    },
    NoUsableData(NoDataReason),
}

impl Extraction {
    pub fn table(&self) -> Option<&PayoffTable> {
        match self {
            Extraction::Table { table, .. } => Some(table),
            Extraction::NoUsableData(_) => None,
        }
    }

    pub fn into_table(self) -> Option<PayoffTable> {
        match self {
            Extraction::Table { table, .. } => Some(table),
            Extraction::NoUsableData(_) => None,
        }
    }

    pub fn source(&self) -> Option<ExtractionSource> {
        match self {
            Extraction::Table { source, .. } => Some(*source),
            Extraction::NoUsableData(_) => None,
        }
    }
}

/// Converts agent text into a candidate payoff table over the canonical eight criteria.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseAdapter;

impl ResponseAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> Extraction {
        let mut payload_error = None;

        match payload::find_payload(text) {
            Some(Ok(payload)) => match structured_table(payload.careers) {
                Ok(table) => {
                    debug!(options = table.len(), "structured career payload parsed");
                    return Extraction::Table {
                        table,
                        source: ExtractionSource::StructuredPayload,
                        weights: payload.weights,
                    };
                }
                Err(err) => {
                    warn!(error = %err, "structured career payload rejected");
                    payload_error = Some(err.to_string());
                }
            },
            Some(Err(err)) => {
                warn!(error = %err, "structured career payload is malformed; scanning text");
                payload_error = Some(err.to_string());
            }
            None => {}
        }

        match self.scan_keywords(text) {
            Extraction::NoUsableData(NoDataReason::NothingFound) => {
                let reason = match payload_error {
                    Some(error) => NoDataReason::MalformedPayload { error },
                    None => NoDataReason::NothingFound,
                };
                debug!(reason = %reason.summary(), "no usable career data");
                Extraction::NoUsableData(reason)
            }
            extraction => extraction,
        }
    }

    /// Keyword scan only, ignoring any structured payload in `text`.
    pub fn scan_keywords(&self, text: &str) -> Extraction {
        let discovered = keywords::discover_careers(text, MAX_DISCOVERED_OPTIONS);
        if discovered.len() < MIN_DISCOVERED_OPTIONS {
            let reason = if discovered.is_empty() {
                NoDataReason::NothingFound
            } else {
                NoDataReason::InsufficientSignal { discovered }
            };
            debug!(reason = %reason.summary(), "keyword scan found too few careers");
            return Extraction::NoUsableData(reason);
        }

        match keyword_table(&discovered) {
            Ok(table) => {
                debug!(options = table.len(), "career table built from keyword scan");
                Extraction::Table {
                    table,
                    source: ExtractionSource::KeywordScan,
                    weights: Vec::new(),
                }
            }
            Err(err) => {
                warn!(error = %err, "keyword defaults did not fit canonical criteria");
                Extraction::NoUsableData(NoDataReason::NothingFound)
            }
        }
    }
}

fn structured_table(careers: Vec<(String, Vec<f64>)>) -> Result<PayoffTable, TableError> {
    PayoffTable::new(
        Criteria::canonical(),
        careers
            .into_iter()
            .map(|(name, scores)| CareerOption::new(name, scores)),
    )
}

fn keyword_table(careers: &[String]) -> Result<PayoffTable, TableError> {
    PayoffTable::new(
        Criteria::canonical(),
        careers
            .iter()
            .map(|name| CareerOption::new(name.clone(), defaults::default_scores(name))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::table::NEUTRAL_SCORE;

    fn adapter() -> ResponseAdapter {
        ResponseAdapter::new()
    }

    #[test]
    fn structured_payload_defaults_missing_criteria() {
        let text = "Here is my take.\n\nCAREER_MATRIX:\n```json\n{\"careers\": {\"Nurse\": {\"salary_potential\": 6, \"job_security\": 9}, \"Pilot\": {\"remote_flexibility\": 1}}, \"criteria_weights\": {\"job_security\": 0.2}}\n```\n";

        let extraction = adapter().extract(text);
        let Extraction::Table {
            table,
            source,
            weights,
        } = extraction
        else {
            panic!("expected a table");
        };

        assert_eq!(source, ExtractionSource::StructuredPayload);
        assert_eq!(table.criteria(), &Criteria::canonical());
        assert_eq!(table.names(), vec!["Nurse", "Pilot"]);
        assert_eq!(
            table.get("Nurse").map(|o| o.scores.clone()),
            Some(vec![6.0, 9.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0])
        );
        assert_eq!(table.get("Pilot").map(|o| o.scores[7]), Some(1.0));
        assert_eq!(weights.len(), 1);
    }

    #[test]
    fn malformed_payload_falls_back_to_keyword_scan() {
        let text = "CAREER_MATRIX:\n```json\n{\"careers\": {broken\n```\nConsider analyst or consultant work.";
        let extraction = adapter().extract(text);

        assert_eq!(extraction.source(), Some(ExtractionSource::KeywordScan));
        assert_eq!(
            extraction.table().map(|t| t.names()),
            Some(vec!["Analyst", "Consultant"])
        );
    }

    #[test]
    fn example_json_in_prose_does_not_hide_mentioned_roles() {
        let text = "A payload looks like:\n```json\n{\"careers\": {\"Astronaut\": {}}}\n```\nFor you, analyst and consultant roles fit best.";
        let extraction = adapter().extract(text);

        assert_eq!(extraction.source(), Some(ExtractionSource::KeywordScan));
        assert_eq!(
            extraction.table().map(|t| t.names()),
            Some(vec!["Analyst", "Consultant"])
        );
    }

    #[test]
    fn malformed_payload_without_keywords_reports_the_payload() {
        let text = "CAREER_MATRIX:\n```json\n{\"careers\": oops}\n```";
        match adapter().extract(text) {
            Extraction::NoUsableData(NoDataReason::MalformedPayload { error }) => {
                assert!(error.contains("JSON"));
            }
            other => panic!("expected malformed payload, got {other:?}"),
        }
    }

    #[test]
    fn unknown_fallback_roles_get_neutral_scores() {
        let extraction = adapter().extract("A sales position or a specialist track?");
        let table = extraction.into_table().expect("two roles found");
        assert_eq!(table.names(), vec!["Sales", "Specialist"]);
        for option in table.options() {
            assert_eq!(option.scores, vec![NEUTRAL_SCORE; 8]);
        }
    }

    #[test]
    fn single_role_is_insufficient_signal() {
        match adapter().extract("I want to become an architect.") {
            Extraction::NoUsableData(NoDataReason::InsufficientSignal { discovered }) => {
                assert_eq!(discovered, vec!["Architect".to_string()]);
            }
            other => panic!("expected insufficient signal, got {other:?}"),
        }
    }

    #[test]
    fn plain_chat_finds_nothing() {
        assert_eq!(
            adapter().extract("Thanks, that helps a lot!"),
            Extraction::NoUsableData(NoDataReason::NothingFound)
        );
    }
}
