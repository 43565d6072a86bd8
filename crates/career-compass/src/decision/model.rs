use super::criteria::Criteria;
use super::explain::render_explanation;
use super::scoring::{DecisionReport, RankingEntry, ScoringEngine, StrategyScores};
use super::table::{CareerOption, PayoffTable, TableError};
use super::update::{apply_update, UpdateMode, UpdateSummary};
use crate::adapter::ResponseAdapter;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Agent output as handed over by the conversational layer.
///
/// `career_matrix` and `criteria_labels` are filled in when the agent layer already
/// parsed its own structured block; otherwise only `response` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub response: String,
    #[serde(default)]
    pub career_matrix: Option<Vec<CareerOption>>,
    #[serde(default)]
    pub criteria_labels: Option<Vec<String>>,
}

/// One session's decision model: an owned payoff table plus the scorer that reads it.
///
/// Each session holds its own instance; there is no shared default table.
#[derive(Debug, Clone, PartialEq)]
pub struct CareerDecisionModel {
    table: PayoffTable,
    engine: ScoringEngine,
}

impl CareerDecisionModel {
    pub fn new(table: PayoffTable) -> Self {
        Self {
            table,
            engine: ScoringEngine::new(),
        }
    }

    pub fn standard() -> Self {
        Self::new(PayoffTable::standard())
    }

    /// Pre-parsed matrix first, then the adapter over the raw text, then the built-in table.
    pub fn from_agent_response(agent: &AgentResponse, adapter: &ResponseAdapter) -> Self {
        if let (Some(matrix), Some(labels)) = (&agent.career_matrix, &agent.criteria_labels) {
            match PayoffTable::new(Criteria::from_labels(labels), matrix.iter().cloned()) {
                Ok(table) => {
                    debug!(options = table.len(), "model built from pre-parsed agent matrix");
                    return Self::new(table);
                }
                Err(err) => warn!(error = %err, "pre-parsed agent matrix rejected"),
            }
        }

        match adapter.extract(&agent.response).into_table() {
            Some(table) => Self::new(table),
            None => {
                debug!("agent response carried no usable career data; using built-in table");
                Self::standard()
            }
        }
    }

    pub fn table(&self) -> &PayoffTable {
        &self.table
    }

    /// Replaces the options, keeping the current criteria unless new ones are given.
    pub fn update(
        &mut self,
        options: Vec<CareerOption>,
        criteria: Option<Criteria>,
    ) -> Result<(), TableError> {
        self.table.replace(options, criteria)
    }

    pub fn apply(
        &mut self,
        candidate: PayoffTable,
        mode: UpdateMode,
    ) -> Result<UpdateSummary, TableError> {
        apply_update(&mut self.table, candidate, mode)
    }

    pub fn strategy_scores(&self) -> StrategyScores {
        self.engine.strategy_scores(&self.table)
    }

    pub fn rankings(&self) -> Vec<RankingEntry> {
        self.engine.rankings(&self.table)
    }

    pub fn report(&self) -> DecisionReport {
        self.engine.evaluate(&self.table)
    }

    pub fn explain(&self) -> String {
        let scores = self.strategy_scores();
        render_explanation(&self.table.names(), &scores, self.table.criteria())
    }
}

impl Default for CareerDecisionModel {
    fn default() -> Self {
        Self::standard()
    }
}
