use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{CareerSession, ProfileField, SessionId, UserProfile};
use super::repository::{SessionError, SessionRepository};
use crate::adapter::{
    CriterionWeight, Extraction, ExtractionSource, NoDataReason, ResponseAdapter,
};
use crate::decision::{
    CareerOption, Criteria, DecisionReport, PayoffTable, TableError, UpdateMode, UpdateSummary,
};

/// One agent turn to fold into a session.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestRequest {
    /// What the user asked, if the caller wants it remembered.
    #[serde(default)]
    pub input: Option<String>,
    /// The agent's reply, free text with an optional structured block.
    pub response: String,
    #[serde(default)]
    pub mode: UpdateMode,
}

/// Manual edit of a session table.
#[derive(Debug, Clone, Deserialize)]
pub struct TableUpdate {
    pub careers: Vec<CareerOption>,
    /// Criteria labels; the session's current criteria are kept when absent.
    #[serde(default)]
    pub criteria: Option<Vec<String>>,
    #[serde(default)]
    pub mode: UpdateMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestOutcome {
    Applied {
        source: ExtractionSource,
        summary: UpdateSummary,
        weights: Vec<CriterionWeight>,
    },
    /// The session table was left untouched.
    NoUsableData { reason: NoDataReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProfileQuery {
    Ready { query: String },
    Incomplete {
        missing: Vec<ProfileField>,
        message: String,
    },
}

/// Body of a history rescan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryRebuild {
    #[serde(default)]
    pub mode: UpdateMode,
}

/// Service binding the response adapter and decision model to stored sessions.
///
/// Writes run load, modify and save under one service-wide lock, so concurrent updates
/// to a session are applied one after another instead of overwriting each other.
/// Repositories shared between several services get no such guarantee.
pub struct GuidanceService<S> {
    repository: Arc<S>,
    adapter: ResponseAdapter,
    writes: Mutex<()>,
}

impl<S> GuidanceService<S>
where
    S: SessionRepository + 'static,
{
    pub fn new(repository: Arc<S>) -> Self {
        Self {
            repository,
            adapter: ResponseAdapter::new(),
            writes: Mutex::new(()),
        }
    }

    /// Checks the profile is complete enough to ask the agent about careers.
    pub fn prepare_query(&self, profile: &UserProfile) -> ProfileQuery {
        let missing = profile.missing_fields();
        if missing.is_empty() {
            return ProfileQuery::Ready {
                query: profile.to_query(),
            };
        }

        let fields: Vec<&str> = missing.iter().map(|field| field.key()).collect();
        ProfileQuery::Incomplete {
            message: format!("Please provide more information: {}.", fields.join(", ")),
            missing,
        }
    }

    /// Extracts a candidate table from the agent reply and folds it into the session.
    ///
    /// The turn is recorded even when the reply carried no usable career data.
    pub fn ingest(
        &self,
        id: &SessionId,
        request: IngestRequest,
    ) -> Result<IngestOutcome, GuidanceError> {
        let _guard = self.write_lock()?;
        let mut session = self.load_or_new(id)?;
        let extraction = self.adapter.extract(&request.response);
        let outcome = fold(&mut session, extraction, request.mode)?;

        session.record_turn(request.input, request.response);
        self.repository.save(session)?;
        Ok(outcome)
    }

    /// Keyword scan over the recent turns joined together, for roles spread across replies.
    ///
    /// Structured payloads are ignored here. Sessions without history report nothing found.
    pub fn rebuild_from_history(
        &self,
        id: &SessionId,
        rebuild: HistoryRebuild,
    ) -> Result<IngestOutcome, GuidanceError> {
        let _guard = self.write_lock()?;
        let mut session = self.load_or_new(id)?;
        if session.history.is_empty() {
            return Ok(IngestOutcome::NoUsableData {
                reason: NoDataReason::NothingFound,
            });
        }

        let extraction = self.adapter.scan_keywords(&session.history_text());
        let outcome = fold(&mut session, extraction, rebuild.mode)?;
        if matches!(outcome, IngestOutcome::Applied { .. }) {
            session.touch();
            self.repository.save(session)?;
        }
        Ok(outcome)
    }

    pub fn update_table(
        &self,
        id: &SessionId,
        update: TableUpdate,
    ) -> Result<UpdateSummary, GuidanceError> {
        let _guard = self.write_lock()?;
        let mut session = self.load_or_new(id)?;
        let criteria = match update.criteria {
            Some(labels) => Criteria::from_labels(labels),
            None => session.model.table().criteria().clone(),
        };
        let candidate = PayoffTable::new(criteria, update.careers)?;
        let summary = session.model.apply(candidate, update.mode)?;

        session.touch();
        self.repository.save(session)?;
        Ok(summary)
    }

    pub fn report(&self, id: &SessionId) -> Result<DecisionReport, GuidanceError> {
        Ok(self.load_or_new(id)?.model.report())
    }

    pub fn explain(&self, id: &SessionId) -> Result<String, GuidanceError> {
        Ok(self.load_or_new(id)?.model.explain())
    }

    pub fn table(&self, id: &SessionId) -> Result<PayoffTable, GuidanceError> {
        Ok(self.load_or_new(id)?.model.table().clone())
    }

    pub fn session(&self, id: &SessionId) -> Result<Option<CareerSession>, GuidanceError> {
        Ok(self.repository.load(id)?)
    }

    pub fn reset(&self, id: &SessionId) -> Result<bool, GuidanceError> {
        let _guard = self.write_lock()?;
        Ok(self.repository.remove(id)?)
    }

    fn write_lock(&self) -> Result<MutexGuard<'_, ()>, SessionError> {
        self.writes
            .lock()
            .map_err(|_| SessionError::Unavailable("session write lock poisoned".to_string()))
    }

    // Unknown sessions read as a fresh default table; nothing is stored until a write.
    fn load_or_new(&self, id: &SessionId) -> Result<CareerSession, GuidanceError> {
        Ok(self
            .repository
            .load(id)?
            .unwrap_or_else(|| CareerSession::new(id.clone())))
    }
}

fn fold(
    session: &mut CareerSession,
    extraction: Extraction,
    mode: UpdateMode,
) -> Result<IngestOutcome, GuidanceError> {
    match extraction {
        Extraction::Table {
            table,
            source,
            weights,
        } => {
            let summary = session.model.apply(table, mode)?;
            info!(
                session = %session.id,
                source = source.label(),
                mode = mode.label(),
                options = summary.total,
                "session table updated from agent response"
            );
            Ok(IngestOutcome::Applied {
                source,
                summary,
                weights,
            })
        }
        Extraction::NoUsableData(reason) => {
            debug!(session = %session.id, reason = %reason.summary(), "agent response left table unchanged");
            Ok(IngestOutcome::NoUsableData { reason })
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GuidanceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Table(#[from] TableError),
}
