use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{SessionId, UserProfile};
use super::repository::{SessionError, SessionRepository};
use super::service::{
    GuidanceError, GuidanceService, HistoryRebuild, IngestOutcome, IngestRequest, TableUpdate,
};
use crate::decision::{
    table_to_csv, CareerDecisionModel, CareerOption, Criteria, DecisionReport, PayoffTable,
    UpdateSummary,
};
use crate::error::AppError;

/// Body of the stateless evaluation endpoint. Omitted fields use the built-in table.
#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    #[serde(default)]
    pub(crate) careers: Option<Vec<CareerOption>>,
    #[serde(default)]
    pub(crate) criteria: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluateResponse {
    pub(crate) report: DecisionReport,
    pub(crate) explanation: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct IngestResponse {
    pub(crate) session_id: SessionId,
    pub(crate) outcome: IngestOutcome,
    pub(crate) report: DecisionReport,
}

#[derive(Debug, Serialize)]
pub(crate) struct TableUpdateResponse {
    pub(crate) session_id: SessionId,
    pub(crate) summary: UpdateSummary,
    pub(crate) report: DecisionReport,
}

/// Router exposing profile checks, stateless evaluation, and per-session decisions.
pub fn guidance_router<S>(service: Arc<GuidanceService<S>>) -> Router
where
    S: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/decision/evaluate", post(evaluate_handler))
        .route("/api/v1/profile/query", post(profile_query_handler::<S>))
        .route(
            "/api/v1/sessions/:session_id",
            axum::routing::delete(reset_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/responses",
            post(ingest_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/history/rebuild",
            post(rebuild_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/table",
            get(table_handler::<S>).put(update_table_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/table.csv",
            get(table_csv_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/report",
            get(report_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/explanation",
            get(explanation_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler(
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Result<axum::Json<EvaluateResponse>, AppError> {
    let table = PayoffTable::construct(request.careers, request.criteria.map(Criteria::from_labels))?;
    let model = CareerDecisionModel::new(table);

    Ok(axum::Json(EvaluateResponse {
        report: model.report(),
        explanation: model.explain(),
    }))
}

pub(crate) async fn profile_query_handler<S>(
    State(service): State<Arc<GuidanceService<S>>>,
    axum::Json(profile): axum::Json<UserProfile>,
) -> Response
where
    S: SessionRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.prepare_query(&profile))).into_response()
}

pub(crate) async fn ingest_handler<S>(
    State(service): State<Arc<GuidanceService<S>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<IngestRequest>,
) -> Response
where
    S: SessionRepository + 'static,
{
    let id = match SessionId::parse(&session_id) {
        Ok(id) => id,
        Err(error) => return error_response(error.into()),
    };

    let result = service
        .ingest(&id, request)
        .and_then(|outcome| Ok((outcome, service.report(&id)?)));

    match result {
        Ok((outcome, report)) => {
            let body = IngestResponse {
                session_id: id,
                outcome,
                report,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rebuild_handler<S>(
    State(service): State<Arc<GuidanceService<S>>>,
    Path(session_id): Path<String>,
    axum::Json(rebuild): axum::Json<HistoryRebuild>,
) -> Response
where
    S: SessionRepository + 'static,
{
    let id = match SessionId::parse(&session_id) {
        Ok(id) => id,
        Err(error) => return error_response(error.into()),
    };

    let result = service
        .rebuild_from_history(&id, rebuild)
        .and_then(|outcome| Ok((outcome, service.report(&id)?)));

    match result {
        Ok((outcome, report)) => {
            let body = IngestResponse {
                session_id: id,
                outcome,
                report,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_table_handler<S>(
    State(service): State<Arc<GuidanceService<S>>>,
    Path(session_id): Path<String>,
    axum::Json(update): axum::Json<TableUpdate>,
) -> Response
where
    S: SessionRepository + 'static,
{
    let id = match SessionId::parse(&session_id) {
        Ok(id) => id,
        Err(error) => return error_response(error.into()),
    };

    let result = service
        .update_table(&id, update)
        .and_then(|summary| Ok((summary, service.report(&id)?)));

    match result {
        Ok((summary, report)) => {
            let body = TableUpdateResponse {
                session_id: id,
                summary,
                report,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn table_handler<S>(
    State(service): State<Arc<GuidanceService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionRepository + 'static,
{
    match SessionId::parse(&session_id)
        .map_err(GuidanceError::from)
        .and_then(|id| service.table(&id))
    {
        Ok(table) => (StatusCode::OK, axum::Json(table)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn table_csv_handler<S>(
    State(service): State<Arc<GuidanceService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionRepository + 'static,
{
    let table = match SessionId::parse(&session_id)
        .map_err(GuidanceError::from)
        .and_then(|id| service.table(&id))
    {
        Ok(table) => table,
        Err(error) => return error_response(error),
    };

    match table_to_csv(&table) {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<GuidanceService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionRepository + 'static,
{
    let id = match SessionId::parse(&session_id) {
        Ok(id) => id,
        Err(error) => return error_response(error.into()),
    };

    match service.report(&id) {
        Ok(report) => {
            let payload = json!({ "session_id": id, "report": report });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn explanation_handler<S>(
    State(service): State<Arc<GuidanceService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionRepository + 'static,
{
    match SessionId::parse(&session_id)
        .map_err(GuidanceError::from)
        .and_then(|id| service.explain(&id))
    {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            text,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_handler<S>(
    State(service): State<Arc<GuidanceService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionRepository + 'static,
{
    match SessionId::parse(&session_id)
        .map_err(GuidanceError::from)
        .and_then(|id| service.reset(&id))
    {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => {
            let payload = json!({ "error": "session not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: GuidanceError) -> Response {
    let status = match &error {
        GuidanceError::Session(SessionError::InvalidId(_)) => StatusCode::BAD_REQUEST,
        GuidanceError::Table(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GuidanceError::Session(SessionError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
