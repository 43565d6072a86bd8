use crate::config::ConfigError;
use crate::decision::{CsvTableError, TableError};
use crate::session::{GuidanceError, SessionError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Table(TableError),
    CsvTable(CsvTableError),
    Guidance(GuidanceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Table(_) | AppError::CsvTable(_) => StatusCode::BAD_REQUEST,
            AppError::Guidance(GuidanceError::Table(_))
            | AppError::Guidance(GuidanceError::Session(SessionError::InvalidId(_))) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Guidance(GuidanceError::Session(SessionError::Unavailable(_))) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Table(err) => write!(f, "payoff table error: {}", err),
            AppError::CsvTable(err) => write!(f, "payoff table import error: {}", err),
            AppError::Guidance(err) => write!(f, "session error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Table(err) => Some(err),
            AppError::CsvTable(err) => Some(err),
            AppError::Guidance(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<TableError> for AppError {
    fn from(value: TableError) -> Self {
        Self::Table(value)
    }
}

impl From<CsvTableError> for AppError {
    fn from(value: CsvTableError) -> Self {
        Self::CsvTable(value)
    }
}

impl From<GuidanceError> for AppError {
    fn from(value: GuidanceError) -> Self {
        Self::Guidance(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Guidance(GuidanceError::Session(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_bad_request() {
        let table = AppError::from(TableError::VectorLengthMismatch {
            option: "Chef".to_string(),
            expected: 5,
            actual: 2,
        });
        assert_eq!(table.status(), StatusCode::BAD_REQUEST);
        assert!(table.to_string().contains("'Chef' has 2 scores"));

        let session = AppError::from(SessionError::InvalidId("a b".to_string()));
        assert_eq!(session.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_errors_map_to_server_error() {
        let io = AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let store = AppError::from(SessionError::Unavailable("down".to_string()));
        assert_eq!(store.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
