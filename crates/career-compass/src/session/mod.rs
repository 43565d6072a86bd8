//! Per-user guidance sessions: each session owns its own decision model.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{CareerSession, ProfileField, SessionId, Turn, UserProfile, MAX_HISTORY_TURNS};
pub use repository::{InMemorySessionRepository, SessionError, SessionRepository};
pub use router::guidance_router;
pub use service::{
    GuidanceError, GuidanceService, HistoryRebuild, IngestOutcome, IngestRequest, ProfileQuery,
    TableUpdate,
};
