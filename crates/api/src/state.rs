use std::sync::Arc;

use crate::config::ServerConfig;
use crate::session::SessionManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: majlis_db::DbPool,
    /// Server configuration (domain restriction, JWT settings).
    pub config: Arc<ServerConfig>,
    /// In-memory profile edit sessions, one per member.
    pub sessions: Arc<SessionManager>,
}
