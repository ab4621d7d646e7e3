use std::sync::Arc;

use crate::auth::{sessions, SessionBoundary, SessionEvent};
use crate::config::AppConfig;
use crate::db::{init_db, Database};
use crate::domain::TransitionTable;
use crate::errors::ServerError;
use crate::handlers::now_unix;
use crate::listing::StatsCache;
use crate::store::{AuthService, PermitStore, RemoteStore};

/// Shared state handed to every request.
pub struct App {
    pub config: AppConfig,
    pub db: Database,
    pub store: Arc<dyn PermitStore>,
    pub sessions: SessionBoundary,
    pub stats: StatsCache,
    pub transitions: TransitionTable,
}

impl App {
    pub fn new(
        config: AppConfig,
        db: Database,
        store: Arc<dyn PermitStore>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        let stats = StatsCache::default();
        let mut sessions = SessionBoundary::new(db.clone(), auth, config.server.session_ttl_secs);

        // Counts are fetched with the caller's token; recompute after a change of hands.
        let cache = stats.clone();
        sessions.subscribe(move |_| cache.invalidate());
        sessions.subscribe(|event| match event {
            SessionEvent::SignedIn(id) => tracing::debug!(email = %id.email, "session opened"),
            SessionEvent::SignedOut { email } => tracing::debug!(%email, "session closed"),
        });

        let transitions = config.transition_table();
        Self {
            config,
            db,
            store,
            sessions,
            stats,
            transitions,
        }
    }

    /// Opens the session database and the remote store client.
    pub fn from_config(config: AppConfig) -> Result<Self, ServerError> {
        let db = Database::new(config.server.database.clone());
        init_db(&db)?;
        let purged = db.with_conn(|conn| sessions::purge_expired(conn, now_unix()))?;
        if purged > 0 {
            tracing::info!(purged, "expired sessions removed");
        }

        let remote = Arc::new(RemoteStore::new(&config.api.base_url, config.api_timeout())?);
        tracing::info!(base_url = %config.api.base_url, "permit store configured");

        Ok(Self::new(config, db, remote.clone(), remote))
    }
}
