// src/auth/boundary.rs
use std::sync::Arc;

use crate::auth::context::{Identity, SessionContext};
use crate::auth::{sessions, token};
use crate::db::Database;
use crate::errors::ServerError;
use crate::store::{AuthService, StoreError};

pub const SESSION_COOKIE: &str = "session";

/// Published after the session table changes.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn(Identity),
    SignedOut { email: String },
}

type Subscriber = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// Result of a sign-in attempt the user can act on.
#[derive(Debug, Clone, PartialEq)]
pub enum SignIn {
    Granted { cookie: String, identity: Identity },
    Refused(String),
}

/// The only place sessions are opened or closed.
pub struct SessionBoundary {
    db: Database,
    auth: Arc<dyn AuthService>,
    ttl_secs: i64,
    subscribers: Vec<Subscriber>,
}

impl SessionBoundary {
    pub fn new(db: Database, auth: Arc<dyn AuthService>, ttl_secs: i64) -> Self {
        Self {
            db,
            auth,
            ttl_secs,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, f: F)
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(f));
    }

    fn publish(&self, event: SessionEvent) {
        for sub in &self.subscribers {
            sub(&event);
        }
    }

    pub fn sign_in(&self, email: &str, password: &str, now: i64) -> Result<SignIn, ServerError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Ok(SignIn::Refused("Email and password are required.".into()));
        }

        let grant = match self.auth.login(email, password) {
            Ok(grant) => grant,
            Err(StoreError::Rejected { message, .. }) => {
                tracing::info!(%email, "sign-in refused");
                return Ok(SignIn::Refused(if message.is_empty() {
                    "Invalid email or password.".into()
                } else {
                    message
                }));
            }
            Err(e) => {
                tracing::warn!(%email, error = %e, "sign-in failed");
                return Ok(SignIn::Refused(e.user_message()));
            }
        };

        let (cookie, session_id) = self.db.with_conn(|conn| {
            sessions::create_session(conn, email, grant.role, &grant.token, now, self.ttl_secs)
        })?;

        let identity = Identity {
            session_id,
            email: email.to_string(),
            role: grant.role,
            api_token: grant.token,
        };
        tracing::info!(%email, role = identity.role.as_str(), "signed in");
        self.publish(SessionEvent::SignedIn(identity.clone()));

        Ok(SignIn::Granted { cookie, identity })
    }

    /// Closes the local session; the remote logout is best effort.
    pub fn sign_out(&self, session: &SessionContext, now: i64) -> Result<(), ServerError> {
        let Some(identity) = session.identity() else {
            return Ok(());
        };

        if let Err(e) = self.auth.logout(session) {
            tracing::warn!(email = %identity.email, error = %e, "remote logout failed");
        }

        self.db
            .with_conn(|conn| sessions::revoke_session(conn, identity.session_id, now))?;

        tracing::info!(email = %identity.email, "signed out");
        self.publish(SessionEvent::SignedOut {
            email: identity.email.clone(),
        });
        Ok(())
    }

    /// Session for a request, from its `Cookie` header.
    pub fn resolve(&self, cookie_header: Option<&str>, now: i64) -> Result<SessionContext, ServerError> {
        let Some(raw) = cookie_header.and_then(|h| token::session_cookie(h, SESSION_COOKIE)) else {
            return Ok(SessionContext::anonymous());
        };

        let identity = self
            .db
            .with_conn(|conn| sessions::load_session(conn, &raw, now))?;

        Ok(identity.map(SessionContext::signed_in).unwrap_or_default())
    }
}

pub fn session_cookie_header(value: &str, max_age: i64) -> String {
    format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}")
}

pub fn clear_cookie_header() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
