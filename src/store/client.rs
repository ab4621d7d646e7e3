// store/client.rs
use crate::auth::SessionContext;
use crate::domain::PermitStatus;
use crate::store::envelope;
use crate::store::resource::{Resource, LOGIN_PATH, LOGOUT_PATH};
use crate::store::{AuthService, LoginGrant, PaymentUpdate, PermitStore, StoreError};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use url::Url;

const USER_AGENT: &str = concat!("firedesk/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client for the remote Permit Store.
#[derive(Clone)]
pub struct RemoteStore {
    client: Client,
    base: Url,
}

impl RemoteStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        // Url::join drops the last segment unless the base ends with '/'.
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn url(&self, path: &str, id: Option<&str>) -> Result<Url, StoreError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;

        if let Some(id) = id {
            let shown = url.to_string();
            url.path_segments_mut()
                .map_err(|_| StoreError::InvalidUrl(format!("cannot append to {shown}")))?
                .push(id);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, session: Option<&SessionContext>) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match session.and_then(SessionContext::bearer) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn execute(&self, builder: RequestBuilder) -> Result<Value, StoreError> {
        let req = builder
            .build()
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        let method = req.method().clone();
        let path = req.url().path().to_string();
        let start = Instant::now();

        let resp = self
            .client
            .execute(req)
            .map_err(|e| {
                tracing::warn!(%method, %path, error = %e, "permit store unreachable");
                StoreError::Network(e.to_string())
            })?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let outcome = envelope::accept(status, &text);
        match &outcome {
            Ok(_) => tracing::debug!(%method, %path, status, elapsed = ?start.elapsed(), "permit store ok"),
            Err(e) => tracing::warn!(%method, %path, status, error = %e, "permit store refused"),
        }
        outcome
    }
}

impl PermitStore for RemoteStore {
    fn fetch(
        &self,
        session: &SessionContext,
        resource: Resource,
        query: Option<&str>,
    ) -> Result<Value, StoreError> {
        let url = match query {
            Some(q) => {
                let mut url = self.url(&resource.search_path(), None)?;
                url.query_pairs_mut().append_pair("query", q);
                url
            }
            None => self.url(&resource.list_path(), None)?,
        };
        self.execute(self.request(Method::GET, url, Some(session)))
    }

    fn create(&self, session: &SessionContext, resource: Resource, body: &Value) -> Result<(), StoreError> {
        let url = self.url(&resource.create_path(), None)?;
        self.execute(self.request(Method::POST, url, Some(session)).json(body))?;
        Ok(())
    }

    fn update(
        &self,
        session: &SessionContext,
        resource: Resource,
        id: &str,
        body: &Value,
    ) -> Result<(), StoreError> {
        let url = self.url(&resource.update_path(), Some(id))?;
        self.execute(self.request(Method::PUT, url, Some(session)).json(body))?;
        Ok(())
    }

    fn update_status(
        &self,
        session: &SessionContext,
        resource: Resource,
        id: &str,
        status: PermitStatus,
    ) -> Result<(), StoreError> {
        let path = resource.status_path().ok_or_else(|| {
            StoreError::InvalidUrl(format!("{resource:?} has no status endpoint"))
        })?;
        let url = self.url(&path, Some(id))?;
        let body = json!({ "status": status });
        self.execute(self.request(Method::PUT, url, Some(session)).json(&body))?;
        Ok(())
    }

    fn update_payment(
        &self,
        session: &SessionContext,
        id: &str,
        update: &PaymentUpdate,
    ) -> Result<(), StoreError> {
        let path = Resource::Business
            .payment_path()
            .ok_or_else(|| StoreError::InvalidUrl("no payment endpoint".into()))?;
        let url = self.url(&path, Some(id))?;
        self.execute(self.request(Method::PUT, url, Some(session)).json(update))?;
        Ok(())
    }

    fn delete(&self, session: &SessionContext, resource: Resource, id: &str) -> Result<(), StoreError> {
        let url = self.url(&resource.delete_path(), Some(id))?;
        self.execute(self.request(Method::DELETE, url, Some(session)))?;
        Ok(())
    }
}

impl AuthService for RemoteStore {
    fn login(&self, email: &str, password: &str) -> Result<LoginGrant, StoreError> {
        let url = self.url(LOGIN_PATH, None)?;
        let body = json!({ "email": email, "password": password });
        let value = self.execute(self.request(Method::POST, url, None).json(&body))?;
        LoginGrant::from_envelope(&value)
    }

    fn logout(&self, session: &SessionContext) -> Result<(), StoreError> {
        let url = self.url(LOGOUT_PATH, None)?;
        self.execute(self.request(Method::POST, url, Some(session)))?;
        Ok(())
    }
}
