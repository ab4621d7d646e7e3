// src/tests/utils.rs
use std::io::Read;
use std::sync::{Arc, Mutex, MutexGuard};

use astra::{Body, Request, Response};
use http::Method;
use serde_json::{json, Value};

use crate::app::App;
use crate::auth::{sessions, Role, SessionContext};
use crate::auth::token::generate_session_token;
use crate::config::AppConfig;
use crate::db::{init_db, Database};
use crate::domain::PermitStatus;
use crate::store::{AuthService, LoginGrant, PaymentUpdate, PermitStore, Resource, StoreError};

#[derive(Default)]
struct Inner {
    business: Vec<Value>,
    fsic: Vec<Value>,
    users: Vec<(String, String, Role)>,
    calls: Vec<String>,
    refuse_writes: Option<String>,
    fail_reads: bool,
    next_id: u32,
}

impl Inner {
    fn table(&mut self, resource: Resource) -> &mut Vec<Value> {
        match resource {
            Resource::Business => &mut self.business,
            Resource::Fsic => &mut self.fsic,
        }
    }

    fn write_allowed(&self) -> Result<(), StoreError> {
        match &self.refuse_writes {
            Some(message) => Err(StoreError::Rejected {
                status: 400,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn find(&mut self, resource: Resource, id: &str) -> Result<&mut Value, StoreError> {
        self.table(resource)
            .iter_mut()
            .find(|v| v["_id"] == id)
            .ok_or_else(|| StoreError::Rejected {
                status: 404,
                message: "Permit not found".into(),
            })
    }
}

/// In-memory Permit Store that records every call it receives.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

fn name(resource: Resource) -> &'static str {
    match resource {
        Resource::Business => "business",
        Resource::Fsic => "fsic",
    }
}

impl MemoryStore {
    pub fn with_business(records: Vec<Value>) -> Self {
        let store = Self::default();
        store.lock().business = records;
        store
    }

    pub fn with_fsic(records: Vec<Value>) -> Self {
        let store = Self::default();
        store.lock().fsic = records;
        store
    }

    pub fn and_fsic(self, records: Vec<Value>) -> Self {
        self.lock().fsic = records;
        self
    }

    pub fn with_user(self, email: &str, password: &str, role: Role) -> Self {
        self.lock()
            .users
            .push((email.to_string(), password.to_string(), role));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn records(&self, resource: Resource) -> Vec<Value> {
        self.lock().table(resource).clone()
    }

    pub fn refuse_writes(&self, message: &str) {
        self.lock().refuse_writes = Some(message.to_string());
    }

    pub fn fail_reads(&self) {
        self.lock().fail_reads = true;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

impl PermitStore for MemoryStore {
    fn fetch(
        &self,
        _session: &SessionContext,
        resource: Resource,
        query: Option<&str>,
    ) -> Result<Value, StoreError> {
        let mut inner = self.lock();
        match query {
            Some(q) => inner.calls.push(format!("search {} {q}", name(resource))),
            None => inner.calls.push(format!("fetch {}", name(resource))),
        }
        if inner.fail_reads {
            return Err(StoreError::Network("connection refused".into()));
        }

        let needle = query.map(str::to_lowercase);
        let permits: Vec<Value> = inner
            .table(resource)
            .iter()
            .filter(|record| match &needle {
                Some(n) => record.as_object().is_some_and(|fields| {
                    fields
                        .values()
                        .filter_map(Value::as_str)
                        .any(|s| s.to_lowercase().contains(n))
                }),
                None => true,
            })
            .cloned()
            .collect();
        Ok(json!({ "success": true, "permits": permits }))
    }

    fn create(&self, _session: &SessionContext, resource: Resource, body: &Value) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.push(format!("create {}", name(resource)));
        inner.write_allowed()?;

        inner.next_id += 1;
        let mut record = body.clone();
        record["_id"] = json!(format!("m{}", inner.next_id));
        inner.table(resource).push(record);
        Ok(())
    }

    fn update(
        &self,
        _session: &SessionContext,
        resource: Resource,
        id: &str,
        body: &Value,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.push(format!("update {} {id}", name(resource)));
        inner.write_allowed()?;

        let record = inner.find(resource, id)?;
        *record = body.clone();
        record["_id"] = json!(id);
        Ok(())
    }

    fn update_status(
        &self,
        _session: &SessionContext,
        resource: Resource,
        id: &str,
        status: PermitStatus,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.push(format!("status {} {id}", name(resource)));
        inner.write_allowed()?;

        inner.find(resource, id)?["status"] = json!(status);
        Ok(())
    }

    fn update_payment(
        &self,
        _session: &SessionContext,
        id: &str,
        update: &PaymentUpdate,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.push(format!("payment business {id}"));
        inner.write_allowed()?;

        let record = inner.find(Resource::Business, id)?;
        record["payment_status_occupancy"] = json!(update.payment_status_occupancy);
        record["last_payment_date_occupancy"] = json!(update.last_payment_date_occupancy);
        Ok(())
    }

    fn delete(&self, _session: &SessionContext, resource: Resource, id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.calls.push(format!("delete {} {id}", name(resource)));
        inner.write_allowed()?;

        inner.find(resource, id)?;
        inner.table(resource).retain(|v| v["_id"] != id);
        Ok(())
    }
}

impl AuthService for MemoryStore {
    fn login(&self, email: &str, password: &str) -> Result<LoginGrant, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(format!("login {email}"));
        inner
            .users
            .iter()
            .find(|(e, p, _)| e == email && p == password)
            .map(|(_, _, role)| LoginGrant {
                token: format!("api-{email}"),
                role: *role,
            })
            .ok_or_else(|| StoreError::Rejected {
                status: 401,
                message: String::new(),
            })
    }

    fn logout(&self, session: &SessionContext) -> Result<(), StoreError> {
        let email = session.identity().map(|i| i.email.clone()).unwrap_or_default();
        self.lock().calls.push(format!("logout {email}"));
        Ok(())
    }
}

/// Fresh session database under the system temp dir.
pub fn init_test_db() -> Database {
    let path = std::env::temp_dir().join(format!("firedesk-test-{}.sqlite3", generate_session_token()));
    let db = Database::new(path);
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn test_app(store: Arc<MemoryStore>) -> App {
    test_app_with(AppConfig::default(), store)
}

pub fn test_app_with(config: AppConfig, store: Arc<MemoryStore>) -> App {
    App::new(config, init_test_db(), store.clone(), store)
}

/// `Cookie:` header value for a session opened directly in the database.
pub fn signed_in_cookie(app: &App, email: &str, role: Role) -> String {
    let now = crate::handlers::now_unix();
    let (raw, _) = app
        .db
        .with_conn(|conn| sessions::create_session(conn, email, role, &format!("api-{email}"), now, 3600))
        .unwrap();
    format!("session={raw}")
}

pub fn get(path: &str, cookie: Option<&str>) -> Request {
    request(Method::GET, path, cookie, "")
}

pub fn post(path: &str, cookie: Option<&str>, form: &str) -> Request {
    request(Method::POST, path, cookie, form)
}

fn request(method: Method, path: &str, cookie: Option<&str>, form: &str) -> Request {
    let mut builder = http::Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    if !form.is_empty() {
        builder = builder.header("Content-Type", "application/x-www-form-urlencoded");
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut out = String::new();
    resp.into_body().reader().read_to_string(&mut out).unwrap();
    out
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
