mod client;
pub mod envelope;
mod resource;
mod store_error;

pub use client::RemoteStore;
pub use resource::Resource;
pub use store_error::StoreError;

use crate::auth::{Role, SessionContext};
use crate::domain::{PaymentStatus, PermitStatus};
use serde::Serialize;
use serde_json::Value;

/// Operations the front-end needs from the Permit Store.
///
/// `fetch` returns the accepted envelope; callers decode the records with
/// [`envelope::records`]. Every method fails unless the store answered 2xx with
/// `success: true`.
pub trait PermitStore: Send + Sync {
    fn fetch(
        &self,
        session: &SessionContext,
        resource: Resource,
        query: Option<&str>,
    ) -> Result<Value, StoreError>;

    fn create(&self, session: &SessionContext, resource: Resource, body: &Value) -> Result<(), StoreError>;

    fn update(
        &self,
        session: &SessionContext,
        resource: Resource,
        id: &str,
        body: &Value,
    ) -> Result<(), StoreError>;

    fn update_status(
        &self,
        session: &SessionContext,
        resource: Resource,
        id: &str,
        status: PermitStatus,
    ) -> Result<(), StoreError>;

    fn update_payment(
        &self,
        session: &SessionContext,
        id: &str,
        update: &PaymentUpdate,
    ) -> Result<(), StoreError>;

    fn delete(&self, session: &SessionContext, resource: Resource, id: &str) -> Result<(), StoreError>;
}

/// Sign-in endpoints of the same remote service.
pub trait AuthService: Send + Sync {
    fn login(&self, email: &str, password: &str) -> Result<LoginGrant, StoreError>;
    fn logout(&self, session: &SessionContext) -> Result<(), StoreError>;
}

/// Body of an occupancy payment update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentUpdate {
    pub payment_status_occupancy: PaymentStatus,
    pub last_payment_date_occupancy: Option<String>,
}

impl PaymentUpdate {
    /// Keeps the payment date present exactly when the status is paid.
    pub fn new(status: PaymentStatus, today: chrono::NaiveDate) -> Self {
        let last_payment_date_occupancy = match status {
            PaymentStatus::Paid => Some(today.format("%Y-%m-%d").to_string()),
            PaymentStatus::NotPaid => None,
        };
        Self {
            payment_status_occupancy: status,
            last_payment_date_occupancy,
        }
    }
}

/// Token and role handed out by a successful sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginGrant {
    pub token: String,
    pub role: Role,
}

impl LoginGrant {
    pub fn from_envelope(value: &Value) -> Result<Self, StoreError> {
        let token = value
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| StoreError::Decode("'token' missing".into()))?;

        let role = value
            .get("role")
            .or_else(|| value.get("user").and_then(|u| u.get("role")))
            .and_then(Value::as_str)
            .map(Role::from_wire)
            .unwrap_or(Role::Citizen);

        Ok(Self {
            token: token.to_string(),
            role,
        })
    }
}
