// src/auth/context.rs

/// What a signed-in user is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Station administrators: every table, including FSIC.
    Admin,
    /// Station personnel: business and occupancy tables.
    Staff,
    /// Applicants: application forms only.
    Citizen,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Citizen => "citizen",
        }
    }

    /// Maps the role flag sent by the auth service. Unknown flags get the
    /// least privileged role.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" | "administrator" => Role::Admin,
            "staff" | "personnel" | "firestation" => Role::Staff,
            _ => Role::Citizen,
        }
    }

    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Staff)
    }
}

/// A signed-in user, as stored in the session table.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub session_id: i64,
    pub email: String,
    pub role: Role,
    /// Bearer token issued by the auth service.
    pub api_token: String,
}

/// Per-request session state, passed explicitly to every layer that needs it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionContext {
    identity: Option<Identity>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|i| i.role)
    }

    pub fn bearer(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.api_token.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }
}
