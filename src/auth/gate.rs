// src/auth/gate.rs
use crate::auth::context::{Role, SessionContext};

/// Top-level page a session lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Login,
    AdminDashboard,
    StaffDashboard,
    CitizenHome,
}

impl Landing {
    pub fn for_session(session: &SessionContext) -> Self {
        match session.role() {
            None => Landing::Login,
            Some(Role::Admin) => Landing::AdminDashboard,
            Some(Role::Staff) => Landing::StaffDashboard,
            Some(Role::Citizen) => Landing::CitizenHome,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Landing::Login => "/login",
            Landing::AdminDashboard => "/admin",
            Landing::StaffDashboard => "/dashboard",
            Landing::CitizenHome => "/home",
        }
    }
}
