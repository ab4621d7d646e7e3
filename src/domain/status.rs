// src/domain/status.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review status of a permit application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermitStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl PermitStatus {
    pub const ALL: [PermitStatus; 3] = [
        PermitStatus::Pending,
        PermitStatus::Approved,
        PermitStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PermitStatus::Pending => "pending",
            PermitStatus::Approved => "approved",
            PermitStatus::Rejected => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PermitStatus::Pending => "Pending",
            PermitStatus::Approved => "Approved",
            PermitStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for PermitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermitStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(PermitStatus::Pending),
            "approved" => Ok(PermitStatus::Approved),
            "rejected" => Ok(PermitStatus::Rejected),
            other => Err(format!("unknown permit status '{other}'")),
        }
    }
}

/// Occupancy fee payment state of an approved business permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    #[default]
    NotPaid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::NotPaid => "not_paid",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::NotPaid => "Not Paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "paid" => Ok(PaymentStatus::Paid),
            "not_paid" => Ok(PaymentStatus::NotPaid),
            other => Err(format!("unknown payment status '{other}'")),
        }
    }
}

/// Which status changes staff may make.
///
/// `open()` allows every change between the three states. `reviewed()` keeps a
/// rejected application from jumping straight to approved: it has to be put back
/// to pending first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    allowed: Vec<(PermitStatus, PermitStatus)>,
}

impl TransitionTable {
    pub fn open() -> Self {
        use PermitStatus::*;
        Self {
            allowed: vec![
                (Pending, Approved),
                (Pending, Rejected),
                (Approved, Pending),
                (Rejected, Pending),
                (Approved, Rejected),
                (Rejected, Approved),
            ],
        }
    }

    pub fn reviewed() -> Self {
        let mut table = Self::open();
        table
            .allowed
            .retain(|t| *t != (PermitStatus::Rejected, PermitStatus::Approved));
        table
    }

    /// Setting a status to its current value is always allowed.
    pub fn permits(&self, from: PermitStatus, to: PermitStatus) -> bool {
        from == to || self.allowed.contains(&(from, to))
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::open()
    }
}
