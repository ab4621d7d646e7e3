// src/domain/permit.rs

use crate::domain::status::{PaymentStatus, PermitStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::Debug;

/// Shared surface of the permit variants the list views work with.
pub trait PermitRecord: Debug + Clone + PartialEq + Serialize + DeserializeOwned {
    fn id(&self) -> &str;
    fn status(&self) -> PermitStatus;
    fn set_status(&mut self, status: PermitStatus);
}

// Business permit (FSEC) application. The occupancy table is the approved subset
// of these, so the occupancy payment fields live here too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessPermit {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default)]
    pub date_received: String,
    #[serde(default)]
    pub owner_establishment: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fcode_fee: f64,
    #[serde(default)]
    pub or_no: String,
    #[serde(default)]
    pub evaluated_by: String,
    #[serde(default)]
    pub date_released_fsec: String,
    #[serde(default)]
    pub control_no: String,
    #[serde(default)]
    pub status: PermitStatus,

    #[serde(default)]
    pub payment_status_occupancy: PaymentStatus,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub last_payment_date_occupancy: Option<String>,
}

/// Fire Safety Inspection Certificate application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FsicPermit {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub brgy: String,
    #[serde(default)]
    pub complete_address: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub floor_area: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub no_of_storeys: u32,
    #[serde(default)]
    pub rental: String,
    #[serde(default)]
    pub nature_of_business: String,
    #[serde(default)]
    pub bir_tin: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub expiry: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount_paid: f64,
    #[serde(default)]
    pub or_number: String,
    #[serde(default)]
    pub date_applied: String,
    #[serde(default)]
    pub type_of_occupancy: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date_released: Option<String>,
    #[serde(default)]
    pub status: PermitStatus,
}

impl PermitRecord for BusinessPermit {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> PermitStatus {
        self.status
    }

    fn set_status(&mut self, status: PermitStatus) {
        self.status = status;
    }
}

impl PermitRecord for FsicPermit {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> PermitStatus {
        self.status
    }

    fn set_status(&mut self, status: PermitStatus) {
        self.status = status;
    }
}

// The store has been seen sending amounts both as numbers and as strings.
fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    match Value::deserialize(d)? {
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => Ok(parse_amount(&s).unwrap_or(0.0)),
        _ => Ok(0.0),
    }
}

fn lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    match Value::deserialize(d)? {
        Value::Number(n) => Ok(n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0)),
        Value::String(s) => Ok(s.trim().parse().unwrap_or(0)),
        _ => Ok(0),
    }
}

fn empty_as_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

/// Parses a peso amount as typed by staff: "₱1,250.50" -> 1250.5
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '₱' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
