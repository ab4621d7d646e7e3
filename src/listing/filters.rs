use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::Datelike;

use crate::domain::logic::{is_paid_this_year, parse_store_date};
use crate::domain::{BusinessPermit, PermitRecord, PermitStatus};
use crate::listing::kind::{FilterKind, ListKind};

/// Occupancy payment split. Every record is in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentBucket {
    PaidThisYear,
    NotPaidOrOverdue,
}

impl PaymentBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentBucket::PaidThisYear => "paid_this_year",
            PaymentBucket::NotPaidOrOverdue => "not_paid_or_overdue",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "paid_this_year" => Some(PaymentBucket::PaidThisYear),
            "not_paid_or_overdue" => Some(PaymentBucket::NotPaidOrOverdue),
            _ => None,
        }
    }

    pub fn contains(self, permit: &BusinessPermit, current_year: i32) -> bool {
        let paid = is_paid_this_year(permit, current_year);
        match self {
            PaymentBucket::PaidThisYear => paid,
            PaymentBucket::NotPaidOrOverdue => !paid,
        }
    }
}

/// Active filters of a list page. `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub status: Option<PermitStatus>,
    pub payment: Option<PaymentBucket>,
}

impl FilterConfig {
    /// Reads `month`, `year`, `status` and `payment` from query parameters.
    /// Values that don't parse are dropped.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |k: &str| params.get(k).map(|v| v.trim()).filter(|v| !v.is_empty());
        Self {
            month: get("month")
                .and_then(|v| v.parse().ok())
                .filter(|m| (1..=12).contains(m)),
            year: get("year").and_then(|v| v.parse().ok()),
            status: get("status").and_then(|v| v.parse().ok()),
            payment: get("payment").and_then(PaymentBucket::parse),
        }
    }

    /// Only the filters a kind supports count.
    pub fn restricted_to<K: ListKind>(self) -> Self {
        Self {
            month: self.month.filter(|_| K::supports(FilterKind::Month)),
            year: self.year.filter(|_| K::supports(FilterKind::Year)),
            status: self.status.filter(|_| K::supports(FilterKind::Status)),
            payment: self.payment.filter(|_| K::supports(FilterKind::Payment)),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Query string fragment for links that keep the current filters.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(m) = self.month {
            out.push(("month", m.to_string()));
        }
        if let Some(y) = self.year {
            out.push(("year", y.to_string()));
        }
        if let Some(s) = self.status {
            out.push(("status", s.as_str().to_string()));
        }
        if let Some(p) = self.payment {
            out.push(("payment", p.as_str().to_string()));
        }
        out
    }
}

/// Keeps the records matching every active filter the kind supports.
/// Records whose date can't be parsed never match a month or year filter.
pub fn apply_filters<K: ListKind>(
    records: &[K::Record],
    filters: &FilterConfig,
    current_year: i32,
) -> Vec<K::Record> {
    let f = filters.restricted_to::<K>();
    records
        .iter()
        .filter(|r| {
            if f.month.is_some() || f.year.is_some() {
                let Some(date) = parse_store_date(K::date_field(r)) else {
                    return false;
                };
                if f.month.is_some_and(|m| date.month() != m) {
                    return false;
                }
                if f.year.is_some_and(|y| date.year() != y) {
                    return false;
                }
            }
            if f.status.is_some_and(|s| r.status() != s) {
                return false;
            }
            if let Some(bucket) = f.payment {
                match K::payment(r) {
                    Some(p) if bucket.contains(p, current_year) => {}
                    _ => return false,
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Most recent first when the kind sorts by date; fetch order otherwise.
pub fn sort<K: ListKind>(records: &mut [K::Record]) {
    if K::SORT_BY_DATE {
        records.sort_by_key(|r| Reverse(parse_store_date(K::date_field(r))));
    }
}
