use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{PermitRecord, PermitStatus};

/// Status counts shown on the dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusStats {
    pub fn count<R: PermitRecord>(records: &[R]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            match r.status() {
                PermitStatus::Pending => acc.pending += 1,
                PermitStatus::Approved => acc.approved += 1,
                PermitStatus::Rejected => acc.rejected += 1,
            }
            acc
        })
    }
}

/// Last computed counts, dropped whenever a write succeeds.
#[derive(Debug, Clone, Default)]
pub struct StatsCache {
    slot: Arc<Mutex<Option<StatusStats>>>,
}

impl StatsCache {
    pub fn get_or_compute(&self, compute: impl FnOnce() -> Option<StatusStats>) -> Option<StatusStats> {
        if let Some(stats) = *self.slot.lock().unwrap_or_else(PoisonError::into_inner) {
            return Some(stats);
        }
        // Computed outside the lock; a concurrent refresh just wins the race.
        let fresh = compute()?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(fresh);
        Some(fresh)
    }

    pub fn invalidate(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
