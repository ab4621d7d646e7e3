// src/listing/controller.rs
use std::marker::PhantomData;

use chrono::NaiveDate;
use serde_json::Value;

use crate::auth::SessionContext;
use crate::domain::{PaymentStatus, PermitRecord, PermitStatus, TransitionTable};
use crate::listing::filters::{apply_filters, sort, FilterConfig};
use crate::listing::kind::{Cell, ListKind, StatusStrategy};
use crate::listing::notice::Notice;
use crate::listing::pagination::{paginate, PageWindow, DEFAULT_PAGE_SIZE};
use crate::store::{envelope, PaymentUpdate, PermitStore, StoreError};

/// What the last read did to the working copy.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(usize),
    /// The working copy was left as it was.
    Failed(StoreError),
}

impl LoadOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadOutcome::Failed(_))
    }
}

/// One rendered page of a list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<R> {
    pub rows: Vec<R>,
    pub window: PageWindow,
}

/// View-model behind every permit table.
///
/// Owns a working copy of the kind's records and derives the visible page
/// from it. Reads report through [`LoadOutcome`]; writes return exactly one
/// [`Notice`] and only touch the working copy by reloading it on success.
pub struct ListController<'a, K: ListKind> {
    store: &'a dyn PermitStore,
    session: &'a SessionContext,
    transitions: &'a TransitionTable,
    records: Vec<K::Record>,
    outcome: Option<LoadOutcome>,
    query: String,
    filters: FilterConfig,
    page: usize,
    page_size: usize,
    on_refresh: Option<Box<dyn Fn() + 'a>>,
    _kind: PhantomData<K>,
}

impl<'a, K: ListKind> ListController<'a, K> {
    pub fn new(
        store: &'a dyn PermitStore,
        session: &'a SessionContext,
        transitions: &'a TransitionTable,
    ) -> Self {
        Self {
            store,
            session,
            transitions,
            records: Vec::new(),
            outcome: None,
            query: String::new(),
            filters: FilterConfig::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            on_refresh: None,
            _kind: PhantomData,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Called after every successful write, once the reload has run.
    pub fn on_refresh(mut self, f: impl Fn() + 'a) -> Self {
        self.on_refresh = Some(Box::new(f));
        self
    }

    pub fn records(&self) -> &[K::Record] {
        &self.records
    }

    pub fn outcome(&self) -> Option<&LoadOutcome> {
        self.outcome.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn load(&mut self) -> &LoadOutcome {
        self.query.clear();
        let result = self.store.fetch(self.session, K::RESOURCE, None);
        self.replace(result)
    }

    /// Server-side search. A blank query reloads everything.
    pub fn search(&mut self, query: &str) -> &LoadOutcome {
        let query = query.trim();
        if query.is_empty() {
            return self.load();
        }
        self.query = query.to_string();
        let result = self.store.fetch(self.session, K::RESOURCE, Some(query));
        self.replace(result)
    }

    fn replace(&mut self, result: Result<Value, StoreError>) -> &LoadOutcome {
        let outcome = match result.and_then(|v| envelope::records::<K::Record>(&v)) {
            Ok(records) => {
                tracing::debug!(kind = K::SLUG, count = records.len(), "list loaded");
                let n = records.len();
                self.records = records;
                LoadOutcome::Loaded(n)
            }
            Err(e) => {
                tracing::warn!(kind = K::SLUG, error = %e, "list load failed");
                LoadOutcome::Failed(e)
            }
        };
        self.outcome.insert(outcome)
    }

    /// Any filter change goes back to the first page.
    pub fn set_filters(&mut self, filters: FilterConfig) {
        self.filters = filters.restricted_to::<K>();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// In-scope records matching the filters, in display order.
    pub fn matching(&self, current_year: i32) -> Vec<K::Record> {
        let scoped: Vec<K::Record> = self
            .records
            .iter()
            .filter(|r| K::in_scope(r))
            .cloned()
            .collect();
        let mut out = if self.filters.is_empty() {
            scoped
        } else {
            apply_filters::<K>(&scoped, &self.filters, current_year)
        };
        sort::<K>(&mut out);
        out
    }

    pub fn view(&self, current_year: i32) -> ListView<K::Record> {
        let all = self.matching(current_year);
        let window = PageWindow::new(all.len(), self.page_size, self.page);
        let rows = paginate(&all, self.page_size, self.page).to_vec();
        ListView { rows, window }
    }

    /// Every matching record, never just the visible page.
    pub fn export_rows(&self, current_year: i32) -> Vec<Vec<Cell>> {
        self.matching(current_year)
            .iter()
            .map(K::export_row)
            .collect()
    }

    /// A loaded record this table shows. Records outside the kind's scope are not found.
    pub fn find(&self, id: &str) -> Option<&K::Record> {
        self.records
            .iter()
            .find(|r| r.id() == id && K::in_scope(r))
    }

    pub fn set_status(&mut self, id: &str, status: PermitStatus) -> Notice {
        if K::STATUS == StatusStrategy::Unsupported {
            return Notice::error("Status cannot be changed from this table.");
        }
        let Some(current) = self.find(id).cloned() else {
            return Notice::error("Permit not found.");
        };
        if !self.transitions.permits(current.status(), status) {
            return Notice::error(format!(
                "A {} permit cannot be set to {} directly.",
                current.status().as_str(),
                status.as_str()
            ));
        }

        let result = match K::STATUS {
            StatusStrategy::StatusEndpoint => {
                self.store
                    .update_status(self.session, K::RESOURCE, id, status)
            }
            _ => {
                let mut updated = current;
                updated.set_status(status);
                serde_json::to_value(&updated)
                    .map_err(|e| StoreError::Decode(e.to_string()))
                    .and_then(|body| self.store.update(self.session, K::RESOURCE, id, &body))
            }
        };

        self.finish_write("status", id, result, || K::status_message(status))
    }

    /// Sets occupancy payment. The payment date is today when paid, cleared otherwise.
    pub fn set_payment_status(&mut self, id: &str, status: PaymentStatus, today: NaiveDate) -> Notice {
        let Some(record) = self.find(id) else {
            return Notice::error("Permit not found.");
        };
        if K::payment(record).is_none() {
            return Notice::error("Payment status is not tracked for this table.");
        }

        let update = PaymentUpdate::new(status, today);
        let result = self.store.update_payment(self.session, id, &update);
        self.finish_write("payment", id, result, || {
            format!("Payment status updated to {}.", status.label())
        })
    }

    pub fn delete(&mut self, id: &str) -> Notice {
        if self.find(id).is_none() {
            return Notice::error("Permit not found.");
        }
        let result = self.store.delete(self.session, K::RESOURCE, id);
        self.finish_write("delete", id, result, || "Permit deleted.".to_string())
    }

    /// Creates the record, or updates `editing` when given.
    pub fn save(&mut self, record: &K::Record, editing: Option<&str>) -> Notice {
        let body = match serde_json::to_value(record) {
            Ok(v) => v,
            Err(e) => return Notice::error(format!("Could not encode permit: {e}")),
        };
        match editing {
            Some(id) => {
                if self.find(id).is_none() {
                    return Notice::error("Permit not found.");
                }
                let result = self.store.update(self.session, K::RESOURCE, id, &body);
                self.finish_write("update", id, result, || "Permit updated.".to_string())
            }
            None => {
                let result = self.store.create(self.session, K::RESOURCE, &body);
                self.finish_write("create", "-", result, || "Permit created.".to_string())
            }
        }
    }

    fn finish_write(
        &mut self,
        action: &str,
        id: &str,
        result: Result<(), StoreError>,
        success: impl FnOnce() -> String,
    ) -> Notice {
        match result {
            Ok(()) => {
                tracing::info!(kind = K::SLUG, action, id, "permit write ok");
                self.load();
                if let Some(refresh) = &self.on_refresh {
                    refresh();
                }
                Notice::success(success())
            }
            Err(e) => {
                tracing::warn!(kind = K::SLUG, action, id, error = %e, "permit write failed");
                Notice::error(e.user_message())
            }
        }
    }
}
