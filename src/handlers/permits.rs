//! Staff tables: list, export, forms and row actions, generic over the table kind.
use std::collections::HashMap;

use astra::Request;

use crate::app::App;
use crate::auth::SessionContext;
use crate::domain::{PaymentStatus, PermitStatus};
use crate::errors::ServerError;
use crate::forms::{fields_of, DraftKind, FieldErrors, FormFields};
use crate::handlers::{current_year, flash, read_form, take_flash, today};
use crate::listing::{FilterConfig, ListController, ListKind, LoadOutcome, Notice, Occupancy};
use crate::responses::{html_response, html_response_with_status, redirect, ResultResp};
use crate::spreadsheets::export_permits_xlsx;
use crate::templates::pages::{confirm_delete_page, list_page, permit_form_page, FormVm, ListPageVm};

fn controller<'a, K: ListKind>(app: &'a App, session: &'a SessionContext) -> ListController<'a, K> {
    ListController::new(app.store.as_ref(), session, &app.transitions)
        .with_page_size(app.config.lists.page_size)
        .on_refresh(move || app.stats.invalidate())
}

/// Search, filters and page from the query string.
fn load_view<'a, K: ListKind>(
    app: &'a App,
    session: &'a SessionContext,
    params: &HashMap<String, String>,
) -> ListController<'a, K> {
    let mut ctl = controller::<K>(app, session);
    ctl.search(params.get("q").map(String::as_str).unwrap_or(""));
    ctl.set_filters(FilterConfig::from_params(params));
    ctl.set_page(params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1));
    ctl
}

fn list_href<K: ListKind>() -> String {
    format!("/permits/{}", K::SLUG)
}

/// Where to go after a row action: the list page the user came from.
fn back<K: ListKind>(referer: Option<&str>) -> String {
    let list = list_href::<K>();
    referer
        .and_then(|r| url::Url::parse(r).ok())
        .filter(|u| u.path() == list)
        .map(|u| match u.query() {
            Some(q) => format!("{list}?{q}"),
            None => list.clone(),
        })
        .unwrap_or(list)
}

fn load_failed_notice(outcome: &LoadOutcome) -> Option<Notice> {
    match outcome {
        LoadOutcome::Failed(e) => Some(Notice::error(format!(
            "Could not load permits: {}",
            e.user_message()
        ))),
        LoadOutcome::Loaded(_) => None,
    }
}

pub fn list<K: ListKind>(app: &App, session: &SessionContext, params: &HashMap<String, String>) -> ResultResp {
    let ctl = load_view::<K>(app, session, params);
    let year = current_year();
    let vm = ListPageVm::<K> {
        view: ctl.view(year),
        outcome: ctl.outcome(),
        query: ctl.query(),
        filters: *ctl.filters(),
        notice: take_flash(app, session)?,
        current_year: year,
    };
    html_response(list_page::<K>(session, &vm))
}

/// Spreadsheet of every matching record, not just the visible page.
pub fn export<K: ListKind>(app: &App, session: &SessionContext, params: &HashMap<String, String>) -> ResultResp {
    let ctl = load_view::<K>(app, session, params);
    if let Some(LoadOutcome::Failed(e)) = ctl.outcome() {
        return Err(ServerError::Store(e.clone()));
    }
    export_permits_xlsx(&K::EXPORT, &ctl.export_rows(current_year()))
}

fn form_vm<K: DraftKind>(editing: Option<&str>, values: FormFields, errors: FieldErrors, notice: Option<Notice>) -> FormVm {
    let (title, action) = match editing {
        Some(id) => (
            format!("Update {}", K::TITLE),
            format!("{}/{}", list_href::<K>(), urlencode(id)),
        ),
        None => (format!("New {}", K::TITLE), list_href::<K>()),
    };
    FormVm {
        title,
        action,
        cancel_href: list_href::<K>(),
        specs: K::staff_fields(),
        values,
        errors,
        notice,
        submit_label: if editing.is_some() { "Update" } else { "Create" },
    }
}

fn urlencode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

pub fn new_form<K: DraftKind>(session: &SessionContext) -> ResultResp {
    if !K::CREATABLE {
        return Err(ServerError::NotFound);
    }
    let vm = form_vm::<K>(None, FormFields::new(), FieldErrors::default(), None);
    html_response(permit_form_page(session, &vm))
}

pub fn edit_form<K: DraftKind>(app: &App, session: &SessionContext, id: &str) -> ResultResp {
    let mut ctl = controller::<K>(app, session);
    if let LoadOutcome::Failed(e) = ctl.load() {
        return Err(ServerError::Store(e.clone()));
    }
    let record = ctl.find(id).ok_or(ServerError::NotFound)?;
    let vm = form_vm::<K>(Some(id), fields_of(record), FieldErrors::default(), None);
    html_response(permit_form_page(session, &vm))
}

/// `POST /permits/{kind}` and `POST /permits/{kind}/{id}`.
pub fn save<K: DraftKind>(app: &App, session: &SessionContext, editing: Option<&str>, req: Request) -> ResultResp {
    if editing.is_none() && !K::CREATABLE {
        return Err(ServerError::NotFound);
    }
    let form = read_form(req)?;
    let mut ctl = controller::<K>(app, session);

    let base = match editing {
        Some(id) => {
            if let Some(notice) = load_failed_notice(ctl.load()) {
                let vm = form_vm::<K>(editing, form, FieldErrors::default(), Some(notice));
                return html_response_with_status(502, permit_form_page(session, &vm));
            }
            Some(ctl.find(id).cloned().ok_or(ServerError::NotFound)?)
        }
        None => None,
    };

    let record = match K::draft(&form, base.as_ref(), today()) {
        Ok(r) => r,
        Err(errors) => {
            let vm = form_vm::<K>(editing, form, errors, None);
            return html_response_with_status(422, permit_form_page(session, &vm));
        }
    };

    let notice = ctl.save(&record, editing);
    if notice.is_error() {
        let vm = form_vm::<K>(editing, form, FieldErrors::default(), Some(notice));
        return html_response(permit_form_page(session, &vm));
    }
    flash(app, session, &notice)?;
    redirect(&list_href::<K>())
}

pub fn set_status<K: ListKind>(
    app: &App,
    session: &SessionContext,
    id: &str,
    referer: Option<&str>,
    req: Request,
) -> ResultResp {
    let form = read_form(req)?;
    let status: PermitStatus = form
        .get("status")
        .ok_or_else(|| ServerError::BadRequest("missing status".into()))?
        .parse()
        .map_err(ServerError::BadRequest)?;

    let mut ctl = controller::<K>(app, session);
    let notice = match load_failed_notice(ctl.load()) {
        Some(n) => n,
        None => ctl.set_status(id, status),
    };
    flash(app, session, &notice)?;
    redirect(&back::<K>(referer))
}

pub fn set_payment(
    app: &App,
    session: &SessionContext,
    id: &str,
    referer: Option<&str>,
    req: Request,
) -> ResultResp {
    let form = read_form(req)?;
    let status: PaymentStatus = form
        .get("payment_status_occupancy")
        .ok_or_else(|| ServerError::BadRequest("missing payment status".into()))?
        .parse()
        .map_err(ServerError::BadRequest)?;

    let mut ctl = controller::<Occupancy>(app, session);
    let notice = match load_failed_notice(ctl.load()) {
        Some(n) => n,
        None => ctl.set_payment_status(id, status, today()),
    };
    flash(app, session, &notice)?;
    redirect(&back::<Occupancy>(referer))
}

/// Without `confirm=yes` this shows the confirmation page instead.
pub fn delete<K: ListKind>(
    app: &App,
    session: &SessionContext,
    id: &str,
    referer: Option<&str>,
    req: Request,
) -> ResultResp {
    let form = read_form(req)?;
    let mut ctl = controller::<K>(app, session);
    if let LoadOutcome::Failed(e) = ctl.load() {
        return Err(ServerError::Store(e.clone()));
    }
    let record = ctl.find(id).ok_or(ServerError::NotFound)?;

    if form.get("confirm").map(String::as_str) != Some("yes") {
        return html_response(confirm_delete_page::<K>(session, record));
    }

    let notice = ctl.delete(id);
    flash(app, session, &notice)?;
    redirect(&back::<K>(referer))
}
