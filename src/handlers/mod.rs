//! Request handlers, one module per area of the site.
use std::collections::HashMap;
use std::io::Read;

use astra::Request;
use url::form_urlencoded;

use crate::app::App;
use crate::auth::{sessions, Identity, Role, SessionContext};
use crate::errors::ServerError;
use crate::forms::{parse_form, FormFields};
use crate::listing::{KindSlug, Notice};

pub mod apply;
pub mod auth;
pub mod dashboard;
pub mod permits;

const MAX_FORM_BYTES: u64 = 64 * 1024;

pub fn now_unix() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn current_year() -> i32 {
    use chrono::Datelike;
    today().year()
}

pub fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

pub fn read_form(req: Request) -> Result<FormFields, ServerError> {
    let mut buf = Vec::new();
    req.into_body()
        .reader()
        .take(MAX_FORM_BYTES)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("could not read form: {e}")))?;
    Ok(parse_form(&buf))
}

/// One-shot notice for the next page this session renders.
pub fn flash(app: &App, session: &SessionContext, notice: &Notice) -> Result<(), ServerError> {
    match session.identity() {
        Some(me) => app
            .db
            .with_conn(|conn| sessions::set_flash(conn, me.session_id, notice)),
        None => Ok(()),
    }
}

pub fn take_flash(app: &App, session: &SessionContext) -> Result<Option<Notice>, ServerError> {
    match session.identity() {
        Some(me) => app
            .db
            .with_conn(|conn| sessions::take_flash(conn, me.session_id)),
        None => Ok(None),
    }
}

/// Undo the encoding used when ids are put in links.
pub fn decode_segment(seg: &str) -> String {
    form_urlencoded::parse(seg.as_bytes())
        .next()
        .map(|(k, _)| k.into_owned())
        .unwrap_or_default()
}

pub fn require_signed_in(session: &SessionContext) -> Result<&Identity, ServerError> {
    session
        .identity()
        .ok_or_else(|| ServerError::Unauthorized("sign in required".into()))
}

pub fn require_staff(session: &SessionContext) -> Result<&Identity, ServerError> {
    let me = require_signed_in(session)?;
    if me.role.is_staff() {
        Ok(me)
    } else {
        Err(ServerError::Forbidden("staff only".into()))
    }
}

pub fn require_admin(session: &SessionContext) -> Result<&Identity, ServerError> {
    let me = require_signed_in(session)?;
    if me.role == Role::Admin {
        Ok(me)
    } else {
        Err(ServerError::Forbidden("administrators only".into()))
    }
}

/// Staff may open business and occupancy; FSIC needs an administrator.
pub fn require_table(session: &SessionContext, kind: KindSlug) -> Result<&Identity, ServerError> {
    if kind.admin_only() {
        require_admin(session)
    } else {
        require_staff(session)
    }
}
