use astra::Request;

use crate::app::App;
use crate::errors::ServerError;
use crate::handlers::apply::Application;
use crate::handlers::{
    apply, auth, dashboard, decode_segment, now_unix, parse_query, permits, require_table,
};
use crate::listing::{Business, Fsic, KindSlug, Occupancy};
use crate::responses::{error_response, ResultResp};

/// Calls a handler generic over the table kind named in the URL.
macro_rules! with_kind {
    ($kind:expr, $handler:ident ( $($arg:expr),* $(,)? )) => {
        match $kind {
            KindSlug::Business => permits::$handler::<Business>($($arg),*),
            KindSlug::Occupancy => permits::$handler::<Occupancy>($($arg),*),
            KindSlug::Fsic => permits::$handler::<Fsic>($($arg),*),
        }
    };
}

fn kind(slug: &str) -> Result<KindSlug, ServerError> {
    slug.parse().map_err(|_| ServerError::NotFound)
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let cookie = req
        .headers()
        .get("Cookie")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let referer = req
        .headers()
        .get("Referer")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let session = app.sessions.resolve(cookie.as_deref(), now_unix())?;

    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let params = parse_query(&req);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    tracing::debug!(%method, %path, role = ?session.role(), "request");

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => auth::root(&session),
        ("GET", ["login"]) => auth::login_form(&session),
        ("POST", ["login"]) => auth::login_submit(app, req),
        ("POST", ["logout"]) => auth::logout(app, &session),

        ("GET", ["admin"]) => dashboard::admin_dashboard(app, &session),
        ("GET", ["dashboard"]) => dashboard::staff_dashboard(app, &session),
        ("GET", ["home"]) => dashboard::citizen_home(&session),

        ("GET", ["apply", "business"]) => apply::form(&session, Application::Business),
        ("POST", ["apply", "business"]) => apply::submit(app, &session, Application::Business, req),
        ("GET", ["apply", "fsic"]) => apply::form(&session, Application::Fsic),
        ("POST", ["apply", "fsic"]) => apply::submit(app, &session, Application::Fsic, req),

        ("GET", ["permits", slug]) => {
            let k = kind(slug)?;
            require_table(&session, k)?;
            with_kind!(k, list(app, &session, &params))
        }
        ("GET", ["permits", slug, "export"]) => {
            let k = kind(slug)?;
            require_table(&session, k)?;
            with_kind!(k, export(app, &session, &params))
        }
        ("GET", ["permits", slug, "new"]) => {
            let k = kind(slug)?;
            require_table(&session, k)?;
            with_kind!(k, new_form(&session))
        }
        ("POST", ["permits", slug]) => {
            let k = kind(slug)?;
            require_table(&session, k)?;
            with_kind!(k, save(app, &session, None, req))
        }
        ("GET", ["permits", slug, id, "edit"]) => {
            let k = kind(slug)?;
            require_table(&session, k)?;
            let id = decode_segment(id);
            with_kind!(k, edit_form(app, &session, &id))
        }
        ("POST", ["permits", slug, id]) => {
            let k = kind(slug)?;
            require_table(&session, k)?;
            let id = decode_segment(id);
            with_kind!(k, save(app, &session, Some(&id), req))
        }
        ("POST", ["permits", "occupancy", id, "payment"]) => {
            require_table(&session, KindSlug::Occupancy)?;
            let id = decode_segment(id);
            permits::set_payment(app, &session, &id, referer.as_deref(), req)
        }
        ("POST", ["permits", slug, id, "status"]) => {
            let k = kind(slug)?;
            require_table(&session, k)?;
            let id = decode_segment(id);
            with_kind!(k, set_status(app, &session, &id, referer.as_deref(), req))
        }
        ("POST", ["permits", slug, id, "delete"]) => {
            let k = kind(slug)?;
            require_table(&session, k)?;
            let id = decode_segment(id);
            with_kind!(k, delete(app, &session, &id, referer.as_deref(), req))
        }

        _ => Err(ServerError::NotFound),
    }
}

/// Entry point for the server loop: errors become pages.
pub fn respond(req: Request, app: &App) -> astra::Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => {
            if err.status_code() >= 500 {
                tracing::error!(%method, %path, error = %err, "request failed");
            } else {
                tracing::info!(%method, %path, error = %err, "request refused");
            }
            error_response(&err)
        }
    }
}
