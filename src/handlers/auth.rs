use astra::Request;

use crate::app::App;
use crate::auth::boundary::{clear_cookie_header, session_cookie_header};
use crate::auth::{Landing, SessionContext, SignIn};
use crate::handlers::{now_unix, read_form};
use crate::responses::{html_response, html_response_with_status, redirect, redirect_with_cookie, ResultResp};
use crate::templates::pages::login_page;

/// `GET /`: send the session to its landing page.
pub fn root(session: &SessionContext) -> ResultResp {
    redirect(Landing::for_session(session).path())
}

pub fn login_form(session: &SessionContext) -> ResultResp {
    match Landing::for_session(session) {
        Landing::Login => html_response(login_page("", None)),
        signed_in => redirect(signed_in.path()),
    }
}

pub fn login_submit(app: &App, req: Request) -> ResultResp {
    let form = read_form(req)?;
    let email = form.get("email").map(String::as_str).unwrap_or("").trim();
    let password = form.get("password").map(String::as_str).unwrap_or("");

    match app.sessions.sign_in(email, password, now_unix())? {
        SignIn::Granted { cookie, identity } => {
            let landing = Landing::for_session(&SessionContext::signed_in(identity));
            let header = session_cookie_header(&cookie, app.config.server.session_ttl_secs);
            redirect_with_cookie(landing.path(), &header)
        }
        SignIn::Refused(message) => html_response_with_status(401, login_page(email, Some(&message))),
    }
}

pub fn logout(app: &App, session: &SessionContext) -> ResultResp {
    app.sessions.sign_out(session, now_unix())?;
    redirect_with_cookie("/login", &clear_cookie_header())
}
