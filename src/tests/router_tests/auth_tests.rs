// src/tests/router_tests/auth_tests.rs
use std::sync::Arc;

use crate::auth::Role;
use crate::errors::ServerError;
use crate::router::{handle, respond};
use crate::tests::utils::{body_string, get, location, post, signed_in_cookie, test_app, MemoryStore};

fn store() -> Arc<MemoryStore> {
    Arc::new(
        MemoryStore::default()
            .with_user("chief@bfp.ph", "secret", Role::Admin)
            .with_user("clerk@bfp.ph", "secret", Role::Staff)
            .with_user("juan@mail.ph", "secret", Role::Citizen),
    )
}

#[test]
fn anonymous_root_goes_to_login() -> Result<(), ServerError> {
    let app = test_app(store());
    let resp = handle(get("/", None), &app)?;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/login");
    Ok(())
}

#[test]
fn sign_in_lands_by_role_and_sets_cookie() -> Result<(), ServerError> {
    let app = test_app(store());

    for (email, landing) in [
        ("chief%40bfp.ph", "/admin"),
        ("clerk%40bfp.ph", "/dashboard"),
        ("juan%40mail.ph", "/home"),
    ] {
        let resp = handle(post("/login", None, &format!("email={email}&password=secret")), &app)?;
        assert_eq!(resp.status(), 303);
        assert_eq!(location(&resp), landing);

        let cookie = resp
            .headers()
            .get("Set-Cookie")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .split(';')
            .next()
            .unwrap_or("")
            .to_string();
        assert!(cookie.starts_with("session="));

        // The cookie opens the landing page it was sent to.
        let page = handle(get(landing, Some(&cookie)), &app)?;
        assert_eq!(page.status(), 200);
    }
    Ok(())
}

#[test]
fn wrong_password_rerenders_login_with_message() -> Result<(), ServerError> {
    let app = test_app(store());
    let resp = handle(post("/login", None, "email=chief%40bfp.ph&password=nope"), &app)?;
    assert_eq!(resp.status(), 401);

    let body = body_string(resp);
    assert!(body.contains("Invalid email or password."));
    assert!(body.contains("chief@bfp.ph"), "email is kept in the form");
    Ok(())
}

#[test]
fn empty_fields_never_reach_the_auth_service() -> Result<(), ServerError> {
    let store = store();
    let app = test_app(store.clone());
    let resp = handle(post("/login", None, "email=&password="), &app)?;
    assert_eq!(resp.status(), 401);
    assert!(store.calls().is_empty());
    Ok(())
}

#[test]
fn signed_in_login_page_redirects_to_landing() -> Result<(), ServerError> {
    let app = test_app(store());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);
    let resp = handle(get("/login", Some(&cookie)), &app)?;
    assert_eq!(location(&resp), "/dashboard");
    Ok(())
}

#[test]
fn logout_revokes_session_and_clears_cookie() -> Result<(), ServerError> {
    let store = store();
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    let resp = handle(post("/logout", Some(&cookie), ""), &app)?;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/login");
    let set_cookie = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(store.calls(), vec!["logout clerk@bfp.ph"]);

    assert!(matches!(
        handle(get("/dashboard", Some(&cookie)), &app),
        Err(ServerError::Unauthorized(_))
    ));
    Ok(())
}

#[test]
fn unauthorized_pages_redirect_through_error_response() {
    let app = test_app(store());
    let resp = respond(get("/permits/business", None), &app);
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/login");
}

#[test]
fn unknown_cookie_is_anonymous() -> Result<(), ServerError> {
    let app = test_app(store());
    let resp = handle(get("/", Some("session=forged")), &app)?;
    assert_eq!(location(&resp), "/login");
    Ok(())
}
