// src/tests/router_tests/admin_tests.rs
use std::sync::Arc;

use scraper::{Html, Selector};
use serde_json::json;

use crate::auth::Role;
use crate::errors::ServerError;
use crate::router::{handle, respond};
use crate::tests::utils::{body_string, get, signed_in_cookie, test_app, MemoryStore};

fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_business(vec![
        json!({"_id": "1", "status": "pending"}),
        json!({"_id": "2", "status": "approved"}),
        json!({"_id": "3", "status": "approved"}),
        json!({"_id": "4", "status": "rejected"}),
    ]))
}

fn stat(doc: &Html, class: &str) -> String {
    let sel = Selector::parse(&format!(".{class} .stat-value")).unwrap();
    doc.select(&sel)
        .next()
        .map(|e| e.text().collect())
        .unwrap_or_default()
}

#[test]
fn admin_dashboard_counts_business_permits() -> Result<(), ServerError> {
    let app = test_app(store());
    let cookie = signed_in_cookie(&app, "chief@bfp.ph", Role::Admin);

    let resp = handle(get("/admin", Some(&cookie)), &app)?;
    assert_eq!(resp.status(), 200);
    let doc = Html::parse_document(&body_string(resp));
    assert_eq!(stat(&doc, "stat-total"), "4");
    assert_eq!(stat(&doc, "stat-pending"), "1");
    assert_eq!(stat(&doc, "stat-approved"), "2");
    assert_eq!(stat(&doc, "stat-rejected"), "1");

    let links = Selector::parse(".card a[href^='/permits/']").unwrap();
    assert_eq!(doc.select(&links).count(), 3);
    Ok(())
}

#[test]
fn dashboard_counts_are_cached_until_a_write() -> Result<(), ServerError> {
    let store = store();
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "chief@bfp.ph", Role::Admin);

    handle(get("/admin", Some(&cookie)), &app)?;
    handle(get("/admin", Some(&cookie)), &app)?;
    assert_eq!(store.calls(), vec!["fetch business"]);

    app.stats.invalidate();
    handle(get("/admin", Some(&cookie)), &app)?;
    assert_eq!(store.calls().len(), 2);
    Ok(())
}

#[test]
fn staff_dashboard_hides_fsic() -> Result<(), ServerError> {
    let app = test_app(store());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    let body = body_string(handle(get("/dashboard", Some(&cookie)), &app)?);
    assert!(body.contains("/permits/business"));
    assert!(!body.contains("/permits/fsic"));
    Ok(())
}

#[test]
fn staff_cannot_open_admin_pages_or_fsic() {
    let app = test_app(store());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    assert!(matches!(
        handle(get("/admin", Some(&cookie)), &app),
        Err(ServerError::Forbidden(_))
    ));
    assert!(matches!(
        handle(get("/permits/fsic", Some(&cookie)), &app),
        Err(ServerError::Forbidden(_))
    ));
    assert_eq!(respond(get("/permits/fsic", Some(&cookie)), &app).status(), 403);
}

#[test]
fn citizens_cannot_open_staff_tables() {
    let app = test_app(store());
    let cookie = signed_in_cookie(&app, "juan@mail.ph", Role::Citizen);

    for path in ["/dashboard", "/permits/business", "/permits/occupancy/export"] {
        assert!(
            matches!(handle(get(path, Some(&cookie)), &app), Err(ServerError::Forbidden(_))),
            "{path}"
        );
    }
    let home = handle(get("/home", Some(&cookie)), &app).unwrap();
    assert_eq!(home.status(), 200);
}

#[test]
fn unknown_table_is_not_found() {
    let app = test_app(store());
    let cookie = signed_in_cookie(&app, "chief@bfp.ph", Role::Admin);
    assert!(matches!(
        handle(get("/permits/inspections", Some(&cookie)), &app),
        Err(ServerError::NotFound)
    ));
    assert_eq!(respond(get("/nowhere", Some(&cookie)), &app).status(), 404);
}
