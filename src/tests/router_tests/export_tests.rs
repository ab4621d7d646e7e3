// src/tests/router_tests/export_tests.rs
use std::io::Read;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::auth::Role;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{get, signed_in_cookie, test_app, MemoryStore};

fn header<'a>(resp: &'a astra::Response, name: &str) -> &'a str {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[test]
fn export_sends_a_workbook_of_every_match() -> Result<(), ServerError> {
    let records: Vec<Value> = (1..=25)
        .map(|i| json!({"_id": i.to_string(), "date_applied": "2025-03-01", "status": "approved"}))
        .collect();
    let app = test_app(Arc::new(MemoryStore::with_fsic(records)));
    let cookie = signed_in_cookie(&app, "chief@bfp.ph", Role::Admin);

    let resp = handle(get("/permits/fsic/export?status=approved&page=3", Some(&cookie)), &app)?;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        header(&resp, "Content-Type"),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        header(&resp, "Content-Disposition"),
        "attachment; filename=\"FSIC_Permits_Report.xlsx\""
    );

    let mut bytes = Vec::new();
    resp.into_body().reader().read_to_end(&mut bytes).unwrap();
    assert!(bytes.starts_with(b"PK"));
    Ok(())
}

#[test]
fn export_fails_loudly_when_the_store_is_down() {
    let store = Arc::new(MemoryStore::with_business(vec![]));
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);
    store.fail_reads();

    let res = handle(get("/permits/occupancy/export", Some(&cookie)), &app);
    assert!(matches!(res, Err(ServerError::Store(_))));
}
