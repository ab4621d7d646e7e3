// src/tests/router_tests/permits_tests.rs
use std::sync::Arc;

use scraper::{Html, Selector};
use serde_json::{json, Value};

use crate::auth::Role;
use crate::errors::ServerError;
use crate::router::handle;
use crate::store::Resource;
use crate::tests::utils::{body_string, get, location, post, signed_in_cookie, test_app, MemoryStore};

fn row_ids(body: &str) -> Vec<String> {
    let doc = Html::parse_document(body);
    let sel = Selector::parse("tr[data-id]").unwrap();
    doc.select(&sel)
        .filter_map(|tr| tr.value().attr("data-id").map(str::to_string))
        .collect()
}

fn notice(body: &str, level: &str) -> Option<String> {
    let doc = Html::parse_document(body);
    let sel = Selector::parse(&format!(".notice-{level}")).unwrap();
    doc.select(&sel).next().map(|e| e.text().collect::<String>().trim().to_string())
}

fn bakery_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_business(vec![
        json!({"_id": "1", "owner_establishment": "Bakery", "status": "pending", "date_received": "2025-01-10"}),
        json!({"_id": "2", "owner_establishment": "Hardware", "status": "approved", "date_received": "2025-02-05"}),
        json!({"_id": "3", "owner_establishment": "Carinderia", "status": "rejected", "date_received": "2025-01-22"}),
    ]))
}

fn with_referer(mut req: astra::Request, referer: &'static str) -> astra::Request {
    req.headers_mut()
        .insert("Referer", http::HeaderValue::from_static(referer));
    req
}

#[test]
fn business_list_pages_in_fetch_order() -> Result<(), ServerError> {
    let records: Vec<Value> = (1..=12)
        .map(|i| json!({"_id": format!("b{i}"), "date_received": format!("2025-04-{i:02}")}))
        .collect();
    let app = test_app(Arc::new(MemoryStore::with_business(records)));
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    let first = body_string(handle(get("/permits/business", Some(&cookie)), &app)?);
    let ids = row_ids(&first);
    assert_eq!(ids.len(), 10);
    assert_eq!(ids[0], "b1");
    assert!(first.contains("Showing 1-10 of 12 records"));

    let second = body_string(handle(get("/permits/business?page=2", Some(&cookie)), &app)?);
    assert_eq!(row_ids(&second), vec!["b11", "b12"]);
    assert!(second.contains("Showing 11-12 of 12 records"));
    Ok(())
}

#[test]
fn month_filter_and_search_narrow_the_table() -> Result<(), ServerError> {
    let store = bakery_store();
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    let body = body_string(handle(get("/permits/business?month=1", Some(&cookie)), &app)?);
    assert_eq!(row_ids(&body), vec!["1", "3"]);

    let body = body_string(handle(get("/permits/business?q=bakery", Some(&cookie)), &app)?);
    assert_eq!(row_ids(&body), vec!["1"]);
    assert_eq!(store.calls().last().map(String::as_str), Some("search business bakery"));
    Ok(())
}

#[test]
fn occupancy_lists_approved_business_permits_only() -> Result<(), ServerError> {
    let app = test_app(bakery_store());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    let body = body_string(handle(get("/permits/occupancy", Some(&cookie)), &app)?);
    assert_eq!(row_ids(&body), vec!["2"]);
    assert!(!body.contains("New Permit"));
    Ok(())
}

#[test]
fn status_change_redirects_back_and_flashes_once() -> Result<(), ServerError> {
    let store = bakery_store();
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    let req = with_referer(
        post("/permits/business/1/status", Some(&cookie), "status=approved"),
        "http://localhost:8080/permits/business?month=1",
    );
    let resp = handle(req, &app)?;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/permits/business?month=1");
    assert_eq!(store.records(Resource::Business)[0]["status"], "approved");

    let body = body_string(handle(get("/permits/business", Some(&cookie)), &app)?);
    assert_eq!(notice(&body, "success").as_deref(), Some("Status updated to approved."));

    let again = body_string(handle(get("/permits/business", Some(&cookie)), &app)?);
    assert_eq!(notice(&again, "success"), None);
    Ok(())
}

#[test]
fn refused_write_is_reported_as_one_error_notice() -> Result<(), ServerError> {
    let store = bakery_store();
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);
    store.refuse_writes("Permit is locked");

    handle(post("/permits/business/2/status", Some(&cookie), "status=rejected"), &app)?;
    let body = body_string(handle(get("/permits/business", Some(&cookie)), &app)?);
    assert_eq!(notice(&body, "error").as_deref(), Some("Permit is locked"));
    assert_eq!(store.records(Resource::Business)[1]["status"], "approved");
    Ok(())
}

#[test]
fn occupancy_status_is_read_only() -> Result<(), ServerError> {
    let store = bakery_store();
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    handle(post("/permits/occupancy/2/status", Some(&cookie), "status=rejected"), &app)?;
    assert!(!store.calls().iter().any(|c| c.starts_with("update")));
    Ok(())
}

#[test]
fn occupancy_payment_records_todays_date() -> Result<(), ServerError> {
    let store = bakery_store();
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    let resp = handle(
        post("/permits/occupancy/2/payment", Some(&cookie), "payment_status_occupancy=paid"),
        &app,
    )?;
    assert_eq!(location(&resp), "/permits/occupancy");

    let record = &store.records(Resource::Business)[1];
    assert_eq!(record["payment_status_occupancy"], "paid");
    let today = crate::handlers::today().format("%Y-%m-%d").to_string();
    assert_eq!(record["last_payment_date_occupancy"], today.as_str());
    Ok(())
}

#[test]
fn occupancy_routes_ignore_permits_that_are_not_approved() -> Result<(), ServerError> {
    let store = bakery_store();
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    handle(
        post("/permits/occupancy/1/payment", Some(&cookie), "payment_status_occupancy=paid"),
        &app,
    )?;
    let body = body_string(handle(get("/permits/occupancy", Some(&cookie)), &app)?);
    assert_eq!(notice(&body, "error").as_deref(), Some("Permit not found."));
    assert_eq!(store.records(Resource::Business)[0]["payment_status_occupancy"], Value::Null);

    for req in [
        get("/permits/occupancy/1/edit", Some(&cookie)),
        post("/permits/occupancy/3/delete", Some(&cookie), ""),
        post("/permits/occupancy/3/delete", Some(&cookie), "confirm=yes"),
        post("/permits/occupancy/1", Some(&cookie), VALID_BUSINESS),
    ] {
        assert!(matches!(handle(req, &app), Err(ServerError::NotFound)));
    }
    assert!(!store
        .calls()
        .iter()
        .any(|c| c.starts_with("payment") || c.starts_with("update") || c.starts_with("delete")));
    assert_eq!(store.records(Resource::Business).len(), 3);
    Ok(())
}

#[test]
fn huge_page_number_renders_past_the_end() -> Result<(), ServerError> {
    let app = test_app(bakery_store());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    let resp = handle(get("/permits/business?page=18446744073709551615", Some(&cookie)), &app)?;
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(row_ids(&body).is_empty());
    assert!(body.contains("There are no records on this page."));
    assert!(!body.contains("No records found."));
    assert!(body.contains("is past the last page (1 of 3 records)"));
    Ok(())
}

#[test]
fn bad_status_value_is_a_bad_request() {
    let app = test_app(bakery_store());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);
    assert!(matches!(
        handle(post("/permits/business/1/status", Some(&cookie), "status=void"), &app),
        Err(ServerError::BadRequest(_))
    ));
}

#[test]
fn delete_asks_for_confirmation_first() -> Result<(), ServerError> {
    let store = Arc::new(MemoryStore::with_fsic(vec![
        json!({"_id": "f1", "business_name": "Sari-sari", "status": "pending"}),
    ]));
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "chief@bfp.ph", Role::Admin);

    let confirm = handle(post("/permits/fsic/f1/delete", Some(&cookie), ""), &app)?;
    assert_eq!(confirm.status(), 200);
    let doc = Html::parse_document(&body_string(confirm));
    let hidden = Selector::parse("input[name='confirm'][value='yes']").unwrap();
    assert_eq!(doc.select(&hidden).count(), 1);
    assert!(!store.calls().iter().any(|c| c.starts_with("delete")));

    let resp = handle(post("/permits/fsic/f1/delete", Some(&cookie), "confirm=yes"), &app)?;
    assert_eq!(location(&resp), "/permits/fsic");
    assert!(store.records(Resource::Fsic).is_empty());
    Ok(())
}

#[test]
fn missing_fields_rerender_the_form_with_messages() -> Result<(), ServerError> {
    let store = bakery_store();
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    let resp = handle(
        post("/permits/business", Some(&cookie), "owner_establishment=Bakery&fcode_fee=-5"),
        &app,
    )?;
    assert_eq!(resp.status(), 422);

    let doc = Html::parse_document(&body_string(resp));
    let msg = |field: &str| {
        let sel = Selector::parse(&format!(".field-message[data-field='{field}']")).unwrap();
        doc.select(&sel).count()
    };
    assert_eq!(msg("control_no"), 1);
    assert_eq!(msg("fcode_fee"), 1);
    assert_eq!(msg("owner_establishment"), 0);
    let kept = Selector::parse("input[name='owner_establishment'][value='Bakery']").unwrap();
    assert_eq!(doc.select(&kept).count(), 1);
    assert!(!store.calls().iter().any(|c| c.starts_with("create")));
    Ok(())
}

const VALID_BUSINESS: &str = "date_received=2025-03-01&control_no=C-77&owner_establishment=Panaderia\
&location=Poblacion&fcode_fee=1500&or_no=OR-9&evaluated_by=Insp.+Cruz\
&date_released_fsec=2025-03-05&status=pending";

#[test]
fn new_business_permit_is_created_and_flashed() -> Result<(), ServerError> {
    let store = bakery_store();
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    let form = handle(get("/permits/business/new", Some(&cookie)), &app)?;
    assert_eq!(form.status(), 200);

    let resp = handle(post("/permits/business", Some(&cookie), VALID_BUSINESS), &app)?;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/permits/business");

    let created = store.records(Resource::Business).pop().unwrap();
    assert_eq!(created["owner_establishment"], "Panaderia");
    assert_eq!(created["fcode_fee"], 1500.0);

    let body = body_string(handle(get("/permits/business", Some(&cookie)), &app)?);
    assert_eq!(notice(&body, "success").as_deref(), Some("Permit created."));
    Ok(())
}

#[test]
fn edit_form_is_prefilled_and_update_keeps_the_id() -> Result<(), ServerError> {
    let store = bakery_store();
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);

    let form = body_string(handle(get("/permits/business/1/edit", Some(&cookie)), &app)?);
    let doc = Html::parse_document(&form);
    let owner = Selector::parse("input[name='owner_establishment']").unwrap();
    let value = doc.select(&owner).next().and_then(|e| e.value().attr("value"));
    assert_eq!(value, Some("Bakery"));

    let resp = handle(post("/permits/business/1", Some(&cookie), VALID_BUSINESS), &app)?;
    assert_eq!(resp.status(), 303);
    let updated = &store.records(Resource::Business)[0];
    assert_eq!(updated["_id"], "1");
    assert_eq!(updated["owner_establishment"], "Panaderia");
    Ok(())
}

#[test]
fn occupancy_has_no_create_form() {
    let app = test_app(bakery_store());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);
    assert!(matches!(
        handle(get("/permits/occupancy/new", Some(&cookie)), &app),
        Err(ServerError::NotFound)
    ));
    assert!(matches!(
        handle(get("/permits/business/zzz/edit", Some(&cookie)), &app),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn unreachable_store_shows_load_failure() -> Result<(), ServerError> {
    let store = bakery_store();
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "clerk@bfp.ph", Role::Staff);
    store.fail_reads();

    let resp = handle(get("/permits/business", Some(&cookie)), &app)?;
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Could not load permits: The permit service could not be reached."));
    assert!(row_ids(&body).is_empty());
    assert!(!body.contains("No records found."));
    Ok(())
}
