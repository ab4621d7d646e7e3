// src/tests/router_tests/apply_tests.rs
use std::sync::Arc;

use scraper::{Html, Selector};

use crate::auth::Role;
use crate::errors::ServerError;
use crate::router::handle;
use crate::store::Resource;
use crate::tests::utils::{body_string, get, post, signed_in_cookie, test_app, MemoryStore};

const FSIC_APPLICATION: &str = "date_applied=2025-05-02&contact_number=09171234567\
&business_name=Sari-sari&owner=Ana+Reyes&brgy=Poblacion&complete_address=1+Rizal+St\
&floor_area=40&no_of_storeys=1&rental=No&nature_of_business=Retail&bir_tin=123-456\
&expiry=2026-05-02&type_of_occupancy=Mercantile&amount_paid=500&or_number=OR-1\
&status=approved";

#[test]
fn application_form_is_public() -> Result<(), ServerError> {
    let app = test_app(Arc::new(MemoryStore::default()));
    let resp = handle(get("/apply/fsic", None), &app)?;
    assert_eq!(resp.status(), 200);

    let doc = Html::parse_document(&body_string(resp));
    let sel = Selector::parse("form[action='/apply/fsic'] [name='business_name']").unwrap();
    assert_eq!(doc.select(&sel).count(), 1);
    Ok(())
}

#[test]
fn submitted_application_starts_pending() -> Result<(), ServerError> {
    let store = Arc::new(MemoryStore::default());
    let app = test_app(store.clone());
    let cookie = signed_in_cookie(&app, "juan@mail.ph", Role::Citizen);

    let resp = handle(post("/apply/fsic", Some(&cookie), FSIC_APPLICATION), &app)?;
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Application submitted"));

    let created = store.records(Resource::Fsic);
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["business_name"], "Sari-sari");
    assert_eq!(created[0]["status"], "pending");
    Ok(())
}

#[test]
fn incomplete_application_is_not_sent() -> Result<(), ServerError> {
    let store = Arc::new(MemoryStore::default());
    let app = test_app(store.clone());

    let resp = handle(post("/apply/business", None, "owner_establishment=Bakery"), &app)?;
    assert_eq!(resp.status(), 422);
    assert!(store.calls().is_empty());
    Ok(())
}

#[test]
fn refused_application_keeps_the_form() -> Result<(), ServerError> {
    let store = Arc::new(MemoryStore::default());
    let app = test_app(store.clone());
    store.refuse_writes("Duplicate OR number");

    let resp = handle(post("/apply/fsic", None, FSIC_APPLICATION), &app)?;
    let body = body_string(resp);
    assert!(body.contains("There was an error submitting your application. Duplicate OR number"));
    assert!(body.contains("Sari-sari"));
    Ok(())
}
