use forms::application::open_new_application;
use forms::job_order::open_job_order;
use forms::lookups::{JobOrderLookups, VisitLookups};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, Role};

use crate::common::MockBackend;

#[tokio::test]
async fn job_order_lookups_load_every_list() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);

    let lookups = JobOrderLookups::fetch(&ctx.api).await.unwrap();

    assert_eq!(lookups.address.regions.len(), 2);
    assert_eq!(lookups.address.cities.len(), 3);
    assert_eq!(lookups.network.naps.len(), 2);
    assert_eq!(lookups.network.ports.len(), 3);
    assert_eq!(lookups.usage_types.len(), 2);
    assert_eq!(lookups.inventory_items.len(), 2);
    assert_eq!(lookups.groups[0].name, "Rizal East");
}

#[tokio::test]
async fn technician_list_excludes_office_staff() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Office);

    let lookups = VisitLookups::fetch(&ctx.api).await.unwrap();

    let emails: Vec<_> = lookups.technicians.iter().map(|t| t.email.as_str()).collect();
    assert_eq!(emails, vec!["jun@isp.example", "leo@isp.example"]);
}

#[tokio::test]
async fn port_options_follow_the_selected_nap() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = open_job_order(&ctx, 7).await.unwrap();

    assert!(
        session.form().port_options().is_empty(),
        "no ports before an LCP-NAP is picked"
    );
    assert_eq!(session.form().lcpnap_options(), vec!["LCP1-NAP1", "LCP1-NAP2"]);

    let form = session.form_mut();
    form.network.set_lcpnap("LCP1-NAP1");
    form.network.set_port("PORT 032");
    assert_eq!(form.port_options(), vec!["PORT 001", "PORT 032"]);

    form.network.set_lcpnap("LCP1-NAP2");
    assert_eq!(form.network.port, "", "changing the NAP clears the port");
    assert_eq!(form.port_options(), vec!["PORT 001"]);
}

#[tokio::test]
async fn failed_lookup_fails_the_open() {
    let backend = MockBackend::start().await;
    backend.fail(
        "GET /plans",
        500,
        json!({ "success": false, "message": "Plans table missing" }),
    );
    let ctx = backend.context(Role::Office);

    let err = open_new_application(&ctx)
        .await
        .expect_err("a failed lookup should abort opening the form");

    assert_eq!(err.kind, AppErrorKind::ServerError);
    assert_eq!(err.message, "Plans table missing");
}

#[tokio::test]
async fn lookups_are_fetched_with_the_session_token() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Office);

    open_new_application(&ctx).await.unwrap();

    let tokens = backend.tokens();
    assert!(!tokens.is_empty());
    assert!(tokens
        .iter()
        .all(|t| t.as_deref() == Some("Bearer test-token")));
}

#[tokio::test]
async fn nested_location_endpoints_return_only_children() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Office);

    let cities = ctx.api.cities_in_region(1).await.unwrap();
    let names: Vec<_> = cities.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Binangonan", "Angono"]);

    let barangays = ctx.api.barangays_in_city(11).await.unwrap();
    assert_eq!(barangays.len(), 1);
    assert_eq!(barangays[0].name, "Poblacion");
}
