use chrono::NaiveDate;
use forms::fields::CrewFields;
use forms::job_order::open_job_order;
use forms::line_items::ItemRow;
use forms::{FormPhase, OutcomeLevel};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{ConnectionType, JobOrderImage, OnsiteStatus, Role};

use crate::common::MockBackend;

/// Fill job order 7 as a finished fiber installation that swaps the stored
/// drop cable row for two connectors.
async fn finished_install(
    backend: &MockBackend,
) -> forms::FormSession<forms::job_order::JobOrderForm> {
    let ctx = backend.context(Role::Technician);
    let mut session = open_job_order(&ctx, 7).await.expect("job order should load");
    let form = session.form_mut();
    form.onsite_status = Some(OnsiteStatus::Done);
    form.connection_type = Some(ConnectionType::Fiber);
    form.date_installed = NaiveDate::from_ymd_opt(2024, 6, 3);
    form.usage_type = "Residential".to_string();
    form.coordinates = "14.4650, 121.1920".to_string();
    form.router_model = "HG8145V5".to_string();
    form.modem_sn = "4857544312AB".to_string();
    form.network.set_lcpnap("LCP1-NAP1");
    form.network.set_port("PORT 001");
    form.network.set_vlan("100");
    form.crew = CrewFields::from_parts(Some("Jun Reyes"), Some("Leo Cruz"), Some("None"));
    form.onsite_remarks = "Installed and tested".to_string();
    form.items = vec![ItemRow::new("Connector", 2)];
    for slot in JobOrderImage::REQUIRED_ON_DONE {
        form.photos.attach(slot, "photo.jpg", vec![0xff, 0xd8, 0xff]);
    }
    session
}

#[tokio::test]
async fn finished_install_runs_every_step_in_order() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = finished_install(&backend).await;
    backend.clear_calls();

    let mut saved = None;
    let phase = session.save(&ctx, |jo| saved = Some(jo.clone())).await;

    assert_eq!(phase, FormPhase::Closed, "Banner: {:?}", session.banner());
    assert_eq!(
        backend.writes(),
        vec![
            "PUT /job-orders/7",
            "POST /job-orders/7/create-radius-account",
            "POST /job-orders/7/upload-images",
            "POST /job-order-items",
            "DELETE /job-order-items/1",
        ]
    );

    let saved = saved.expect("on_save should receive the job order");
    assert_eq!(saved.pppoe_username.as_deref(), Some("jo7@fiber"));
    assert_eq!(
        saved.images.get(JobOrderImage::Setup),
        Some("https://cdn.test/job-orders/7/setup_image.jpg")
    );

    let items = backend.rows("job-order-items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item_name"], "Connector");
    assert_eq!(items[0]["quantity"], 2);

    // The upload endpoint stores the URLs itself; no second PUT is sent.
    let reloaded = ctx.api.get_job_order(7).await.unwrap();
    assert_eq!(
        reloaded.images.get(JobOrderImage::Setup),
        Some("https://cdn.test/job-orders/7/setup_image.jpg")
    );
    assert_eq!(reloaded.pppoe_username.as_deref(), Some("jo7@fiber"));
}

#[tokio::test]
async fn fiber_install_sends_network_fields_and_clears_ip() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = finished_install(&backend).await;

    session.save(&ctx, |_| {}).await;

    let body = backend
        .body_of("PUT /job-orders/7")
        .expect("job order update should be recorded");
    assert_eq!(body["onsite_status"], "Done");
    assert_eq!(body["connection_type"], "Fiber");
    assert_eq!(body["lcpnap"], "LCP1-NAP1");
    assert_eq!(body["port"], "PORT 001");
    assert_eq!(body["vlan"], "100");
    assert_eq!(body["ip"], json!(null));
    assert_eq!(body["date_installed"], "2024-06-03");
    assert_eq!(body["updated_by"], "jun@isp.example");
}

#[tokio::test]
async fn failed_update_stops_before_radius_photos_and_items() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = finished_install(&backend).await;
    backend.fail(
        "PUT /job-orders/7",
        500,
        json!({ "success": false, "message": "Database unavailable" }),
    );
    backend.clear_calls();

    let phase = session.save(&ctx, |_| panic!("on_save must not run")).await;

    assert_eq!(phase, FormPhase::Idle);
    assert_eq!(backend.writes(), vec!["PUT /job-orders/7"]);
    assert_eq!(session.banner().len(), 1);
    assert_eq!(session.banner()[0].level, OutcomeLevel::Error);
    assert_eq!(
        session.banner()[0].message,
        "Failed to update job order: Database unavailable"
    );
    assert_eq!(backend.rows("job-order-items").len(), 1, "stored items untouched");
}

#[tokio::test]
async fn existing_radius_account_is_a_warning_not_a_call() {
    let backend = MockBackend::start().await;
    backend.patch("job-orders", 7, json!({ "pppoe_username": "maria@fiber" }));
    let ctx = backend.context(Role::Technician);
    let mut session = finished_install(&backend).await;
    backend.clear_calls();

    let phase = session.save(&ctx, |_| {}).await;

    assert_eq!(phase, FormPhase::Closed, "warnings do not block closing");
    assert!(!backend
        .writes()
        .contains(&"POST /job-orders/7/create-radius-account".to_string()));
    assert!(session.banner().iter().any(|o| {
        o.level == OutcomeLevel::Warning && o.message == "RADIUS account already exists (maria@fiber)"
    }));
}

#[tokio::test]
async fn radius_conflict_from_backend_is_a_warning() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = finished_install(&backend).await;
    backend.fail(
        "POST /job-orders/7/create-radius-account",
        409,
        json!({ "success": false, "message": "Username taken" }),
    );

    let phase = session.save(&ctx, |_| {}).await;

    assert_eq!(phase, FormPhase::Closed);
    assert!(session
        .banner()
        .iter()
        .any(|o| o.level == OutcomeLevel::Warning && o.message.contains("Username taken")));
}

#[tokio::test]
async fn radius_failure_skips_photos_and_items() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = finished_install(&backend).await;
    backend.fail(
        "POST /job-orders/7/create-radius-account",
        502,
        json!({ "success": false, "message": "RADIUS server unreachable" }),
    );
    backend.clear_calls();

    let phase = session.save(&ctx, |_| {}).await;

    assert_eq!(phase, FormPhase::Idle);
    assert_eq!(
        backend.writes(),
        vec!["PUT /job-orders/7", "POST /job-orders/7/create-radius-account"]
    );
}

#[tokio::test]
async fn unchanged_items_make_no_item_writes() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = open_job_order(&ctx, 7).await.unwrap();
    session.form_mut().onsite_status = Some(OnsiteStatus::InProgress);
    assert_eq!(
        session.form().items,
        vec![ItemRow::new("Drop cable", 100)],
        "stored rows are loaded into the form"
    );
    backend.clear_calls();

    let phase = session.save(&ctx, |_| {}).await;

    assert_eq!(phase, FormPhase::Closed, "Banner: {:?}", session.banner());
    assert_eq!(backend.writes(), vec!["PUT /job-orders/7"]);
    assert_eq!(backend.rows("job-order-items")[0]["id"], 1);
}

#[tokio::test]
async fn item_create_failure_keeps_stored_rows() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = open_job_order(&ctx, 7).await.unwrap();
    let form = session.form_mut();
    form.onsite_status = Some(OnsiteStatus::InProgress);
    form.items = vec![ItemRow::new("Drop cable", 80)];
    backend.fail(
        "POST /job-order-items",
        422,
        json!({ "success": false, "message": "Invalid item", "errors": { "quantity": ["Not enough stock"] } }),
    );
    backend.clear_calls();

    let phase = session.save(&ctx, |_| {}).await;

    assert_eq!(phase, FormPhase::Idle);
    assert_eq!(
        backend.writes(),
        vec!["PUT /job-orders/7", "POST /job-order-items"],
        "no delete after a failed create"
    );
    let error = session
        .banner()
        .iter()
        .find(|o| o.level == OutcomeLevel::Error)
        .expect("item failure should be reported");
    assert!(
        error.message.contains("quantity: Not enough stock"),
        "Message: {}",
        error.message
    );
    assert_eq!(backend.rows("job-order-items").len(), 1);
}

#[tokio::test]
async fn technician_cannot_cancel_a_job_order() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = open_job_order(&ctx, 7).await.unwrap();
    session.form_mut().status = Some(shared_types::JobOrderStatus::Cancelled);
    backend.clear_calls();

    let phase = session.save(&ctx, |_| {}).await;

    assert_eq!(phase, FormPhase::Idle);
    assert_eq!(
        session.errors().get("status"),
        Some("Only office staff can change the status")
    );
    assert!(backend.writes().is_empty());

    let office = backend.context(Role::Office);
    let phase = session.save(&office, |_| {}).await;
    assert_eq!(phase, FormPhase::Closed);
    assert_eq!(backend.row("job-orders", 7).unwrap()["status"], "Cancelled");
}
