use forms::fields::CrewFields;
use forms::line_items::ItemRow;
use forms::service_order::open_service_order;
use forms::{FormPhase, OutcomeLevel};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{Role, ServiceOrderImage, ServiceVisitStatus, SupportStatus};

use crate::common::MockBackend;

async fn finished_repair(
    backend: &MockBackend,
) -> forms::FormSession<forms::service_order::ServiceOrderForm> {
    let ctx = backend.context(Role::Technician);
    let mut session = open_service_order(&ctx, 11).await.expect("ticket should load");
    let form = session.form_mut();
    form.support_status = Some(SupportStatus::ForVisit);
    form.visit_status = Some(ServiceVisitStatus::Done);
    form.repair_category = "Fiber cut".to_string();
    form.crew = CrewFields::from_parts(Some("Jun Reyes"), Some("Leo Cruz"), Some("None"));
    form.visit_remarks = "Spliced the drop cable".to_string();
    form.items.push(ItemRow::new("Drop cable", 30));
    for slot in ServiceOrderImage::ALL {
        form.photos.attach(slot, "reading.jpg", vec![1, 2, 3]);
    }
    session
}

#[tokio::test]
async fn repair_uploads_then_updates_then_syncs_items() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = finished_repair(&backend).await;
    backend.clear_calls();

    let phase = session.save(&ctx, |_| {}).await;

    assert_eq!(phase, FormPhase::Closed, "Banner: {:?}", session.banner());
    assert_eq!(
        backend.writes(),
        vec![
            "POST /google-drive/upload",
            "PUT /service-orders/11",
            "POST /service-order-items",
        ]
    );

    let body = backend.body_of("PUT /service-orders/11").unwrap();
    assert_eq!(body["support_status"], "For Visit");
    assert_eq!(body["visit_status"], "Done");
    assert_eq!(body["box_reading_image_url"], "https://drive.test/box_reading_image");
    assert_eq!(
        body["client_signature_image_url"],
        "https://drive.test/client_signature_image"
    );
    assert_eq!(body["updated_by"], "jun@isp.example");

    let names: Vec<_> = backend
        .rows("service-order-items")
        .iter()
        .map(|r| r["item_name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["Connector", "Drop cable"]);
}

#[tokio::test]
async fn drive_failure_skips_the_ticket_update() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = finished_repair(&backend).await;
    backend.fail(
        "POST /google-drive/upload",
        503,
        json!({ "success": false, "message": "Drive quota exceeded" }),
    );
    backend.clear_calls();

    let phase = session.save(&ctx, |_| {}).await;

    assert_eq!(phase, FormPhase::Idle);
    assert_eq!(backend.writes(), vec!["POST /google-drive/upload"]);
    assert_eq!(session.banner()[0].level, OutcomeLevel::Error);
    assert_eq!(
        session.banner()[0].message,
        "Failed to upload photos: Drive quota exceeded"
    );
    assert_eq!(
        backend.row("service-orders", 11).unwrap()["support_status"],
        "In Progress"
    );
}

#[tokio::test]
async fn resolving_without_remarks_is_rejected_locally() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = open_service_order(&ctx, 11).await.unwrap();
    session.form_mut().support_status = Some(SupportStatus::Resolved);
    backend.clear_calls();

    let phase = session.save(&ctx, |_| {}).await;

    assert_eq!(phase, FormPhase::Idle);
    assert_eq!(
        session.errors().get("support_remarks"),
        Some("Support remarks is required")
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn removing_an_item_deletes_its_row() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Technician);
    let mut session = open_service_order(&ctx, 11).await.unwrap();
    let form = session.form_mut();
    form.support_status = Some(SupportStatus::Resolved);
    form.support_remarks = "Rebooted ONU remotely".to_string();
    form.items.clear();
    backend.clear_calls();

    let phase = session.save(&ctx, |_| {}).await;

    assert_eq!(phase, FormPhase::Closed, "Banner: {:?}", session.banner());
    assert_eq!(
        backend.writes(),
        vec!["PUT /service-orders/11", "DELETE /service-order-items/2"]
    );
    assert!(backend.rows("service-order-items").is_empty());
}
