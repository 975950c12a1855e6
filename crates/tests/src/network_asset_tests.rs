use forms::network_assets::{open_network_asset, AssetKind, CreatedAsset};
use forms::FormPhase;
use pretty_assertions::assert_eq;
use shared_types::Role;

use crate::common::MockBackend;

#[tokio::test]
async fn new_nap_is_created_under_its_lcp() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Office);
    let mut session = open_network_asset(&ctx, AssetKind::Nap).await.unwrap();
    assert_eq!(session.form().lcp_options(), vec!["LCP1"]);

    let form = session.form_mut();
    form.placement.set_lcp(Some(1));
    form.name = "LCP1-NAP3".to_string();
    backend.clear_calls();

    let mut created = None;
    let phase = session.save(&ctx, |asset| created = Some(asset.clone())).await;

    assert_eq!(phase, FormPhase::Closed, "Banner: {:?}", session.banner());
    assert_eq!(backend.writes(), vec!["POST /nap"]);
    let body = backend.body_of("POST /nap").unwrap();
    assert_eq!(body["name"], "LCP1-NAP3");
    assert_eq!(body["lcp_id"], 1);
    match created {
        Some(CreatedAsset::Nap(nap)) => {
            assert_eq!(nap.name, "LCP1-NAP3");
            assert_eq!(nap.lcp_id, 1);
        }
        other => panic!("expected a created NAP, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_port_label_is_rejected_before_posting() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Office);
    let mut session = open_network_asset(&ctx, AssetKind::Port).await.unwrap();
    let form = session.form_mut();
    form.placement.set_lcp(Some(1));
    form.placement.set_nap(Some(5));
    form.name = "PORT 032".to_string();
    backend.clear_calls();

    let phase = session.save(&ctx, |_| {}).await;

    assert_eq!(phase, FormPhase::Idle);
    assert_eq!(session.errors().get("label"), Some("Port already exists"));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn same_port_label_on_another_nap_is_allowed() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Office);
    let mut session = open_network_asset(&ctx, AssetKind::Port).await.unwrap();
    let form = session.form_mut();
    form.placement.set_lcp(Some(1));
    form.placement.set_nap(Some(6));
    form.name = "PORT 032".to_string();

    let phase = session.save(&ctx, |_| {}).await;

    assert_eq!(phase, FormPhase::Closed, "Banner: {:?}", session.banner());
    let ports = backend.rows("port");
    assert_eq!(ports.len(), 4);
    assert_eq!(ports[3]["nap_id"], 6);
}

#[tokio::test]
async fn changing_lcp_clears_the_chosen_nap() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(Role::Office);
    let mut session = open_network_asset(&ctx, AssetKind::Port).await.unwrap();
    let form = session.form_mut();
    form.placement.set_lcp(Some(1));
    form.placement.set_nap(Some(5));
    assert_eq!(form.nap_options(), vec!["LCP1-NAP1", "LCP1-NAP2"]);

    form.placement.set_lcp(Some(2));
    assert_eq!(form.placement.nap_id, None);
    assert!(form.nap_options().is_empty());
}
