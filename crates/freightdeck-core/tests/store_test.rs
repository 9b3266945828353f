#![allow(clippy::unwrap_used)]
// Integration tests for the reactive store layer using wiremock.

use std::sync::Arc;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use freightdeck_api::{CredentialStore, Gateway};
use freightdeck_core::{
    AccountStatus, Client, ClientPatch, CoreError, DataHub, DriverMatchRequest, Fallback,
    NewClient, Shipment,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DataHub) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/", server.uri())).unwrap();
    let credentials = Arc::new(CredentialStore::new());
    let gateway = Gateway::with_client(reqwest::Client::new(), base_url, credentials);
    let hub = DataHub::new(Arc::new(gateway));
    (server, hub)
}

fn client_json(id: u64, name: &str, monthly_value: f64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.test", name.to_lowercase().replace(' ', ".")),
        "company": "Test Co",
        "phone": "+1 555 0000",
        "address": "1 Test St",
        "region": "Europe",
        "industry": "Retail",
        "tier": "standard",
        "status": "active",
        "monthly_value": monthly_value,
        "risk_score": 0.05
    })
}

fn draft(name: &str) -> NewClient {
    NewClient {
        name: name.to_owned(),
        email: format!("{name}@example.test"),
        company: "Test Co".to_owned(),
        phone: "+1 555 0000".to_owned(),
        address: "1 Test St".to_owned(),
        region: Some("Europe".to_owned()),
        industry: None,
        status: AccountStatus::Active,
        monthly_value: 2_000.0,
        risk_score: 0.05,
    }
}

// ── Read path ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_failure_degrades_to_fallback() {
    let (server, hub) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let outcome = hub.clients.fetch_all().await;

    assert!(outcome.is_degraded());
    assert!(!outcome.data().is_empty());
    assert_eq!(outcome.data().len(), Client::fallback_dataset().len());
    assert!(hub.clients.last_error().is_some());
}

#[tokio::test]
async fn test_fetch_success_is_live_and_clears_prior_error() {
    let (server, hub) = setup().await;

    // First fetch fails with nothing mounted, putting the store in the
    // degraded state.
    let degraded = hub.clients.fetch_all().await;
    assert!(degraded.is_degraded());

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([client_json(7, "Maria", 2_500.0)])),
        )
        .mount(&server)
        .await;

    let outcome = hub.clients.fetch_all().await;

    assert!(!outcome.is_degraded());
    assert_eq!(outcome.data().len(), 1);
    assert_eq!(outcome.data()[0].id, 7);
    assert!(hub.clients.last_error().is_none());
}

#[tokio::test]
async fn test_snapshot_subscribers_see_refreshes() {
    let (server, hub) = setup().await;
    let mut updates = hub.clients.subscribe();

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([client_json(1, "Maria", 900.0)])),
        )
        .mount(&server)
        .await;

    hub.clients.fetch_all().await;

    updates.changed().await.unwrap();
    assert_eq!(updates.borrow().len(), 1);
}

// ── Mutation path ───────────────────────────────────────────────────

#[tokio::test]
async fn test_create_appends_server_record() {
    let (server, hub) = setup().await;

    Mock::given(method("POST"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(client_json(42, "Nina", 2_000.0)))
        .mount(&server)
        .await;

    let created = hub.clients.create(&draft("Nina")).await.unwrap();

    assert_eq!(created.id, 42);
    let snapshot = hub.clients.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, 42);
}

#[tokio::test]
async fn test_failed_create_leaves_snapshot_untouched() {
    let (server, hub) = setup().await;

    Mock::given(method("POST"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": "email already registered"
        })))
        .mount(&server)
        .await;

    let err = hub.clients.create(&draft("Nina")).await.unwrap_err();

    assert!(matches!(err, CoreError::Rejected { .. }));
    assert!(hub.clients.is_empty());
    assert!(hub.clients.last_error().is_some());
}

#[tokio::test]
async fn test_update_patches_record_in_place() {
    let (server, hub) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            client_json(1, "Maria", 900.0),
            client_json(2, "James", 1_500.0),
            client_json(3, "Ingrid", 4_000.0),
        ])))
        .mount(&server)
        .await;
    hub.clients.fetch_all().await;

    Mock::given(method("PUT"))
        .and(path("/clients/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(client_json(2, "James", 9_999.0)))
        .mount(&server)
        .await;

    let patch = ClientPatch {
        monthly_value: Some(9_999.0),
        ..ClientPatch::default()
    };
    hub.clients.update(2, &patch).await.unwrap();

    let snapshot = hub.clients.snapshot();
    let ids: Vec<u64> = snapshot.iter().map(|c| c.id).collect();
    // Position preserved, value updated.
    assert_eq!(ids, vec![1, 2, 3]);
    assert!((snapshot[1].monthly_value - 9_999.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_update_of_absent_record_is_a_local_noop() {
    let (server, hub) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/clients/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(client_json(99, "Ghost", 100.0)))
        .mount(&server)
        .await;

    let updated = hub
        .clients
        .update(99, &ClientPatch::default())
        .await
        .unwrap();

    assert_eq!(updated.id, 99);
    // The record was deleted locally in the meantime; nothing appears.
    assert!(hub.clients.is_empty());
}

#[tokio::test]
async fn test_delete_removes_record() {
    let (server, hub) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            client_json(1, "Maria", 900.0),
            client_json(2, "James", 1_500.0),
        ])))
        .mount(&server)
        .await;
    hub.clients.fetch_all().await;

    Mock::given(method("DELETE"))
        .and(path("/clients/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Client deleted successfully"
        })))
        .mount(&server)
        .await;

    hub.clients.delete(1).await.unwrap();

    let snapshot = hub.clients.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, 2);
}

#[tokio::test]
async fn test_upload_batch_refetches_collection() {
    let (server, hub) = setup().await;

    Mock::given(method("POST"))
        .and(path("/upload/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "imported",
            "count": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            client_json(10, "Imported One", 500.0),
            client_json(11, "Imported Two", 700.0),
        ])))
        .mount(&server)
        .await;

    let receipt = hub
        .clients
        .upload_batch("clients.csv", b"name,email\n".to_vec())
        .await
        .unwrap();

    assert_eq!(receipt.count, 2);
    assert_eq!(hub.clients.len(), 2);
}

// ── Shipment operations ─────────────────────────────────────────────

#[tokio::test]
async fn test_calculate_eta_reraises_backend_failure() {
    let (server, hub) = setup().await;

    Mock::given(method("POST"))
        .and(path("/shipments/calculate-eta"))
        .respond_with(ResponseTemplate::new(500).set_body_string("routing service down"))
        .mount(&server)
        .await;

    let err = hub
        .shipments
        .calculate_eta("Shanghai", "Rotterdam")
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::ServerFault { status: 500 }));
}

#[tokio::test]
async fn test_predict_eta_degrades_to_local_estimate() {
    let (_server, hub) = setup().await;

    // Nothing mounted: the prediction endpoint 404s.
    let outcome = hub.shipments.predict_eta(5).await;

    assert!(outcome.is_degraded());
    let prediction = outcome.data();
    assert_eq!(prediction.shipment_id, 5);
    assert!((80.0..=99.0).contains(&prediction.confidence));
    assert!(!prediction.factors.is_empty());
}

#[tokio::test]
async fn test_predict_eta_prefers_backend() {
    let (server, hub) = setup().await;

    Mock::given(method("POST"))
        .and(path("/shipments/5/predict-eta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "shipment_id": 5,
            "predicted_eta": "2026-09-01T12:00:00Z",
            "confidence": 91.5,
            "factors": ["weather"],
            "risk_level": "low",
            "recommendations": []
        })))
        .mount(&server)
        .await;

    let outcome = hub.shipments.predict_eta(5).await;

    assert!(!outcome.is_degraded());
    assert!((outcome.data().confidence - 91.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_optimal_driver_round_trip() {
    let (server, hub) = setup().await;

    Mock::given(method("POST"))
        .and(path("/shipments/optimal-driver"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "name": "Dana Wells",
            "license_number": "DL-000123",
            "phone": "+1 555 0300",
            "email": "dana@freightdeck.example",
            "vehicle_type": "box_truck",
            "capacity_kg": 4500.0,
            "availability": true,
            "current_location": "Chicago",
            "rating": 4.5
        })))
        .mount(&server)
        .await;

    let request = DriverMatchRequest {
        product_id: 2,
        origin: None,
        destination: None,
        transport_mode: Some("land".to_owned()),
    };
    let driver = hub.shipments.optimal_driver(&request).await.unwrap();

    assert_eq!(driver.id, 3);
    assert!(driver.availability);
}

// ── Hub-level behaviour ─────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_all_reports_mixed_degradation() {
    let (server, hub) = setup().await;

    // Only clients is live; the other four collections degrade.
    Mock::given(method("GET"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let all_live = hub.refresh_all().await;

    assert!(!all_live);
    assert!(hub.last_refresh().is_some());
    assert!(hub.clients.last_error().is_none());
    assert!(hub.shipments.last_error().is_some());
    // Degraded collections still have data to render.
    assert!(!hub.shipments.is_empty());
}

#[tokio::test]
async fn test_cross_store_lookups_resolve_foreign_keys() {
    let (_server, hub) = setup().await;

    // Degraded refresh loads the fallback datasets everywhere.
    hub.refresh_all().await;

    let shipments = hub.shipments.snapshot();
    let shipment: &Shipment = &shipments[0];

    assert!(hub.client_of(shipment).is_some());
    assert!(hub.transporter_of(shipment).is_some());
    // A dangling id yields None rather than a panic.
    let mut orphan = shipment.clone();
    orphan.client_id = 9_999;
    assert!(hub.client_of(&orphan).is_none());
}

#[tokio::test]
async fn test_backend_reachability_probe() {
    let (server, hub) = setup().await;

    assert!(!hub.is_backend_reachable().await);

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .mount(&server)
        .await;

    assert!(hub.is_backend_reachable().await);
}
