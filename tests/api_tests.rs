use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use fleetflow_backend::config::EnvironmentConfig;
use fleetflow_backend::{create_app_router, AppState};

// Función helper para crear la app de test sobre el almacenamiento en memoria
fn create_test_app() -> Router {
    create_app_router(AppState::in_memory(EnvironmentConfig::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn register_vehicle(app: &Router, name: &str, capacity: Value) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/vehicles",
        Some(json!({ "name": name, "capacity": capacity })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_end_to_end_dispatch_then_breakdown() {
    let app = create_test_app();

    let vehicle = register_vehicle(&app, "APEX", json!(5000)).await;
    assert_eq!(vehicle["status"], "Available");
    let vehicle_id = vehicle["id"].as_str().unwrap().to_string();

    let (status, trip) = send(
        &app,
        Method::POST,
        "/trips",
        Some(json!({ "vehicleId": vehicle_id, "cargoWeight": 4500 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", trip);
    assert_eq!(trip["vehicleId"], vehicle_id.as_str());
    assert_eq!(trip["cargoWeight"], 4500.0);

    let (_, current) = send(&app, Method::GET, &format!("/vehicles/{}", vehicle_id), None).await;
    assert_eq!(current["status"], "On Trip");

    let (status, record) = send(
        &app,
        Method::POST,
        "/maintenance",
        Some(json!({ "vehicleId": vehicle_id, "issue": "brake wear" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", record);
    assert_eq!(record["issue"], "brake wear");
    assert!(record["date"].is_string());

    let (_, current) = send(&app, Method::GET, &format!("/vehicles/{}", vehicle_id), None).await;
    assert_eq!(current["status"], "In Shop");

    let history = format!("/trips?vehicleId={}", vehicle_id);
    let (_, trips) = send(&app, Method::GET, &history, None).await;
    assert_eq!(trips.as_array().unwrap().len(), 1);
    let (_, records) = send(&app, Method::GET, "/maintenance", None).await;
    assert_eq!(records.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_rejects_bad_capacity() {
    let app = create_test_app();

    for capacity in [json!(0), json!(-10), json!("heavy"), Value::Null] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/vehicles",
            Some(json!({ "name": "APEX", "capacity": capacity })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["error"].is_string());
    }

    let (_, vehicles) = send(&app, Method::GET, "/vehicles", None).await;
    assert_eq!(vehicles, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = create_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/vehicles")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_capacity_boundary() {
    let app = create_test_app();
    let exact = register_vehicle(&app, "APEX", json!(5000)).await;
    let over = register_vehicle(&app, "NEON", json!(5000)).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/trips",
        Some(json!({ "vehicleId": exact["id"], "cargoWeight": 5000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/trips",
        Some(json!({ "vehicleId": over["id"], "cargoWeight": 5001 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CAPACITY_EXCEEDED");
    assert_eq!(body["details"]["capacity"], "5000");
    assert_eq!(body["details"]["requested"], "5001");

    let uri = format!("/vehicles/{}", over["id"].as_str().unwrap());
    let (_, vehicle) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(vehicle["status"], "Available");
}

#[tokio::test]
async fn test_dispatch_unknown_vehicle_is_404() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/trips",
        Some(json!({ "vehicleId": uuid::Uuid::new_v4(), "cargoWeight": 10 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_second_dispatch_is_rejected_until_manual_reset() {
    let app = create_test_app();
    let vehicle = register_vehicle(&app, "APEX", json!(5000)).await;
    let trip = json!({ "vehicleId": vehicle["id"], "cargoWeight": 100 });

    let (status, _) = send(&app, Method::POST, "/trips", Some(trip.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/trips", Some(trip.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE");

    let uri = format!("/vehicles/{}", vehicle["id"].as_str().unwrap());
    let available = Some(json!({ "status": "Available" }));
    let (status, reset) = send(&app, Method::PUT, &uri, available).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reset["status"], "Available");

    let (status, _) = send(&app, Method::POST, "/trips", Some(trip)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_manual_status_update_is_validated() {
    let app = create_test_app();
    let vehicle = register_vehicle(&app, "APEX", json!(5000)).await;
    let uri = format!("/vehicles/{}", vehicle["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "status": "Flying" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let unknown = format!("/vehicles/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, Method::PUT, &unknown, Some(json!({ "status": "In Shop" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let in_shop = Some(json!({ "status": "In Shop" }));
    let (status, _) = send(&app, Method::PUT, "/vehicles/not-an-id", in_shop).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_maintenance_validation() {
    let app = create_test_app();
    let vehicle = register_vehicle(&app, "APEX", json!(5000)).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/maintenance",
        Some(json!({ "vehicleId": uuid::Uuid::new_v4(), "issue": "flat tyre" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::POST,
        "/maintenance",
        Some(json!({ "vehicleId": vehicle["id"], "issue": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_driver_compliance_gates_dispatch() {
    let app = create_test_app();
    let vehicle = register_vehicle(&app, "APEX", json!(5000)).await;
    let yesterday = (Utc::now().date_naive() - Duration::days(1)).to_string();
    let next_year = (Utc::now().date_naive() + Duration::days(365)).to_string();

    let (status, expired) = send(
        &app,
        Method::POST,
        "/drivers",
        Some(json!({ "name": "John Doe", "licenseClass": "Truck", "licenseExpiry": yesterday })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", expired);
    assert_eq!(expired["licenseExpired"], true);
    assert_eq!(expired["eligible"], false);

    let (status, body) = send(
        &app,
        Method::POST,
        "/trips",
        Some(json!({ "vehicleId": vehicle["id"], "cargoWeight": 100, "driverId": expired["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE");

    let (_, valid) = send(
        &app,
        Method::POST,
        "/drivers",
        Some(json!({
            "name": "Sarah Smith",
            "licenseClass": "Truck",
            "licenseExpiry": next_year,
            "safetyScore": 92
        })),
    )
    .await;
    let (status, trip) = send(
        &app,
        Method::POST,
        "/trips",
        Some(json!({ "vehicleId": vehicle["id"], "cargoWeight": 100, "driverId": valid["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(trip["driverId"], valid["id"]);

    let (_, drivers) = send(&app, Method::GET, "/drivers", None).await;
    assert_eq!(drivers.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_is_idempotent() {
    let app = create_test_app();
    register_vehicle(&app, "APEX HAULER", json!(5000)).await;
    register_vehicle(&app, "NEON SPRINT", json!("1200")).await;

    let (_, first) = send(&app, Method::GET, "/vehicles", None).await;
    let (_, second) = send(&app, Method::GET, "/vehicles", None).await;

    assert_eq!(first, second);
    assert_eq!(first[0]["name"], "APEX HAULER");
    assert_eq!(first[1]["capacity"], 1200.0);
}

#[tokio::test]
async fn test_weight_beyond_numeric_range_is_capacity_exceeded() {
    let app = create_test_app();
    let vehicle = register_vehicle(&app, "APEX", json!(5000)).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/trips",
        Some(json!({ "vehicleId": vehicle["id"], "cargoWeight": 1e29 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CAPACITY_EXCEEDED");
    assert_eq!(body["details"]["capacity"], "5000");
}

#[tokio::test]
async fn test_long_issue_sends_vehicle_to_shop() {
    let app = create_test_app();
    let vehicle = register_vehicle(&app, "APEX", json!(5000)).await;
    let issue = "x".repeat(600);

    let (status, record) = send(
        &app,
        Method::POST,
        "/maintenance",
        Some(json!({ "vehicleId": vehicle["id"], "issue": issue })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["issue"].as_str().unwrap().len(), 600);

    let uri = format!("/vehicles/{}", vehicle["id"].as_str().unwrap());
    let (_, current) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(current["status"], "In Shop");
}
