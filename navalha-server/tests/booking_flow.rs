//! End-to-end booking flow over the HTTP API.
//! Run: cargo test -p navalha-server --test booking_flow

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use navalha_server::core::server::build_app;
use navalha_server::db::repository::subscription;
use navalha_server::{Config, ServerState};
use shared::util::now_millis;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Plans seeded by migrations.
const PLAN_ADVANCED: i64 = 3;

async fn setup() -> (Router, ServerState, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config).await;
    (build_app(state.clone()), state, tmp)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request("GET", uri, token, None)
}

fn post(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    request("POST", uri, token, Some(body))
}

fn put(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    request("PUT", uri, token, Some(body))
}

fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    request("DELETE", uri, token, None)
}

/// Register an owner and return (token, user_id).
async fn register_owner(app: &Router, email: &str) -> (String, i64) {
    let (status, body) = send(
        app,
        post(
            "/api/auth/register",
            None,
            &json!({
                "name": "Dono Teste",
                "email": email,
                "password": "senha-secreta",
                "phone": "+55 11 91234-5678",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    let token = body["token"].as_str().unwrap().to_string();
    let user_id = body["user"]["id"].as_i64().unwrap();
    (token, user_id)
}

/// Put the owner on a paid plan without going through checkout.
async fn activate_plan(state: &ServerState, user_id: i64, plan_id: i64) {
    let sub = subscription::create_pending(&state.db.write, user_id, plan_id)
        .await
        .unwrap();
    subscription::mark_active(
        &state.db.write,
        sub.id,
        user_id,
        now_millis(),
        now_millis() + 30 * DAY_MS,
    )
    .await
    .unwrap();
}

async fn create_shop(app: &Router, token: &str) -> Value {
    let (status, shop) = send(
        app,
        post(
            "/api/shops",
            Some(token),
            &json!({
                "name": "Barbearia Central",
                "description": "Cortes clássicos no centro",
                "address": "Rua das Flores, 10",
                "phone": "+55 11 3333-4444",
                "openTime": "09:00",
                "closeTime": "18:00",
                "serviceDuration": 60,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "shop creation failed: {shop}");
    shop
}

fn slot_strings(body: &Value, field: &str) -> Vec<String> {
    body[field]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_full_booking_flow() {
    let (app, state, _tmp) = setup().await;

    let (token, user_id) = register_owner(&app, "dono@barbearia.com").await;
    activate_plan(&state, user_id, PLAN_ADVANCED).await;

    let shop = create_shop(&app, &token).await;
    let shop_id = shop["id"].as_i64().unwrap();
    assert_eq!(shop["slug"], "barbearia-central");

    // Publish a service
    let (status, service) = send(
        &app,
        post(
            &format!("/api/shops/{shop_id}/services"),
            Some(&token),
            &json!({"name": "Corte Masculino", "price": 50.0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let service_id = service["id"].as_i64().unwrap();

    // Storefront search finds the shop
    let (status, results) = send(&app, get("/api/public/shops?q=central", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results.as_array().unwrap().len(), 1);
    assert_eq!(results[0]["slug"], "barbearia-central");

    // Shop page carries the service catalog
    let (status, page) = send(&app, get("/api/public/shops/barbearia-central", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["name"], "Barbearia Central");
    assert_eq!(page["services"][0]["name"], "Corte Masculino");

    // Availability for an open day: 09:00 through 17:00
    let availability_uri = "/api/public/shops/barbearia-central/availability?date=2026-09-07";
    let (status, avail) = send(&app, get(availability_uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    let slots = slot_strings(&avail, "availableSlots");
    assert_eq!(slots.len(), 9);
    assert_eq!(slots[0], "09:00");
    assert_eq!(slots[8], "17:00");
    assert_eq!(avail["shop"]["serviceDuration"], 60);

    // Client books 10:00
    let booking = json!({
        "date": "2026-09-07",
        "time": "10:00",
        "customerName": "Carlos Silva",
        "customerPhone": "+55 11 98888-7777",
        "serviceId": service_id,
    });
    let booking_uri = "/api/public/shops/barbearia-central/appointments";
    let (status, appointment) = send(&app, post(booking_uri, None, &booking)).await;
    assert_eq!(status, StatusCode::CREATED, "booking failed: {appointment}");
    assert_eq!(appointment["status"], "pending");
    assert_eq!(appointment["isManual"], false);
    let appointment_id = appointment["id"].as_i64().unwrap();

    // A pending request does not hold the slot yet
    let (_, avail) = send(&app, get(availability_uri, None)).await;
    assert!(slot_strings(&avail, "availableSlots").contains(&"10:00".to_string()));
    assert!(slot_strings(&avail, "bookedTimes").is_empty());

    // Owner sees it in the pending queue and confirms
    let (status, pending) = send(
        &app,
        get(
            &format!("/api/shops/{shop_id}/appointments?status=pending"),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (status, confirmed) = send(
        &app,
        put(
            &format!("/api/shops/{shop_id}/appointments/{appointment_id}/status"),
            Some(&token),
            &json!({"status": "confirmed"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["status"], "confirmed");

    // Now the slot is gone from the storefront
    let (_, avail) = send(&app, get(availability_uri, None)).await;
    assert!(!slot_strings(&avail, "availableSlots").contains(&"10:00".to_string()));
    assert_eq!(slot_strings(&avail, "bookedTimes"), vec!["10:00"]);

    // And a second booking for the same slot is refused
    let (status, body) = send(&app, post(booking_uri, None, &booking)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn test_booking_rejects_unknown_service() {
    let (app, state, _tmp) = setup().await;

    let (token, user_id) = register_owner(&app, "dono@servico.com").await;
    activate_plan(&state, user_id, PLAN_ADVANCED).await;
    create_shop(&app, &token).await;

    let (status, body) = send(
        &app,
        post(
            "/api/public/shops/barbearia-central/appointments",
            None,
            &json!({
                "date": "2026-09-07",
                "time": "10:00",
                "customerName": "Carlos Silva",
                "customerPhone": "+55 11 98888-7777",
                "serviceId": 999_999,
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn test_booking_requires_contact_phone() {
    let (app, state, _tmp) = setup().await;

    let (token, user_id) = register_owner(&app, "dono@contato.com").await;
    activate_plan(&state, user_id, PLAN_ADVANCED).await;
    create_shop(&app, &token).await;

    let (status, _) = send(
        &app,
        post(
            "/api/public/shops/barbearia-central/appointments",
            None,
            &json!({
                "date": "2026-09-07",
                "time": "10:00",
                "customerName": "Carlos Silva",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_manual_entry_holds_slot_until_removed() {
    let (app, state, _tmp) = setup().await;

    let (token, user_id) = register_owner(&app, "dono@manual.com").await;
    activate_plan(&state, user_id, PLAN_ADVANCED).await;
    let shop = create_shop(&app, &token).await;
    let shop_id = shop["id"].as_i64().unwrap();

    // Walk-in entered by the owner: confirmed immediately
    let (status, entry) = send(
        &app,
        post(
            &format!("/api/shops/{shop_id}/appointments"),
            Some(&token),
            &json!({
                "date": "2026-09-08",
                "time": "11:00",
                "customerName": "Cliente de Balcão",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "manual entry failed: {entry}");
    assert_eq!(entry["status"], "confirmed");
    assert_eq!(entry["isManual"], true);
    let entry_id = entry["id"].as_i64().unwrap();

    // The storefront cannot book over it
    let booking = json!({
        "date": "2026-09-08",
        "time": "11:00",
        "customerName": "Carlos Silva",
        "customerPhone": "+55 11 98888-7777",
    });
    let booking_uri = "/api/public/shops/barbearia-central/appointments";
    let (status, _) = send(&app, post(booking_uri, None, &booking)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Removing the entry frees the slot
    let (status, removed) = send(
        &app,
        delete(
            &format!("/api/shops/{shop_id}/appointments/{entry_id}"),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed, json!(true));

    let (status, _) = send(&app, post(booking_uri, None, &booking)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_client_bookings_cannot_be_deleted() {
    let (app, state, _tmp) = setup().await;

    let (token, user_id) = register_owner(&app, "dono@triagem.com").await;
    activate_plan(&state, user_id, PLAN_ADVANCED).await;
    let shop = create_shop(&app, &token).await;
    let shop_id = shop["id"].as_i64().unwrap();

    let (_, appointment) = send(
        &app,
        post(
            "/api/public/shops/barbearia-central/appointments",
            None,
            &json!({
                "date": "2026-09-07",
                "time": "10:00",
                "customerName": "Carlos Silva",
                "customerPhone": "+55 11 98888-7777",
            }),
        ),
    )
    .await;
    let appointment_id = appointment["id"].as_i64().unwrap();

    // Client bookings are cancelled through triage, never deleted
    let (status, body) = send(
        &app,
        delete(
            &format!("/api/shops/{shop_id}/appointments/{appointment_id}"),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");

    let (status, cancelled) = send(
        &app,
        put(
            &format!("/api/shops/{shop_id}/appointments/{appointment_id}/status"),
            Some(&token),
            &json!({"status": "cancelled"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
}

#[tokio::test]
async fn test_bulk_delete_clears_cancelled_entries() {
    let (app, state, _tmp) = setup().await;

    let (token, user_id) = register_owner(&app, "dono@limpeza.com").await;
    activate_plan(&state, user_id, PLAN_ADVANCED).await;
    let shop = create_shop(&app, &token).await;
    let shop_id = shop["id"].as_i64().unwrap();

    let (_, appointment) = send(
        &app,
        post(
            "/api/public/shops/barbearia-central/appointments",
            None,
            &json!({
                "date": "2026-09-07",
                "time": "09:00",
                "customerName": "Carlos Silva",
                "customerPhone": "+55 11 98888-7777",
            }),
        ),
    )
    .await;
    let appointment_id = appointment["id"].as_i64().unwrap();
    send(
        &app,
        put(
            &format!("/api/shops/{shop_id}/appointments/{appointment_id}/status"),
            Some(&token),
            &json!({"status": "cancelled"}),
        ),
    )
    .await;

    // A filter is mandatory; wiping everything takes intent
    let (status, _) = send(
        &app,
        delete(&format!("/api/shops/{shop_id}/appointments"), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, result) = send(
        &app,
        delete(
            &format!("/api/shops/{shop_id}/appointments?status=cancelled"),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["deleted"], 1);

    let (_, remaining) = send(
        &app,
        get(&format!("/api/shops/{shop_id}/appointments"), Some(&token)),
    )
    .await;
    assert!(remaining.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_shop_creation_requires_active_plan() {
    let (app, _state, _tmp) = setup().await;

    let (token, _) = register_owner(&app, "dono@sem-plano.com").await;

    let (status, body) = send(
        &app,
        post(
            "/api/shops",
            Some(&token),
            &json!({
                "name": "Barbearia Sem Plano",
                "openTime": "09:00",
                "closeTime": "18:00",
                "serviceDuration": 30,
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");
}

#[tokio::test]
async fn test_dashboard_requires_token() {
    let (app, _state, _tmp) = setup().await;

    let (status, body) = send(&app, get("/api/shops", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    let (status, _) = send(&app, get("/api/shops", Some("not-a-real-token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_owners_cannot_touch_each_others_shops() {
    let (app, state, _tmp) = setup().await;

    let (owner_token, owner_id) = register_owner(&app, "dono@um.com").await;
    activate_plan(&state, owner_id, PLAN_ADVANCED).await;
    let shop = create_shop(&app, &owner_token).await;
    let shop_id = shop["id"].as_i64().unwrap();

    let (intruder_token, intruder_id) = register_owner(&app, "dono@dois.com").await;
    activate_plan(&state, intruder_id, PLAN_ADVANCED).await;

    let (status, body) = send(
        &app,
        get(&format!("/api/shops/{shop_id}"), Some(&intruder_token)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "expected 403, got: {body}");

    let (status, _) = send(
        &app,
        get(
            &format!("/api/shops/{shop_id}/appointments"),
            Some(&intruder_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deactivated_shop_leaves_the_storefront() {
    let (app, state, _tmp) = setup().await;

    let (token, user_id) = register_owner(&app, "dono@fechando.com").await;
    activate_plan(&state, user_id, PLAN_ADVANCED).await;
    let shop = create_shop(&app, &token).await;
    let shop_id = shop["id"].as_i64().unwrap();

    let (status, page) = send(&app, get("/api/public/shops/barbearia-central", None)).await;
    assert_eq!(status, StatusCode::OK, "shop page missing: {page}");

    let (status, removed) = send(&app, delete(&format!("/api/shops/{shop_id}"), Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed, json!(true));

    let (status, _) = send(&app, get("/api/public/shops/barbearia-central", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, results) = send(&app, get("/api/public/shops?q=central", None)).await;
    assert!(results.as_array().unwrap().is_empty());
}
