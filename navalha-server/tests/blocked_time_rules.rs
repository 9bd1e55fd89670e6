//! Blocked-time rules over the HTTP API: plan gates, overlap rejection
//! and the effect on storefront availability.
//! Run: cargo test -p navalha-server --test blocked_time_rules

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
const PLAN_BASIC: i64 = 1;
const PLAN_INTERMEDIATE: i64 = 2;

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

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Register an owner on the given plan and open a shop 09:00-18:00 with
/// 60-minute slots. Returns (token, shop_id).
async fn owner_with_shop(
    app: &Router,
    state: &ServerState,
    email: &str,
    plan_id: i64,
    period_end: i64,
) -> (String, i64) {
    let (status, body) = send(
        app,
        post(
            "/api/auth/register",
            None,
            &json!({
                "name": "Dono Teste",
                "email": email,
                "password": "senha-secreta",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    let token = body["token"].as_str().unwrap().to_string();
    let user_id = body["user"]["id"].as_i64().unwrap();

    let sub = subscription::create_pending(&state.db.write, user_id, plan_id)
        .await
        .unwrap();
    subscription::mark_active(&state.db.write, sub.id, user_id, now_millis(), period_end)
        .await
        .unwrap();

    let (status, shop) = send(
        app,
        post(
            "/api/shops",
            Some(&token),
            &json!({
                "name": "Barbearia Teste",
                "openTime": "09:00",
                "closeTime": "18:00",
                "serviceDuration": 60,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "shop creation failed: {shop}");
    (token, shop["id"].as_i64().unwrap())
}

fn block(date: &str, start: &str, end: &str) -> Value {
    json!({"date": date, "startTime": start, "endTime": end})
}

async fn create_block(
    app: &Router,
    token: &str,
    shop_id: i64,
    payload: &Value,
) -> (StatusCode, Value) {
    send(
        app,
        post(
            &format!("/api/shops/{shop_id}/blockedTimes"),
            Some(token),
            payload,
        ),
    )
    .await
}

fn available_slots(body: &Value) -> Vec<String> {
    body["availableSlots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_basic_plan_gates_hours_and_quota() {
    let (app, state, _tmp) = setup().await;
    let future = now_millis() + 30 * DAY_MS;
    let (token, shop_id) =
        owner_with_shop(&app, &state, "dono@basico.com", PLAN_BASIC, future).await;

    // Inside business hours: refused on the basic tier
    let (status, body) = create_block(&app, &token, shop_id, &block("2026-09-07", "12:00", "13:00")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");
    assert!(
        body["message"].as_str().unwrap().contains("business hours"),
        "unexpected message: {body}"
    );

    // Evening blocks pass the hours gate
    let (status, _) = create_block(&app, &token, shop_id, &block("2026-09-07", "19:00", "20:00")).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = create_block(&app, &token, shop_id, &block("2026-09-07", "20:30", "21:30")).await;
    assert_eq!(status, StatusCode::CREATED);

    // Third rule trips the quota
    let (status, body) = create_block(&app, &token, shop_id, &block("2026-09-08", "19:00", "20:00")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(
        body["message"].as_str().unwrap().contains("at most 2"),
        "unexpected message: {body}"
    );
}

#[tokio::test]
async fn test_expired_subscription_closes_the_gate() {
    let (app, state, _tmp) = setup().await;

    // Period already over: still counts for nothing
    let future = now_millis() + 30 * DAY_MS;
    let (token, shop_id) = owner_with_shop(
        &app,
        &state,
        "dono@vencido.com",
        PLAN_INTERMEDIATE,
        future,
    )
    .await;

    sqlx::query("UPDATE subscriptions SET period_end = ?")
        .bind(now_millis() - DAY_MS)
        .execute(&state.db.write)
        .await
        .unwrap();

    let (status, body) = create_block(&app, &token, shop_id, &block("2026-09-07", "19:00", "20:00")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(
        body["message"].as_str().unwrap().contains("subscription"),
        "unexpected message: {body}"
    );
}

#[tokio::test]
async fn test_overlapping_rules_are_rejected() {
    let (app, state, _tmp) = setup().await;
    let future = now_millis() + 30 * DAY_MS;
    let (token, shop_id) = owner_with_shop(
        &app,
        &state,
        "dono@sobreposto.com",
        PLAN_INTERMEDIATE,
        future,
    )
    .await;

    let (status, _) = create_block(&app, &token, shop_id, &block("2026-09-07", "12:00", "13:00")).await;
    assert_eq!(status, StatusCode::CREATED);

    // Touching at an endpoint already conflicts
    let (status, body) = create_block(&app, &token, shop_id, &block("2026-09-07", "13:00", "14:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"].as_str().unwrap().contains("Overlaps"),
        "unexpected message: {body}"
    );

    // One minute of daylight is enough
    let (status, _) = create_block(&app, &token, shop_id, &block("2026-09-07", "13:01", "14:00")).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same window on another date coexists
    let (status, _) = create_block(&app, &token, shop_id, &block("2026-09-08", "12:30", "13:30")).await;
    assert_eq!(status, StatusCode::CREATED);

    // A daily rule collides with the one-off it would shadow
    let daily = json!({
        "date": "2026-09-01",
        "startTime": "12:45",
        "endTime": "12:50",
        "recurring": true,
        "recurrenceType": "daily",
    });
    let (status, body) = create_block(&app, &token, shop_id, &daily).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "expected overlap: {body}");
}

#[tokio::test]
async fn test_block_shapes_availability_until_deleted() {
    let (app, state, _tmp) = setup().await;
    let future = now_millis() + 30 * DAY_MS;
    let (token, shop_id) = owner_with_shop(
        &app,
        &state,
        "dono@almoco.com",
        PLAN_INTERMEDIATE,
        future,
    )
    .await;

    let availability_uri = "/api/public/shops/barbearia-teste/availability?date=2026-09-07";
    let (_, before) = send(&app, get(availability_uri, None)).await;
    assert_eq!(available_slots(&before).len(), 9);

    let (status, rule) = create_block(&app, &token, shop_id, &block("2026-09-07", "12:00", "13:00")).await;
    assert_eq!(status, StatusCode::CREATED);
    let rule_id = rule["id"].as_i64().unwrap();

    // The block eats the 12:00 and 13:00 slots, neighbors survive
    let (_, during) = send(&app, get(availability_uri, None)).await;
    let slots = available_slots(&during);
    assert!(!slots.contains(&"12:00".to_string()));
    assert!(!slots.contains(&"13:00".to_string()));
    assert!(slots.contains(&"11:00".to_string()));
    assert!(slots.contains(&"14:00".to_string()));

    // Owner sees the rule in the list
    let (status, rules) = send(
        &app,
        get(&format!("/api/shops/{shop_id}/blockedTimes"), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rules.as_array().unwrap().len(), 1);

    // Deleting the rule restores the full grid
    let (status, removed) = send(
        &app,
        delete(&format!("/api/shops/{shop_id}/blockedTimes/{rule_id}"), &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed, json!(true));

    let (_, after) = send(&app, get(availability_uri, None)).await;
    assert_eq!(available_slots(&after).len(), 9);
}

#[tokio::test]
async fn test_weekly_rule_blocks_matching_weekdays_only() {
    let (app, state, _tmp) = setup().await;
    let future = now_millis() + 30 * DAY_MS;
    let (token, shop_id) = owner_with_shop(
        &app,
        &state,
        "dono@semanal.com",
        PLAN_INTERMEDIATE,
        future,
    )
    .await;

    let weekly = json!({
        "date": "2026-09-01",
        "startTime": "09:00",
        "endTime": "17:59",
        "reason": "Folga da equipe",
        "recurring": true,
        "recurrenceType": "weekly",
        "daysOfWeek": ["monday"],
    });
    let (status, body) = create_block(&app, &token, shop_id, &weekly).await;
    assert_eq!(status, StatusCode::CREATED, "weekly rule failed: {body}");

    // 2026-09-07 is a Monday, the 8th a Tuesday
    let (_, monday) = send(
        &app,
        get(
            "/api/public/shops/barbearia-teste/availability?date=2026-09-07",
            None,
        ),
    )
    .await;
    assert!(available_slots(&monday).is_empty());

    let (_, tuesday) = send(
        &app,
        get(
            "/api/public/shops/barbearia-teste/availability?date=2026-09-08",
            None,
        ),
    )
    .await;
    assert_eq!(available_slots(&tuesday).len(), 9);
}

#[tokio::test]
async fn test_end_must_follow_start() {
    let (app, state, _tmp) = setup().await;
    let future = now_millis() + 30 * DAY_MS;
    let (token, shop_id) = owner_with_shop(
        &app,
        &state,
        "dono@invertido.com",
        PLAN_INTERMEDIATE,
        future,
    )
    .await;

    let (status, body) = create_block(&app, &token, shop_id, &block("2026-09-07", "13:00", "13:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"].as_str().unwrap().contains("endTime"),
        "unexpected message: {body}"
    );

    let (status, _) = create_block(&app, &token, shop_id, &block("2026-09-07", "14:00", "13:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = create_block(&app, &token, shop_id, &block("2026-09-07", "25:00", "26:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
