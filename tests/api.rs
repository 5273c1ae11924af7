// tests/api.rs
//
// Testes de ponta a ponta: a aplicação inteira montada sobre um banco
// SQLite em memória, exercitada via `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tower::util::ServiceExt;

use wm_store_backend::{config::AppState, routes, MIGRATOR};

async fn test_app() -> Router {
    // Uma única conexão: cada conexão "sqlite::memory:" nova abriria um
    // banco vazio próprio.
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();

    routes::app(AppState::from_pool(pool))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// Registra um usuário e devolve um token válido.
async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "name": "Test User",
            "email": email,
            "password": "secret1",
            "c_password": "secret1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registro falhou: {body}");
    body["data"]["access_token"].as_str().unwrap().to_string()
}

// Sobe o cenário mínimo para vendas e fichas: agência, operadora,
// vendedor, tipo de venda, tipificação e cliente.
async fn seed_catalog(app: &Router, token: &str) {
    let (status, _) = send(
        app,
        "POST",
        "/api/agencies",
        Some(token),
        Some(json!({"name": "Central", "address": "Av. Principal 100"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/api/operators",
        Some(token),
        Some(json!({"name": "Movistar"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/api/sales-user",
        Some(token),
        Some(json!({"agency_id": 1, "name": "Vendedor A"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/api/sales-type",
        Some(token),
        Some(json!({"name": "Portabilidad"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/api/typifications",
        Some(token),
        Some(json!({"name": "Venta cerrada"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/api/customers",
        Some(token),
        Some(json!({"agency_id": 1, "name": "Maria Lopez", "dni": "12345678"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn register_then_login() {
    let app = test_app().await;

    let token = register(&app, "john@example.com").await;
    assert!(!token.is_empty());

    let (status, body) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "john@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["login"], json!(true));
    assert!(body["data"]["access_token"].as_str().is_some());
}

#[tokio::test]
async fn register_validation_is_400_with_field_errors() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"name": "John", "password": "secret1", "c_password": "other99"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["c_password"].is_array());
}

#[tokio::test]
async fn duplicate_email_on_register_is_400() {
    let app = test_app().await;
    register(&app, "john@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "name": "Impostor",
            "email": "john@example.com",
            "password": "secret2",
            "c_password": "secret2",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["email"].is_array());
}

#[tokio::test]
async fn password_confirmation_must_match() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "name": "John",
            "email": "john@example.com",
            "password": "secret1",
            "c_password": "secret2",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["c_password"].is_array());

    // Nenhum usuário foi criado pela tentativa rejeitada.
    let (status, _) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "john@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_is_401() {
    let app = test_app().await;
    register(&app, "john@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "john@example.com", "password": "wrong!!"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = test_app().await;

    let (status, _) = send(&app, "GET", "/api/agencies", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/agencies", Some("nope"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_invalidates_the_token() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;

    let (status, _) = send(&app, "POST", "/api/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/api/user", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn agency_crud_round_trip() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/agencies",
        Some(&token),
        Some(json!({
            "name": "Central",
            "address": "Av. Principal 100",
            "phone": "987654321",
            "email": "central@example.com",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "corpo: {body}");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/api/agencies/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("Central"));
    assert_eq!(body["data"]["phone"], json!("987654321"));
    assert!(body["data"]["created_at"].as_str().is_some());

    // Atualização parcial: só o nome muda, o resto fica como estava.
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/agencies/{id}"),
        Some(&token),
        Some(json!({"name": "Central Norte"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("Central Norte"));
    assert_eq!(body["data"]["address"], json!("Av. Principal 100"));
    assert_eq!(body["data"]["email"], json!("central@example.com"));

    let (status, _) = send(&app, "DELETE", &format!("/api/agencies/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/api/agencies/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn agency_update_may_resend_its_own_email() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/agencies",
        Some(&token),
        Some(json!({"name": "A", "address": "Rua 1", "email": "a@example.com"})),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    // Reenviar o próprio e-mail não é conflito...
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/agencies/{id}"),
        Some(&token),
        Some(json!({"email": "a@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // ...mas usar o de outra agência é.
    send(
        &app,
        "POST",
        "/api/agencies",
        Some(&token),
        Some(json!({"name": "B", "address": "Rua 2", "email": "b@example.com"})),
    )
    .await;
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/agencies/{id}"),
        Some(&token),
        Some(json!({"email": "b@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["email"].is_array());
}

#[tokio::test]
async fn missing_required_fields_are_422_on_resources() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;

    let (status, body) = send(&app, "POST", "/api/agencies", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["address"].is_array());
}

#[tokio::test]
async fn customer_delete_cascades_to_phones_and_records() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;
    seed_catalog(&app, &token).await;

    // Telefone e ficha pendurados no cliente 1.
    let (status, _) = send(
        &app,
        "POST",
        "/api/phones",
        Some(&token),
        Some(json!({"phone": "911222333", "customer_id": 1, "operator_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/customers-records",
        Some(&token),
        Some(json!({"user_id": 1, "operator_id": 1, "customer_id": 1, "phone": "944555666"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "DELETE", "/api/customers/12345678", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/api/customers/12345678", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/api/phones", Some(&token), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let (_, body) = send(&app, "GET", "/api/customers-records", Some(&token), None).await;
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn duplicate_phone_number_is_422() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;
    seed_catalog(&app, &token).await;

    let payload = json!({"phone": "911222333", "customer_id": 1, "operator_id": 1});
    let (status, _) = send(&app, "POST", "/api/phones", Some(&token), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/phones", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["phone"].is_array());
}

#[tokio::test]
async fn phone_must_have_nine_digits() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;
    seed_catalog(&app, &token).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/phones",
        Some(&token),
        Some(json!({"phone": "12ab", "customer_id": 1, "operator_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["phone"].is_array());
}

#[tokio::test]
async fn operator_referenced_by_a_phone_cannot_be_deleted() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;
    seed_catalog(&app, &token).await;

    send(
        &app,
        "POST",
        "/api/phones",
        Some(&token),
        Some(json!({"phone": "911222333", "customer_id": 1, "operator_id": 1})),
    )
    .await;

    let (status, _) = send(&app, "DELETE", "/api/operators/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Sem referências, a exclusão passa.
    send(&app, "DELETE", "/api/phones/1", Some(&token), None).await;
    let (status, _) = send(&app, "DELETE", "/api/operators/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn sale_lifecycle_keyed_by_sales_order() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;
    seed_catalog(&app, &token).await;

    let sale = json!({
        "user_id": 1,
        "sales_user_id": 1,
        "customer_id": 1,
        "operator_id": 1,
        "sales_type_id": 1,
        "typification_id": 1,
        "origin": "callcenter",
        "sales_order": "SO-001",
        "phone": "911222333",
    });
    let (status, body) = send(&app, "POST", "/api/sales", Some(&token), Some(sale.clone())).await;
    assert_eq!(status, StatusCode::CREATED, "corpo: {body}");
    assert_eq!(body["data"]["customer"], json!("Maria Lopez"));
    assert_eq!(body["data"]["dni"], json!("12345678"));

    // Pedido duplicado.
    let (status, body) = send(&app, "POST", "/api/sales", Some(&token), Some(sale)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["sales_order"].is_array());

    // Consulta, atualização e exclusão pelo número do pedido.
    let (status, body) = send(&app, "GET", "/api/sales/SO-001", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sales_order"], json!("SO-001"));

    let (status, body) = send(
        &app,
        "PUT",
        "/api/sales/SO-001",
        Some(&token),
        Some(json!({"notes": "cliente confirmou", "sales_order": "SO-001"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "corpo: {body}");
    assert_eq!(body["data"]["notes"], json!("cliente confirmou"));

    let (status, _) = send(&app, "DELETE", "/api/sales/SO-001", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/api/sales/SO-001", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sale_with_unknown_foreign_keys_is_422() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;
    seed_catalog(&app, &token).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/sales",
        Some(&token),
        Some(json!({
            "user_id": 1,
            "sales_user_id": 99,
            "customer_id": 1,
            "operator_id": 1,
            "sales_type_id": 1,
            "typification_id": 1,
            "origin": "callcenter",
            "sales_order": "SO-002",
            "phone": "911222333",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["sales_user_id"].is_array());
}

#[tokio::test]
async fn record_lifecycle_uses_inherited_keys() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;
    seed_catalog(&app, &token).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/customers-records",
        Some(&token),
        Some(json!({
            "user_id": 1,
            "operator_id": 1,
            "customer_id": 1,
            "phone": "944555666",
            "schedule_1": "lunes 10h",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "corpo: {body}");
    assert_eq!(body["data"]["status"], json!(false));
    let record_id = body["data"]["id"].as_i64().unwrap();

    // Consulta pelo usuário dono.
    let (status, body) = send(&app, "GET", "/api/customers-records/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["dni"], json!("12345678"));
    assert_eq!(body["data"]["operator"], json!("Movistar"));

    // Atualização pelo cliente; é aqui que a ficha pode ser fechada.
    let (status, body) = send(
        &app,
        "PUT",
        "/api/customers-records/1",
        Some(&token),
        Some(json!({"status": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!(true));
    assert_eq!(body["data"]["phone"], json!("944555666"));

    // Exclusão pelo id da ficha.
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/customers-records/{record_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/api/customers-records/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn customers_list_is_paginated() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;
    seed_catalog(&app, &token).await;

    for i in 0..12 {
        let (status, _) = send(
            &app,
            "POST",
            "/api/customers",
            Some(&token),
            Some(json!({
                "agency_id": 1,
                "name": format!("Cliente {i}"),
                "dni": format!("90{i:06}"),
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // 12 criados aqui + 1 do cenário base.
    let (status, body) = send(&app, "GET", "/api/customers", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"]["meta"]["total"], json!(13));
    assert_eq!(body["data"]["meta"]["last_page"], json!(2));

    let (_, body) = send(&app, "GET", "/api/customers?page=2", Some(&token), None).await;
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["meta"]["current_page"], json!(2));
}

#[tokio::test]
async fn internal_shape_is_never_leaked_on_errors() {
    let app = test_app().await;
    let token = register(&app, "john@example.com").await;

    // Cliente com agency_id inexistente: erro de campo, não de SQL.
    let (status, body) = send(
        &app,
        "POST",
        "/api/customers",
        Some(&token),
        Some(json!({"agency_id": 42, "name": "X", "dni": "11111111"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = body["message"].as_str().unwrap().to_lowercase();
    assert!(!message.contains("sqlite"));
    assert!(!message.contains("constraint"));
    assert!(body["errors"]["agency_id"].is_array());
}
