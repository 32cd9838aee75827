use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Request, StatusCode},
};
use barbearia::{
    common::error::ApiError,
    handlers::reports::{revenue_daily, revenue_summary},
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::TenantContext},
    models::{auth::User, report::RevenueQuery},
};
use chrono::{NaiveDate, Utc};
use http_body_util::BodyExt;
use serde_json::json;
use uuid::Uuid;

mod common;

use common::{body_json, send, state};

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_check_answers_ok() {
    let response = send(Request::get("/api/health").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn protected_route_without_token_is_unauthorized() {
    let response = send(Request::get("/api/users/me").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Token de autenticação inválido ou ausente.");
}

#[tokio::test]
async fn tenant_route_with_garbage_token_is_unauthorized_in_english() {
    let request = Request::get("/api/reports/revenue?start=2024-03-01&end=2024-03-31")
        .header(header::AUTHORIZATION, "Bearer nao.e.jwt")
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .body(Body::empty())
        .unwrap();

    let response = send(request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing or invalid authentication token.");
}

#[tokio::test]
async fn admin_routes_require_a_token() {
    let response = send(Request::get("/api/admin/leads").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn lead_with_invalid_email_is_rejected_with_field_details() {
    let request = json_request(
        "POST",
        "/api/leads",
        json!({
            "name": "Carlos",
            "email": "nao-e-email",
            "phone": "11999998888",
            "shopName": "Barbearia do Carlos"
        }),
    );

    let response = send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Um ou mais campos são inválidos.");
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn login_with_short_password_is_rejected_before_lookup() {
    let request = json_request(
        "POST",
        "/api/auth/login",
        json!({ "email": "dono@barbearia.com", "password": "123" }),
    );

    let response = send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn showcase_order_without_customer_name_is_rejected() {
    let request = json_request(
        "POST",
        "/api/showcase/barbearia-do-carlos/orders",
        json!({ "customerName": "", "items": [] }),
    );

    let response = send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let fields = body["details"].as_object().expect("field details");
    assert!(fields.keys().any(|field| field.to_lowercase().contains("customer")));
}

#[tokio::test]
async fn openapi_document_lists_the_report_routes() {
    let response = send(
        Request::get("/api/docs/openapi.json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/api/reports/revenue"].is_object());
    assert!(body["paths"]["/api/showcase/{slug}"].is_object());
    assert!(body["components"]["securitySchemes"]["api_jwt"].is_object());
}

#[tokio::test]
async fn showcase_order_reports_the_bad_line() {
    let request = json_request(
        "POST",
        "/api/showcase/barbearia-do-carlos/orders",
        json!({
            "customerName": "Pedro",
            "items": [
                { "itemId": Uuid::new_v4(), "quantity": 2 },
                { "itemId": Uuid::new_v4(), "quantity": 0 }
            ]
        }),
    );

    let response = send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["details"]["items[1].quantity"][0], "Quantidade inválida.");
}

#[tokio::test]
async fn showcase_page_is_registered_for_get_only() {
    let response = send(
        Request::post("/api/showcase/barbearia-do-carlos")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn order_detail_receipt_and_cancel_routes_sit_behind_the_tenant_guard() {
    let id = Uuid::new_v4();
    let requests = [
        Request::get(format!("/api/orders/{id}")),
        Request::get(format!("/api/orders/{id}/receipt")),
        Request::post(format!("/api/club/subscriptions/{id}/cancel")),
    ];

    for request in requests {
        let response = send(request.body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Token de autenticação inválido ou ausente.");
    }
}

fn owner() -> AuthenticatedUser {
    AuthenticatedUser(User {
        id: Uuid::new_v4(),
        email: "dono@barbearia.com".into(),
        name: "Dono".into(),
        password_hash: String::new(),
        is_superadmin: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    })
}

fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> Query<RevenueQuery> {
    Query(RevenueQuery {
        start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
        end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
    })
}

fn rejection<T>(result: Result<T, ApiError>) -> ApiError {
    match result {
        Ok(_) => panic!("expected the range to be rejected"),
        Err(e) => e,
    }
}

#[tokio::test]
async fn daily_report_rejects_ranges_before_touching_the_database() {
    let shop = TenantContext(Uuid::new_v4());

    let inverted = revenue_daily(
        State(state()),
        Locale("pt".into()),
        owner(),
        shop,
        range((2024, 3, 10), (2024, 3, 9)),
    )
    .await;
    assert_eq!(rejection(inverted).status, StatusCode::BAD_REQUEST);

    let too_long = rejection(
        revenue_daily(
            State(state()),
            Locale("en".into()),
            owner(),
            shop,
            range((1, 1, 1), (9999, 12, 31)),
        )
        .await,
    );
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);
    assert_eq!(too_long.details.unwrap()["maxDays"], 366);
}

#[tokio::test]
async fn revenue_summary_rejects_an_inverted_range() {
    let result = revenue_summary(
        State(state()),
        Locale("pt".into()),
        owner(),
        TenantContext(Uuid::new_v4()),
        range((2024, 3, 31), (2024, 3, 1)),
    )
    .await;

    let error = rejection(result);
    assert_eq!(error.status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "A data final deve ser igual ou posterior à data inicial.");
}
