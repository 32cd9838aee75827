// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use utoipa::OpenApi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::{auth_guard, superadmin_guard, tenant_guard};

/// Monta o roteador completo da API.
pub fn app(app_state: AppState) -> Router {
    // Rotas públicas (site e vitrine)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let showcase_routes = Router::new()
        .route("/{slug}", get(handlers::showcase::get_showcase))
        .route("/{slug}/orders", post(handlers::showcase::place_order))
        .route("/{slug}/appointments", post(handlers::showcase::book_appointment));

    // Só precisam de login
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let shop_routes = Router::new()
        .route(
            "/",
            get(handlers::shops::list_my_shops).post(handlers::shops::create_shop),
        )
        .route("/select", post(handlers::shops::select_shop))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Painel do superadmin
    let admin_routes = Router::new()
        .route("/leads", get(handlers::leads::list_leads))
        .route("/leads/{id}/approve", post(handlers::leads::approve_lead))
        .route("/leads/{id}/reject", post(handlers::leads::reject_lead))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), superadmin_guard));

    // Tudo que opera dentro da loja ativa
    let tenant_routes = Router::new()
        .route(
            "/shop",
            get(handlers::shops::get_active_shop).put(handlers::shops::update_active_shop),
        )
        .route(
            "/clients",
            post(handlers::clients::create_client).get(handlers::clients::list_clients),
        )
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client).put(handlers::clients::update_client),
        )
        .route(
            "/catalog",
            post(handlers::catalog::create_item).get(handlers::catalog::list_items),
        )
        .route("/catalog/{id}", put(handlers::catalog::update_item))
        .route(
            "/professionals",
            post(handlers::team::create_professional).get(handlers::team::list_professionals),
        )
        .route("/professionals/{id}", put(handlers::team::update_professional))
        .route(
            "/appointments",
            post(handlers::appointments::create_appointment)
                .get(handlers::appointments::list_appointments),
        )
        .route("/appointments/quick-sale", post(handlers::appointments::quick_sale))
        .route("/appointments/{id}", get(handlers::appointments::get_appointment))
        .route("/appointments/{id}/confirm", post(handlers::appointments::confirm_appointment))
        .route("/appointments/{id}/complete", post(handlers::appointments::complete_appointment))
        .route("/appointments/{id}/cancel", post(handlers::appointments::cancel_appointment))
        .route("/orders", get(handlers::orders::list_orders))
        .route("/orders/{id}", get(handlers::orders::get_order))
        .route("/orders/{id}/status", post(handlers::orders::transition_order))
        .route("/orders/{id}/receipt", get(handlers::documents::order_receipt))
        .route(
            "/club/plans",
            post(handlers::club::create_plan).get(handlers::club::list_plans),
        )
        .route("/club/plans/{id}", put(handlers::club::update_plan))
        .route(
            "/club/subscriptions",
            post(handlers::club::subscribe).get(handlers::club::list_subscriptions),
        )
        .route("/club/subscriptions/{id}/cancel", post(handlers::club::cancel_subscription))
        .route("/reports/revenue", get(handlers::reports::revenue_summary))
        .route("/reports/revenue/daily", get(handlers::reports::revenue_daily))
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), tenant_guard));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/api/leads", post(handlers::leads::create_lead))
        .nest("/api/auth", auth_routes)
        .nest("/api/showcase", showcase_routes)
        .nest("/api/users", user_routes)
        .nest("/api/shops", shop_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api", tenant_routes)
        .with_state(app_state)
}
