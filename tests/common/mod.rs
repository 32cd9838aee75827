//! Helpers for router tests.

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use barbearia::{
    common::time::{parse_utc_offset, DEFAULT_UTC_OFFSET},
    config::{AppState, Settings},
};

/// State over a pool that never connects. Only paths that fail before
/// touching the database can be exercised.
pub fn state() -> AppState {
    let settings = Settings {
        database_url: "postgres://localhost/barbearia_test".to_string(),
        jwt_secret: "segredo-de-teste".to_string(),
        utc_offset: parse_utc_offset(DEFAULT_UTC_OFFSET).expect("valid offset"),
        fonts_dir: PathBuf::from("./fonts"),
        bind_addr: "127.0.0.1:0".to_string(),
    };
    let pool = PgPoolOptions::new()
        .connect_lazy(&settings.database_url)
        .expect("valid url");

    AppState::build(pool, &settings)
}

pub fn app() -> Router {
    barbearia::app(state())
}

pub async fn send(request: Request<Body>) -> Response<Body> {
    app().oneshot(request).await.expect("router is infallible")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
