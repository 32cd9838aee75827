// src/handlers/showcase.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{
        db_utils::get_public_connection,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::i18n::Locale,
    models::{
        appointment::{Appointment, BookAppointmentPayload},
        order::{OrderDetail, PlaceOrderPayload},
        showcase::ShowcasePage,
    },
};

#[utoipa::path(
    get,
    path = "/api/showcase/{slug}",
    tag = "Showcase",
    params(("slug" = String, Path, description = "Slug público da barbearia")),
    responses(
        (status = 200, description = "Vitrine da barbearia", body = ShowcasePage),
        (status = 404, description = "Barbearia não encontrada")
    )
)]
pub async fn get_showcase(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = get_public_connection(&app_state)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let page = app_state
        .showcase_service
        .page(&mut *conn, &slug)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(page)))
}

#[utoipa::path(
    post,
    path = "/api/showcase/{slug}/orders",
    tag = "Showcase",
    request_body = PlaceOrderPayload,
    params(("slug" = String, Path, description = "Slug público da barbearia")),
    responses(
        (status = 201, description = "Pedido recebido", body = OrderDetail),
        (status = 400, description = "Pedido vazio ou inválido"),
        (status = 422, description = "Produto indisponível")
    )
)]
pub async fn place_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
    Json(payload): Json<PlaceOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mut conn = get_public_connection(&app_state)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let order = app_state
        .showcase_service
        .place_order(&mut *conn, &slug, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    post,
    path = "/api/showcase/{slug}/appointments",
    tag = "Showcase",
    request_body = BookAppointmentPayload,
    params(("slug" = String, Path, description = "Slug público da barbearia")),
    responses(
        (status = 201, description = "Horário solicitado (pendente)", body = Appointment),
        (status = 422, description = "Serviço indisponível")
    )
)]
pub async fn book_appointment(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
    Json(payload): Json<BookAppointmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mut conn = get_public_connection(&app_state)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let appointment = app_state
        .showcase_service
        .book_appointment(&mut *conn, &slug, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(appointment)))
}
