// src/handlers/leads.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::lead::{CreateLeadPayload, Lead, LeadDecision, LeadListQuery, LeadStatus},
};

/// Formulário público do site ("quero minha barbearia no sistema").
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = CreateLeadPayload,
    responses(
        (status = 201, description = "Cadastro recebido", body = Lead),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateLeadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let lead = app_state
        .lead_service
        .capture(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(lead)))
}

#[utoipa::path(
    get,
    path = "/api/admin/leads",
    tag = "Leads",
    params(("status" = Option<LeadStatus>, Query, description = "Filtra pelo status")),
    responses(
        (status = 200, description = "Cadastros", body = [Lead]),
        (status = 403, description = "Apenas superadmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<LeadListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let leads = app_state
        .lead_service
        .list(query.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(leads)))
}

async fn review(
    app_state: AppState,
    locale: Locale,
    reviewer: AuthenticatedUser,
    lead_id: Uuid,
    decision: LeadDecision,
) -> Result<Json<Lead>, ApiError> {
    let lead = app_state
        .lead_service
        .review(lead_id, decision, reviewer.0.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(lead))
}

#[utoipa::path(
    post,
    path = "/api/admin/leads/{id}/approve",
    tag = "Leads",
    params(("id" = Uuid, Path, description = "ID do cadastro")),
    responses(
        (status = 200, description = "Cadastro aprovado", body = Lead),
        (status = 404, description = "Cadastro não encontrado"),
        (status = 409, description = "Cadastro já revisado")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    reviewer: AuthenticatedUser,
    Path(lead_id): Path<Uuid>,
) -> Result<Json<Lead>, ApiError> {
    review(app_state, locale, reviewer, lead_id, LeadDecision::Approve).await
}

#[utoipa::path(
    post,
    path = "/api/admin/leads/{id}/reject",
    tag = "Leads",
    params(("id" = Uuid, Path, description = "ID do cadastro")),
    responses(
        (status = 200, description = "Cadastro rejeitado", body = Lead),
        (status = 404, description = "Cadastro não encontrado"),
        (status = 409, description = "Cadastro já revisado")
    ),
    security(("api_jwt" = []))
)]
pub async fn reject_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    reviewer: AuthenticatedUser,
    Path(lead_id): Path<Uuid>,
) -> Result<Json<Lead>, ApiError> {
    review(app_state, locale, reviewer, lead_id, LeadDecision::Reject).await
}
