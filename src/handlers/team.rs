// src/handlers/team.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        db_utils::get_rls_connection,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::TenantContext},
    models::team::{
        CreateProfessionalPayload, Professional, ProfessionalListQuery, UpdateProfessionalPayload,
    },
};

#[utoipa::path(
    post,
    path = "/api/professionals",
    tag = "Team",
    request_body = CreateProfessionalPayload,
    responses((status = 201, description = "Profissional cadastrado", body = Professional)),
    security(("api_jwt" = []))
)]
pub async fn create_professional(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CreateProfessionalPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let professional = app_state
        .team_service
        .create(&mut *rls_conn, tenant.0, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(professional)))
}

#[utoipa::path(
    get,
    path = "/api/professionals",
    tag = "Team",
    params(("activeOnly" = Option<bool>, Query, description = "Só ativos")),
    responses((status = 200, description = "Equipe", body = [Professional])),
    security(("api_jwt" = []))
)]
pub async fn list_professionals(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(query): Query<ProfessionalListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let team = app_state
        .team_service
        .list(&mut *rls_conn, tenant.0, query.active_only.unwrap_or(false))
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(team)))
}

/// Também serve para desativar (`isActive: false`).
#[utoipa::path(
    put,
    path = "/api/professionals/{id}",
    tag = "Team",
    request_body = UpdateProfessionalPayload,
    params(("id" = Uuid, Path, description = "ID do profissional")),
    responses(
        (status = 200, description = "Profissional atualizado", body = Professional),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_professional(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(professional_id): Path<Uuid>,
    Json(payload): Json<UpdateProfessionalPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let professional = app_state
        .team_service
        .update(&mut *rls_conn, tenant.0, professional_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(professional)))
}
