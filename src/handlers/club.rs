// src/handlers/club.rs

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
    models::club::{
        ClubPlan, ClubSubscription, CreateClubPlanPayload, PlanListQuery, SubscribePayload,
        SubscriptionListQuery, SubscriptionStatus, UpdateClubPlanPayload,
    },
};

// =============================================================================
//  PLANOS
// =============================================================================

#[utoipa::path(
    post,
    path = "/api/club/plans",
    tag = "Club",
    request_body = CreateClubPlanPayload,
    responses(
        (status = 201, description = "Plano criado", body = ClubPlan),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_plan(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CreateClubPlanPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let plan = app_state
        .club_service
        .create_plan(&mut *rls_conn, tenant.0, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(plan)))
}

#[utoipa::path(
    get,
    path = "/api/club/plans",
    tag = "Club",
    params(("activeOnly" = Option<bool>, Query, description = "Só planos ativos")),
    responses((status = 200, description = "Planos", body = [ClubPlan])),
    security(("api_jwt" = []))
)]
pub async fn list_plans(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(query): Query<PlanListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let plans = app_state
        .club_service
        .list_plans(&mut *rls_conn, tenant.0, query.active_only.unwrap_or(false))
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(plans)))
}

#[utoipa::path(
    put,
    path = "/api/club/plans/{id}",
    tag = "Club",
    request_body = UpdateClubPlanPayload,
    params(("id" = Uuid, Path, description = "ID do plano")),
    responses(
        (status = 200, description = "Plano atualizado", body = ClubPlan),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_plan(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(plan_id): Path<Uuid>,
    Json(payload): Json<UpdateClubPlanPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let plan = app_state
        .club_service
        .update_plan(&mut *rls_conn, tenant.0, plan_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(plan)))
}

// =============================================================================
//  ASSINATURAS
// =============================================================================

#[utoipa::path(
    post,
    path = "/api/club/subscriptions",
    tag = "Club",
    request_body = SubscribePayload,
    responses(
        (status = 201, description = "Assinatura criada", body = ClubSubscription),
        (status = 409, description = "Cliente já assina este plano"),
        (status = 422, description = "Plano inativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<SubscribePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let subscription = app_state
        .club_service
        .subscribe(&mut *rls_conn, tenant.0, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(subscription)))
}

#[utoipa::path(
    get,
    path = "/api/club/subscriptions",
    tag = "Club",
    params(("status" = Option<SubscriptionStatus>, Query, description = "active | canceled")),
    responses((status = 200, description = "Assinaturas", body = [ClubSubscription])),
    security(("api_jwt" = []))
)]
pub async fn list_subscriptions(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(query): Query<SubscriptionListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let subscriptions = app_state
        .club_service
        .list_subscriptions(&mut *rls_conn, tenant.0, query.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(subscriptions)))
}

#[utoipa::path(
    post,
    path = "/api/club/subscriptions/{id}/cancel",
    tag = "Club",
    params(("id" = Uuid, Path, description = "ID da assinatura")),
    responses(
        (status = 200, description = "Assinatura cancelada", body = ClubSubscription),
        (status = 409, description = "Já cancelada")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_subscription(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(subscription_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let subscription = app_state
        .club_service
        .cancel(&mut *rls_conn, tenant.0, subscription_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(subscription)))
}
