// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{
        db_utils::get_rls_connection,
        error::ApiError,
        time::{ensure_daily_span, local_day_range},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::TenantContext},
    models::report::{DailyRevenue, RevenueQuery, RevenueSummary},
};

// GET /api/reports/revenue?start=2024-03-01&end=2024-03-31
#[utoipa::path(
    get,
    path = "/api/reports/revenue",
    tag = "Reports",
    params(
        ("start" = chrono::NaiveDate, Query, description = "Primeiro dia (local)"),
        ("end" = chrono::NaiveDate, Query, description = "Último dia (local, inclusivo)")
    ),
    responses(
        (status = 200, description = "Faturamento realizado do período", body = RevenueSummary),
        (status = 400, description = "Intervalo inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn revenue_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(query): Query<RevenueQuery>,
) -> Result<impl IntoResponse, ApiError> {
    // Intervalo inválido nem chega a pegar conexão
    local_day_range(query.start, query.end, app_state.utc_offset)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let summary = app_state
        .report_service
        .revenue_summary(&mut *rls_conn, tenant.0, query.start, query.end)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}

#[utoipa::path(
    get,
    path = "/api/reports/revenue/daily",
    tag = "Reports",
    params(
        ("start" = chrono::NaiveDate, Query, description = "Primeiro dia (local)"),
        ("end" = chrono::NaiveDate, Query, description = "Último dia (local, inclusivo)")
    ),
    responses(
        (status = 200, description = "Série diária, com dias zerados", body = [DailyRevenue]),
        (status = 400, description = "Intervalo inválido ou maior que 366 dias")
    ),
    security(("api_jwt" = []))
)]
pub async fn revenue_daily(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(query): Query<RevenueQuery>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_daily_span(query.start, query.end)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let series = app_state
        .report_service
        .daily(&mut *rls_conn, tenant.0, query.start, query.end)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(series)))
}
