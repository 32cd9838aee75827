// src/handlers/shops.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::TenantContext},
    models::shop::{Barbershop, CreateShopPayload, SelectShopPayload, ShopSummary, UpdateShopPayload},
    services::tenancy_service::SHOP_COOKIE,
};

#[utoipa::path(
    get,
    path = "/api/shops",
    tag = "Shops",
    responses(
        (status = 200, description = "Lojas do usuário logado", body = [Barbershop]),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_shops(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let shops = app_state
        .shop_service
        .list_owned(user.0.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(shops)))
}

/// Abre mais uma unidade para o mesmo dono.
#[utoipa::path(
    post,
    path = "/api/shops",
    tag = "Shops",
    request_body = CreateShopPayload,
    responses(
        (status = 201, description = "Loja criada", body = Barbershop),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_shop(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CreateShopPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let mut tx = app_state.db_pool.begin().await.map_err(|e| to_api(e.into()))?;
    let shop = app_state
        .shop_service
        .create_shop(
            &mut *tx,
            user.0.id,
            &payload.name,
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await
        .map_err(to_api)?;
    tx.commit().await.map_err(|e| to_api(e.into()))?;

    Ok((StatusCode::CREATED, Json(shop)))
}

/// Grava a loja escolhida no cookie (só se ela for do usuário).
#[utoipa::path(
    post,
    path = "/api/shops/select",
    tag = "Shops",
    request_body = SelectShopPayload,
    responses(
        (status = 200, description = "Loja selecionada", body = ShopSummary),
        (status = 403, description = "Loja de outro dono")
    ),
    security(("api_jwt" = []))
)]
pub async fn select_shop(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    jar: CookieJar,
    Json(payload): Json<SelectShopPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let shop_id = app_state
        .tenant_service
        .resolve_active_shop(user.0.id, Some(payload.shop_id))
        .await
        .map_err(to_api)?;
    let shop = app_state.shop_service.get(shop_id).await.map_err(to_api)?;

    let cookie = Cookie::build((SHOP_COOKIE, shop_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), Json(ShopSummary::from(&shop))))
}

#[utoipa::path(
    get,
    path = "/api/shop",
    tag = "Shops",
    params(("x-shop-id" = Option<uuid::Uuid>, Header, description = "Loja ativa (ou cookie)")),
    responses(
        (status = 200, description = "Perfil da loja ativa", body = Barbershop),
        (status = 409, description = "Mais de uma loja: selecione uma")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_active_shop(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let shop = app_state
        .shop_service
        .get(tenant.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(shop)))
}

#[utoipa::path(
    put,
    path = "/api/shop",
    tag = "Shops",
    request_body = UpdateShopPayload,
    params(("x-shop-id" = Option<uuid::Uuid>, Header, description = "Loja ativa (ou cookie)")),
    responses(
        (status = 200, description = "Perfil atualizado", body = Barbershop),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_active_shop(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(payload): Json<UpdateShopPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let shop = app_state
        .shop_service
        .update(tenant.0, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(shop)))
}
