// src/middleware/auth.rs

use axum::{
    body::Body,
    extract::{FromRef, FromRequestParts, State},
    http::{request::Parts, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    extract::cookie::CookieJar,
    headers::{authorization::Bearer, Authorization, HeaderMapExt},
};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::{reject, Locale},
        tenancy::{TenantContext, SHOP_ID_HEADER},
    },
    models::auth::User,
    services::tenancy_service::SHOP_COOKIE,
};

async fn authenticate(app_state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let bearer = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::InvalidToken)?;

    app_state.auth_service.validate_token(bearer.token()).await
}

/// Loja pedida pelo cliente: cabeçalho `x-shop-id` primeiro, depois o cookie.
fn requested_shop(headers: &HeaderMap) -> Result<Option<Uuid>, AppError> {
    let from_header = headers
        .get(SHOP_ID_HEADER)
        .map(|value| value.to_str().unwrap_or_default().to_string());
    let from_cookie = || {
        CookieJar::from_headers(headers)
            .get(SHOP_COOKIE)
            .map(|cookie| cookie.value().to_string())
    };

    match from_header.or_else(from_cookie) {
        Some(raw) => Uuid::parse_str(raw.trim())
            .map(Some)
            .map_err(|_| AppError::ShopNotFound),
        None => Ok(None),
    }
}

/// Exige um Bearer válido e coloca o usuário nas extensions.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&app_state, request.headers())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Autentica e resolve a loja ativa do dono.
pub async fn tenant_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let user = authenticate(&app_state, request.headers()).await.map_err(to_api)?;
    let requested = requested_shop(request.headers()).map_err(to_api)?;

    let shop_id = app_state
        .tenant_service
        .resolve_active_shop(user.id, requested)
        .await
        .map_err(to_api)?;

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(TenantContext(shop_id));
    Ok(next.run(request).await)
}

/// Painel interno: só superadmin.
pub async fn superadmin_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let user = authenticate(&app_state, request.headers()).await.map_err(to_api)?;
    if !user.is_superadmin {
        tracing::warn!("🚫 Usuário {} tentou acessar o painel de superadmin", user.id);
        return Err(to_api(AppError::SuperadminRequired));
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<User>().cloned() {
            Some(user) => Ok(AuthenticatedUser(user)),
            None => Err(reject(parts, &AppState::from_ref(state), AppError::InvalidToken)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    #[test]
    fn header_wins_over_cookie() {
        let from_header = Uuid::new_v4();
        let from_cookie = Uuid::new_v4();

        let mut headers = HeaderMap::new();
        headers.insert(SHOP_ID_HEADER, HeaderValue::from_str(&from_header.to_string()).unwrap());
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{SHOP_COOKIE}={from_cookie}")).unwrap(),
        );

        assert_eq!(requested_shop(&headers).unwrap(), Some(from_header));
    }

    #[test]
    fn cookie_is_used_without_header() {
        let shop = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("tema=escuro; {SHOP_COOKIE}={shop}")).unwrap(),
        );

        assert_eq!(requested_shop(&headers).unwrap(), Some(shop));
    }

    #[test]
    fn nothing_requested_and_garbage_ids() {
        assert_eq!(requested_shop(&HeaderMap::new()).unwrap(), None);

        let mut headers = HeaderMap::new();
        headers.insert(SHOP_ID_HEADER, HeaderValue::from_static("loja-1"));
        assert!(matches!(requested_shop(&headers), Err(AppError::ShopNotFound)));
    }
}
