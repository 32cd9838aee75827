// src/middleware/tenancy.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::reject,
};

/// Cabeçalho opcional que escolhe a loja (alternativa ao cookie).
pub const SHOP_ID_HEADER: &str = "x-shop-id";

/// Loja ativa da requisição, já validada pelo `tenant_guard`.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub Uuid);

impl<S> FromRequestParts<S> for TenantContext
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Só existe se a rota estiver atrás do tenant_guard
        match parts.extensions.get::<TenantContext>().copied() {
            Some(tenant) => Ok(tenant),
            None => Err(reject(parts, &AppState::from_ref(state), AppError::NoShop)),
        }
    }
}
