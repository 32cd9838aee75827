// src/models/shop.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// Barbershop (O "Tenant")
// ---
// A unidade de isolamento: tudo pertence a uma barbearia, e cada
// barbearia tem exatamente um dono.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Barbershop {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[schema(example = "Barbearia do Carlos")]
    pub name: String,
    #[schema(example = "barbearia-do-carlos")]
    pub slug: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub pix_key: Option<String>,
    pub logo_url: Option<String>,
    #[schema(example = "#1F2937")]
    pub primary_color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Versão enxuta usada nas listas de seleção de loja.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShopSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<&Barbershop> for ShopSummary {
    fn from(shop: &Barbershop) -> Self {
        Self {
            id: shop.id,
            name: shop.name.clone(),
            slug: shop.slug.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShopPayload {
    #[validate(length(min = 2, message = "O nome da barbearia é obrigatório."))]
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectShopPayload {
    pub shop_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShopPayload {
    #[validate(length(min = 2, message = "O nome da barbearia é obrigatório."))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[schema(example = "12.345.678/0001-99")]
    pub pix_key: Option<String>,
    #[validate(url(message = "URL inválida."))]
    pub logo_url: Option<String>,
    #[validate(length(equal = 7, message = "Use o formato #RRGGBB."))]
    pub primary_color: Option<String>,
}
