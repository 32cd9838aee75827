// src/models/showcase.rs

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    catalog::CatalogItem,
    club::ClubPlan,
    shop::Barbershop,
    team::Professional,
};

/// Dados públicos da loja (sem dono nem chave PIX).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicShop {
    pub name: String,
    pub slug: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
}

impl From<Barbershop> for PublicShop {
    fn from(shop: Barbershop) -> Self {
        Self {
            name: shop.name,
            slug: shop.slug,
            phone: shop.phone,
            address: shop.address,
            logo_url: shop.logo_url,
            primary_color: shop.primary_color,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfessional {
    pub id: Uuid,
    pub name: String,
}

impl From<Professional> for PublicProfessional {
    fn from(p: Professional) -> Self {
        Self { id: p.id, name: p.name }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShowcasePage {
    pub shop: PublicShop,
    pub services: Vec<CatalogItem>,
    pub products: Vec<CatalogItem>,
    pub professionals: Vec<PublicProfessional>,
    pub club_plans: Vec<ClubPlan>,
}
