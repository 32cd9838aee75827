// src/models/club.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "subscription_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
}

// Plano do clube de assinatura (ex: "Corte ilimitado")
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubPlan {
    pub id: Uuid,
    #[schema(ignore)]
    pub barbershop_id: Uuid,
    #[schema(example = "Clube Corte Ilimitado")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "99.90")]
    pub monthly_price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubSubscription {
    pub id: Uuid,
    #[schema(ignore)]
    pub barbershop_id: Uuid,
    pub plan_id: Uuid,
    pub plan_name: String,
    pub client_id: Uuid,
    pub client_name: String,
    pub status: SubscriptionStatus,
    pub started_at: DateTime<Utc>,
    pub canceled_at: Option<DateTime<Utc>>,
}

fn validate_monthly_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() || price.is_zero() {
        let mut error = ValidationError::new("monthly_price");
        error.message = Some("A mensalidade deve ser maior que zero.".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClubPlanPayload {
    #[validate(length(min = 1, message = "O nome do plano é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_monthly_price"))]
    pub monthly_price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClubPlanPayload {
    #[validate(length(min = 1, message = "O nome do plano é obrigatório."))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_monthly_price"))]
    pub monthly_price: Option<Decimal>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribePayload {
    pub plan_id: Uuid,
    pub client_id: Uuid,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanListQuery {
    pub active_only: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SubscriptionListQuery {
    pub status: Option<SubscriptionStatus>,
}
