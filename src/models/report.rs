// src/models/report.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::appointment::AppointmentOrigin;

// Linha crua de um agendamento concluído (com o preço do item vinculado)
#[derive(Debug, Clone, FromRow)]
pub struct RealizedAppointment {
    pub id: Uuid,
    pub service_id: Option<Uuid>,
    pub origin: AppointmentOrigin,
    pub price: Option<Decimal>,
    pub item_price: Option<Decimal>,
    pub concluded_at: DateTime<Utc>,
}

impl RealizedAppointment {
    /// `price ?? item.price ?? 0`
    pub fn realized_value(&self) -> Decimal {
        self.price.or(self.item_price).unwrap_or(Decimal::ZERO)
    }
}

// Linha crua de um pedido concluído/entregue
#[derive(Debug, Clone, FromRow)]
pub struct RealizedOrder {
    pub id: Uuid,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

// 1. Resumo de faturamento do período
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub services_total: Decimal,
    pub products_total: Decimal,
    pub realized_total: Decimal,
    pub appointments_count: i64,
    pub orders_count: i64,
    pub transactions_count: i64,
    pub average_ticket: Decimal,
}

// 2. Série diária (gráfico)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    #[schema(example = "2024-03-10")]
    pub date: NaiveDate,
    #[serde(flatten)]
    pub summary: RevenueSummary,
}

// 3. Cards do topo do painel
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub revenue_today: RevenueSummary,
    pub pending_appointments_today: i64,
    pub open_orders: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RevenueQuery {
    #[schema(example = "2024-03-01")]
    pub start: NaiveDate,
    #[schema(example = "2024-03-31")]
    pub end: NaiveDate,
}
