// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;

// --- Enums ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed, // Retirado na loja
    Delivered, // Entregue
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Delivered | OrderStatus::Canceled)
    }

    /// Conta como faturamento realizado.
    pub fn is_realized(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Delivered)
    }

    /// Rótulos dos status que contam como faturamento, para `= ANY($n)`.
    pub fn realized_labels() -> Vec<&'static str> {
        Self::ALL.into_iter().filter(|s| s.is_realized()).map(Self::as_str).collect()
    }

    /// Rótulos dos status ainda em andamento.
    pub fn open_labels() -> Vec<&'static str> {
        Self::ALL.into_iter().filter(|s| !s.is_terminal()).map(Self::as_str).collect()
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (from, Canceled) => !from.is_terminal(),
            (Pending, Confirmed) => true,
            (Confirmed, Preparing) => true,
            (Preparing, Ready) => true,
            (Ready, Completed | Delivered) => true,
            _ => false,
        }
    }

    pub fn transition_to(self, next: OrderStatus) -> Result<OrderStatus, AppError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(AppError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    #[schema(ignore)]
    pub barbershop_id: Uuid,
    pub client_id: Option<Uuid>,
    #[schema(example = 1024)]
    pub display_id: i32,
    #[schema(example = "Pedro Alves")]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub status: OrderStatus,
    #[schema(example = "89.90")]
    pub total: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub pedido_id: Uuid,
    pub item_id: Uuid,
    #[schema(example = "Pomada modeladora")]
    pub item_name: String,
    #[schema(example = 2)]
    pub quantity: i32,
    #[schema(example = "39.95")]
    pub unit_price: Decimal,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub header: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
    pub item_id: Uuid,
    #[validate(range(min = 1, max = 999, message = "Quantidade inválida."))]
    pub quantity: i32,
}

/// Pedido feito pela vitrine pública.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderPayload {
    #[validate(length(min = 2, message = "Informe seu nome."))]
    pub customer_name: String,
    #[validate(length(min = 8, message = "Telefone inválido."))]
    pub customer_phone: Option<String>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    #[validate(nested)]
    pub items: Vec<OrderLinePayload>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOrderPayload {
    pub status: OrderStatus,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

/// Linha já precificada, pronta para gravar.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub item_id: Uuid,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

pub fn order_total(lines: &[PricedLine]) -> Decimal {
    lines
        .iter()
        .map(|l| l.unit_price * Decimal::from(l.quantity))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn forward_path_is_allowed() {
        assert_eq!(Pending.transition_to(Confirmed).unwrap(), Confirmed);
        assert_eq!(Confirmed.transition_to(Preparing).unwrap(), Preparing);
        assert_eq!(Preparing.transition_to(Ready).unwrap(), Ready);
        assert_eq!(Ready.transition_to(Delivered).unwrap(), Delivered);
        assert_eq!(Ready.transition_to(Completed).unwrap(), Completed);
    }

    #[test]
    fn skipping_steps_is_rejected() {
        assert!(Pending.transition_to(Ready).is_err());
        assert!(Confirmed.transition_to(Delivered).is_err());
        assert!(Pending.transition_to(Pending).is_err());
    }

    #[test]
    fn cancel_only_from_open_states() {
        for open in [Pending, Confirmed, Preparing, Ready] {
            assert!(open.can_transition_to(Canceled));
        }
        for closed in [Completed, Delivered, Canceled] {
            assert!(!closed.can_transition_to(Canceled));
        }
    }

    #[test]
    fn only_completed_and_delivered_are_realized() {
        let realized: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(|s| s.is_realized())
            .collect();
        assert_eq!(realized, vec![Completed, Delivered]);
        assert_eq!(OrderStatus::realized_labels(), vec!["completed", "delivered"]);
    }

    #[test]
    fn open_labels_are_the_non_terminal_states() {
        assert_eq!(
            OrderStatus::open_labels(),
            vec!["pending", "confirmed", "preparing", "ready"]
        );
    }

    #[test]
    fn total_multiplies_quantity_by_unit_price() {
        let lines = vec![
            PricedLine {
                item_id: Uuid::new_v4(),
                item_name: "Pomada".into(),
                quantity: 2,
                unit_price: Decimal::new(3995, 2),
            },
            PricedLine {
                item_id: Uuid::new_v4(),
                item_name: "Shampoo".into(),
                quantity: 1,
                unit_price: Decimal::new(2500, 2),
            },
        ];
        assert_eq!(order_total(&lines), Decimal::new(10490, 2));
    }
}
