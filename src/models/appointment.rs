// src/models/appointment.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::error::AppError;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_origin", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentOrigin {
    Normal,
    QuickSale, // Venda de balcão registrada como agendamento
}

/// Ações do painel sobre um agendamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentAction {
    Confirm,
    Complete,
    Cancel,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Canceled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Canceled => "canceled",
        }
    }

    /// Ainda aguardando atendimento.
    pub fn is_open(self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }

    pub fn open_labels() -> Vec<&'static str> {
        Self::ALL.into_iter().filter(|s| s.is_open()).map(Self::as_str).collect()
    }

    /// Máquina de estados: pendente -> confirmado -> concluído, com
    /// cancelamento possível enquanto não concluído.
    pub fn apply(self, action: AppointmentAction) -> Result<AppointmentStatus, AppError> {
        use AppointmentAction::*;
        use AppointmentStatus::*;

        let next = match (self, action) {
            (Pending, Confirm) => Confirmed,
            (Pending | Confirmed, Complete) => Completed,
            (Pending | Confirmed, Cancel) => Canceled,
            (from, action) => {
                let to = match action {
                    Confirm => Confirmed,
                    Complete => Completed,
                    Cancel => Canceled,
                };
                return Err(AppError::InvalidStatusTransition {
                    from: from.as_str().to_string(),
                    to: to.as_str().to_string(),
                });
            }
        };
        Ok(next)
    }
}

/// Em qual total o agendamento concluído entra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SaleKind {
    Service,
    Product,
}

impl SaleKind {
    /// Venda de produto se for venda rápida ou não tiver serviço vinculado.
    pub fn classify(origin: AppointmentOrigin, service_id: Option<Uuid>) -> SaleKind {
        if origin == AppointmentOrigin::QuickSale || service_id.is_none() {
            SaleKind::Product
        } else {
            SaleKind::Service
        }
    }
}

// --- Structs ---

/// Agendamento com os nomes das entidades vinculadas (para as telas).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    #[schema(ignore)]
    pub barbershop_id: Uuid,
    pub client_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub professional_id: Option<Uuid>,
    pub professional_name: Option<String>,
    pub service_id: Option<Uuid>,
    pub service_name: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[schema(example = "45.00")]
    pub price: Option<Decimal>,
    pub origin: AppointmentOrigin,
    pub notes: Option<String>,
    pub concluded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    pub client_id: Option<Uuid>,
    pub professional_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub scheduled_at: DateTime<Utc>,
    pub price: Option<Decimal>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

fn validate_quick_sale(payload: &QuickSalePayload) -> Result<(), ValidationError> {
    if payload.item_id.is_none() && payload.price.is_none() {
        let mut error = ValidationError::new("item_or_price");
        error.message = Some("Informe o item ou o valor da venda.".into());
        return Err(error);
    }
    if payload.price.is_some_and(|p| p.is_sign_negative()) {
        let mut error = ValidationError::new("negative_price");
        error.message = Some("O valor não pode ser negativo.".into());
        return Err(error);
    }
    Ok(())
}

/// Venda rápida (balcão): nasce concluída.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_quick_sale"))]
pub struct QuickSalePayload {
    pub item_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub professional_id: Option<Uuid>,
    pub price: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListQuery {
    #[schema(example = "2024-03-01")]
    pub start: NaiveDate,
    #[schema(example = "2024-03-31")]
    pub end: NaiveDate,
    pub status: Option<AppointmentStatus>,
    pub professional_id: Option<Uuid>,
}

/// Agendamento feito pela vitrine pública.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentPayload {
    #[validate(length(min = 2, message = "Informe seu nome."))]
    pub client_name: String,
    #[validate(length(min = 8, message = "Telefone inválido."))]
    pub client_phone: String,
    pub professional_id: Option<Uuid>,
    pub service_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentAction::*;
    use AppointmentStatus::*;

    #[test]
    fn happy_path_transitions() {
        assert_eq!(Pending.apply(Confirm).unwrap(), Confirmed);
        assert_eq!(Confirmed.apply(Complete).unwrap(), Completed);
        assert_eq!(Pending.apply(Complete).unwrap(), Completed);
        assert_eq!(Confirmed.apply(Cancel).unwrap(), Canceled);
    }

    #[test]
    fn open_states_are_the_ones_that_still_accept_actions() {
        assert_eq!(AppointmentStatus::open_labels(), vec!["pending", "confirmed"]);
        for status in AppointmentStatus::ALL {
            assert_eq!(status.is_open(), status.apply(AppointmentAction::Cancel).is_ok());
        }
    }

    #[test]
    fn terminal_states_reject_every_action() {
        for status in [Completed, Canceled] {
            for action in [Confirm, Complete, Cancel] {
                assert!(matches!(
                    status.apply(action),
                    Err(AppError::InvalidStatusTransition { .. })
                ));
            }
        }
    }

    #[test]
    fn confirming_twice_is_rejected() {
        let err = Confirmed.apply(Confirm).unwrap_err();
        match err {
            AppError::InvalidStatusTransition { from, to } => {
                assert_eq!(from, "confirmed");
                assert_eq!(to, "confirmed");
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[test]
    fn quick_sale_is_always_a_product_sale() {
        let service = Some(Uuid::new_v4());
        assert_eq!(SaleKind::classify(AppointmentOrigin::QuickSale, service), SaleKind::Product);
        assert_eq!(SaleKind::classify(AppointmentOrigin::QuickSale, None), SaleKind::Product);
    }

    #[test]
    fn normal_appointment_without_service_is_a_product_sale() {
        assert_eq!(SaleKind::classify(AppointmentOrigin::Normal, None), SaleKind::Product);
        assert_eq!(
            SaleKind::classify(AppointmentOrigin::Normal, Some(Uuid::new_v4())),
            SaleKind::Service
        );
    }

    #[test]
    fn quick_sale_needs_item_or_price() {
        let payload = QuickSalePayload {
            item_id: None,
            client_id: None,
            professional_id: None,
            price: None,
            notes: None,
        };
        assert!(payload.validate().is_err());

        let payload = QuickSalePayload { price: Some(Decimal::new(3000, 2)), ..payload };
        assert!(payload.validate().is_ok());
    }
}
