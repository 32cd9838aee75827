// src/models/lead.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Mapeia o CREATE TYPE lead_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lead_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Pending,   // Aguardando o superadmin
    Approved,  // Pode se registrar
    Rejected,
    Converted, // Já virou conta + barbearia
}

/// Interessado vindo do site de captação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    #[schema(example = "Carlos Souza")]
    pub name: String,
    #[schema(example = "carlos@barbeariadocarlos.com")]
    pub email: String,
    #[schema(example = "(11) 98888-7777")]
    pub phone: String,
    #[schema(example = "Barbearia do Carlos")]
    pub shop_name: String,
    pub message: Option<String>,
    pub status: LeadStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub converted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 8, message = "Telefone inválido."))]
    pub phone: String,
    #[validate(length(min = 2, message = "Informe o nome da barbearia."))]
    pub shop_name: String,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LeadListQuery {
    pub status: Option<LeadStatus>,
}

/// Decisão do superadmin sobre um lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadDecision {
    Approve,
    Reject,
}

impl LeadDecision {
    pub fn target_status(self) -> LeadStatus {
        match self {
            LeadDecision::Approve => LeadStatus::Approved,
            LeadDecision::Reject => LeadStatus::Rejected,
        }
    }
}

impl LeadStatus {
    /// Só leads pendentes podem ser aprovados ou rejeitados.
    pub fn can_be_reviewed(self) -> bool {
        self == LeadStatus::Pending
    }
}
