use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;
use crate::models::shop::ShopSummary;

// Nosso tipo de erro de domínio. Os handlers convertem para `ApiError`
// (já traduzido) através de `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Intervalo de datas inválido")]
    InvalidDateRange,

    #[error("Intervalo maior que {max_days} dias")]
    DateRangeTooLong { max_days: i64 },

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso restrito ao superadmin")]
    SuperadminRequired,

    // --- Leads ---
    #[error("Nenhum cadastro aprovado para este e-mail")]
    LeadNotApproved,

    #[error("Lead não encontrado")]
    LeadNotFound,

    #[error("Lead já revisado")]
    LeadAlreadyReviewed,

    // --- Tenancy ---
    #[error("Usuário não possui barbearia")]
    NoShop,

    #[error("Barbearia não encontrada")]
    ShopNotFound,

    #[error("Sem acesso à barbearia {0}")]
    ShopAccessDenied(Uuid),

    #[error("Selecione uma barbearia")]
    ShopSelectionRequired(Vec<ShopSummary>),

    #[error("Não foi possível gerar um endereço único para a barbearia")]
    SlugUnavailable,

    // --- Cadastros / Operações ---
    #[error("Registro não encontrado: {0}")]
    ResourceNotFound(&'static str),

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Pedido sem itens")]
    EmptyOrder,

    #[error("Item indisponível: {0}")]
    ItemUnavailable(Uuid),

    #[error("Plano inativo")]
    InactivePlan,

    #[error("Cliente já possui assinatura ativa neste plano")]
    SubscriptionAlreadyActive,

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// Erro já pronto para a resposta HTTP (mensagem traduzida).
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl AppError {
    /// Status HTTP e chave de tradução de cada variante.
    fn status_and_key(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "error.validation"),
            AppError::InvalidDateRange => (StatusCode::BAD_REQUEST, "error.invalid_date_range"),
            AppError::DateRangeTooLong { .. } => (StatusCode::BAD_REQUEST, "error.date_range_too_long"),
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "error.email_exists"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "error.invalid_credentials"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "error.invalid_token"),
            AppError::SuperadminRequired => (StatusCode::FORBIDDEN, "error.superadmin_required"),
            AppError::LeadNotApproved => (StatusCode::FORBIDDEN, "error.lead_not_approved"),
            AppError::LeadNotFound => (StatusCode::NOT_FOUND, "error.lead_not_found"),
            AppError::LeadAlreadyReviewed => (StatusCode::CONFLICT, "error.lead_already_reviewed"),
            AppError::NoShop => (StatusCode::NOT_FOUND, "error.no_shop"),
            AppError::ShopNotFound => (StatusCode::NOT_FOUND, "error.shop_not_found"),
            AppError::ShopAccessDenied(_) => (StatusCode::FORBIDDEN, "error.shop_access_denied"),
            AppError::ShopSelectionRequired(_) => (StatusCode::CONFLICT, "error.shop_selection_required"),
            AppError::SlugUnavailable => (StatusCode::CONFLICT, "error.slug_unavailable"),
            AppError::ResourceNotFound(_) => (StatusCode::NOT_FOUND, "error.not_found"),
            AppError::InvalidStatusTransition { .. } => (StatusCode::CONFLICT, "error.invalid_status_transition"),
            AppError::EmptyOrder => (StatusCode::BAD_REQUEST, "error.empty_order"),
            AppError::ItemUnavailable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "error.item_unavailable"),
            AppError::InactivePlan => (StatusCode::UNPROCESSABLE_ENTITY, "error.inactive_plan"),
            AppError::SubscriptionAlreadyActive => (StatusCode::CONFLICT, "error.subscription_active"),
            AppError::DatabaseError(sqlx::Error::RowNotFound) => (StatusCode::NOT_FOUND, "error.not_found"),
            AppError::FontNotFound(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "error.internal"),
        }
    }

    /// Traduz o erro para o idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let (status, key) = self.status_and_key();

        if status.is_server_error() {
            // O detalhe técnico vai só para o log, nunca para o cliente.
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let mut error = store.translate(&locale.0, key);
        let details = match self {
            AppError::ValidationError(errors) => {
                let mut fields = serde_json::Map::new();
                collect_validation_details(errors, "", &mut fields);
                Some(Value::Object(fields))
            }
            AppError::ShopSelectionRequired(shops) => Some(json!({ "shops": shops })),
            AppError::InvalidStatusTransition { from, to } => {
                error = error.replace("{from}", from).replace("{to}", to);
                Some(json!({ "from": from, "to": to }))
            }
            AppError::DateRangeTooLong { max_days } => {
                error = error.replace("{max}", &max_days.to_string());
                Some(json!({ "maxDays": max_days }))
            }
            AppError::ResourceNotFound(resource) => Some(json!({ "resource": resource })),
            AppError::ItemUnavailable(id) => Some(json!({ "itemId": id })),
            AppError::ShopAccessDenied(id) => Some(json!({ "shopId": id })),
            _ => None,
        };

        ApiError { status, error, details }
    }
}

/// Achata erros aninhados em chaves como `items[0].quantity`.
fn collect_validation_details(
    errors: &ValidationErrors,
    prefix: &str,
    out: &mut serde_json::Map<String, Value>,
) {
    for (field, kind) in errors.errors() {
        let key = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages: Vec<Value> = field_errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(m) => Value::String(m.to_string()),
                        None => Value::String(e.code.to_string()),
                    })
                    .collect();
                out.insert(key, Value::Array(messages));
            }
            ValidationErrorsKind::Struct(inner) => collect_validation_details(inner, &key, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_validation_details(inner, &format!("{}[{}]", key, index), out);
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn pt() -> Locale {
        Locale("pt".to_string())
    }

    #[derive(Validate)]
    struct Payload {
        #[validate(email(message = "E-mail inválido"))]
        email: String,
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let errors = Payload { email: "nope".into() }.validate().unwrap_err();
        let api = AppError::ValidationError(errors).to_api_error(&pt(), &I18nStore::load());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details");
        assert_eq!(details["email"][0], "E-mail inválido");
    }

    #[test]
    fn nested_line_errors_are_reported_with_their_index() {
        use crate::models::order::{OrderLinePayload, PlaceOrderPayload};

        let payload = PlaceOrderPayload {
            customer_name: "Pedro".into(),
            customer_phone: None,
            notes: None,
            items: vec![
                OrderLinePayload { item_id: Uuid::new_v4(), quantity: 1 },
                OrderLinePayload { item_id: Uuid::new_v4(), quantity: 0 },
            ],
        };
        let errors = payload.validate().unwrap_err();
        let api = AppError::ValidationError(errors).to_api_error(&pt(), &I18nStore::load());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details");
        assert_eq!(details["items[1].quantity"][0], "Quantidade inválida.");
        assert!(details.get("items[0].quantity").is_none());
    }

    #[test]
    fn slug_exhaustion_is_a_conflict_not_a_server_error() {
        let api = AppError::SlugUnavailable.to_api_error(&pt(), &I18nStore::load());
        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_ne!(api.error, "error.slug_unavailable");
    }

    #[test]
    fn long_daily_range_names_the_limit() {
        let api = AppError::DateRangeTooLong { max_days: 366 }
            .to_api_error(&Locale("en".into()), &I18nStore::load());
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert!(api.error.contains("366"));
        assert_eq!(api.details.unwrap()["maxDays"], 366);
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let api = AppError::DatabaseError(sqlx::Error::RowNotFound)
            .to_api_error(&pt(), &I18nStore::load());
        assert_eq!(api.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let api = AppError::InternalServerError(anyhow::anyhow!("senha do banco: hunter2"))
            .to_api_error(&pt(), &I18nStore::load());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("hunter2"));
    }

    #[test]
    fn status_transition_message_names_both_states() {
        let api = AppError::InvalidStatusTransition {
            from: "completed".into(),
            to: "canceled".into(),
        }
        .to_api_error(&Locale("en".into()), &I18nStore::load());

        assert_eq!(api.status, StatusCode::CONFLICT);
        assert!(api.error.contains("completed"));
        assert!(api.error.contains("canceled"));
    }

    #[test]
    fn shop_selection_lists_candidates() {
        let shops = vec![ShopSummary {
            id: Uuid::new_v4(),
            name: "Centro".into(),
            slug: "centro".into(),
        }];
        let api = AppError::ShopSelectionRequired(shops).to_api_error(&pt(), &I18nStore::load());

        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.details.unwrap()["shops"][0]["name"], "Centro");
    }
}
