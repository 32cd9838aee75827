// src/services/lead_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LeadRepository,
    models::lead::{CreateLeadPayload, Lead, LeadDecision, LeadStatus},
};

#[derive(Clone)]
pub struct LeadService {
    repo: LeadRepository,
    pool: PgPool,
}

impl LeadService {
    pub fn new(repo: LeadRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Captação do site: todo lead nasce pendente.
    pub async fn capture(&self, payload: &CreateLeadPayload) -> Result<Lead, AppError> {
        let lead = self.repo.create(payload).await?;
        tracing::info!("📨 Novo lead {} ({})", lead.id, lead.shop_name);
        Ok(lead)
    }

    pub async fn list(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>, AppError> {
        self.repo.list(status).await
    }

    /// Aprova ou rejeita um lead pendente.
    pub async fn review(
        &self,
        lead_id: Uuid,
        decision: LeadDecision,
        reviewer_id: Uuid,
    ) -> Result<Lead, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self.repo
            .find_for_update(&mut *tx, lead_id)
            .await?
            .ok_or(AppError::LeadNotFound)?;

        if !current.status.can_be_reviewed() {
            return Err(AppError::LeadAlreadyReviewed);
        }

        let lead = self.repo
            .set_review(&mut *tx, lead_id, decision.target_status(), reviewer_id)
            .await?;

        tx.commit().await?;

        tracing::info!("✅ Lead {} revisado por {}: {:?}", lead.id, reviewer_id, lead.status);
        Ok(lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decisions_map_to_final_statuses() {
        assert_eq!(LeadDecision::Approve.target_status(), LeadStatus::Approved);
        assert_eq!(LeadDecision::Reject.target_status(), LeadStatus::Rejected);
    }

    #[test]
    fn only_pending_leads_can_be_reviewed() {
        assert!(LeadStatus::Pending.can_be_reviewed());
        for status in [LeadStatus::Approved, LeadStatus::Rejected, LeadStatus::Converted] {
            assert!(!status.can_be_reviewed());
        }
    }
}
