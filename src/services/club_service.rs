// src/services/club_service.rs

use sqlx::{Acquire, Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, ClubRepository},
    models::club::{
        ClubPlan, ClubSubscription, CreateClubPlanPayload, SubscribePayload, SubscriptionStatus,
        UpdateClubPlanPayload,
    },
};

#[derive(Clone)]
pub struct ClubService {
    repo: ClubRepository,
    client_repo: ClientRepository,
}

impl ClubService {
    pub fn new(repo: ClubRepository, client_repo: ClientRepository) -> Self {
        Self { repo, client_repo }
    }

    // --- Planos ---

    pub async fn create_plan<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        input: &CreateClubPlanPayload,
    ) -> Result<ClubPlan, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let plan = self.repo.create_plan(executor, shop_id, input).await?;
        tracing::info!("⭐ Plano '{}' criado na loja {}", plan.name, shop_id);
        Ok(plan)
    }

    pub async fn list_plans<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<ClubPlan>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_plans(executor, shop_id, active_only).await
    }

    pub async fn update_plan<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
        input: &UpdateClubPlanPayload,
    ) -> Result<ClubPlan, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_plan(executor, shop_id, id, input)
            .await?
            .ok_or(AppError::ResourceNotFound("club_plan"))
    }

    // --- Assinaturas ---

    /// Assina o plano para o cliente. Plano inativo não aceita novas assinaturas.
    pub async fn subscribe<'e, A>(
        &self,
        executor: A,
        shop_id: Uuid,
        input: &SubscribePayload,
    ) -> Result<ClubSubscription, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let plan = self.repo
            .find_plan(&mut *tx, shop_id, input.plan_id)
            .await?
            .ok_or(AppError::ResourceNotFound("club_plan"))?;
        if !plan.is_active {
            return Err(AppError::InactivePlan);
        }

        self.client_repo
            .find_by_id(&mut *tx, shop_id, input.client_id)
            .await?
            .ok_or(AppError::ResourceNotFound("client"))?;

        let id = self.repo
            .create_subscription(&mut *tx, shop_id, plan.id, input.client_id)
            .await?;
        let subscription = self.repo
            .find_subscription(&mut *tx, shop_id, id)
            .await?
            .ok_or(AppError::ResourceNotFound("club_subscription"))?;

        tx.commit().await?;

        tracing::info!("⭐ Cliente {} assinou o plano '{}'", input.client_id, plan.name);
        Ok(subscription)
    }

    pub async fn list_subscriptions<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        status: Option<SubscriptionStatus>,
    ) -> Result<Vec<ClubSubscription>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_subscriptions(executor, shop_id, status).await
    }

    pub async fn cancel(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<ClubSubscription, AppError> {
        let current = self.repo
            .find_subscription(&mut *conn, shop_id, id)
            .await?
            .ok_or(AppError::ResourceNotFound("club_subscription"))?;

        if !self.repo.cancel_subscription(&mut *conn, shop_id, id).await? {
            return Err(AppError::InvalidStatusTransition {
                from: "canceled".to_string(),
                to: "canceled".to_string(),
            });
        }

        tracing::info!("⭐ Assinatura {} do cliente {} cancelada", id, current.client_id);

        self.repo
            .find_subscription(&mut *conn, shop_id, id)
            .await?
            .ok_or(AppError::ResourceNotFound("club_subscription"))
    }
}
