// src/db/club_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::club::{
        ClubPlan, ClubSubscription, CreateClubPlanPayload, SubscriptionStatus,
        UpdateClubPlanPayload,
    },
};

const SUBSCRIPTION_SELECT: &str = r#"
    SELECT s.id, s.barbershop_id, s.plan_id, p.name AS plan_name,
           s.client_id, c.name AS client_name,
           s.status, s.started_at, s.canceled_at
    FROM club_subscriptions s
    JOIN club_plans p ON p.id = s.plan_id
    JOIN clients c ON c.id = s.client_id
"#;

#[derive(Clone, Default)]
pub struct ClubRepository;

impl ClubRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  PLANOS
    // =========================================================================

    pub async fn create_plan<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        input: &CreateClubPlanPayload,
    ) -> Result<ClubPlan, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let plan = sqlx::query_as::<_, ClubPlan>(
            r#"
            INSERT INTO club_plans (barbershop_id, name, description, monthly_price)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.monthly_price)
        .fetch_one(executor)
        .await?;
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
        let plans = sqlx::query_as::<_, ClubPlan>(
            r#"
            SELECT * FROM club_plans
            WHERE barbershop_id = $1 AND (NOT $2 OR is_active)
            ORDER BY monthly_price ASC
            "#,
        )
        .bind(shop_id)
        .bind(active_only)
        .fetch_all(executor)
        .await?;
        Ok(plans)
    }

    pub async fn find_plan<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ClubPlan>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let plan = sqlx::query_as::<_, ClubPlan>(
            "SELECT * FROM club_plans WHERE barbershop_id = $1 AND id = $2",
        )
        .bind(shop_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(plan)
    }

    pub async fn update_plan<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
        input: &UpdateClubPlanPayload,
    ) -> Result<Option<ClubPlan>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let plan = sqlx::query_as::<_, ClubPlan>(
            r#"
            UPDATE club_plans SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                monthly_price = COALESCE($5, monthly_price),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE barbershop_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.description.as_deref())
        .bind(input.monthly_price)
        .bind(input.is_active)
        .fetch_optional(executor)
        .await?;
        Ok(plan)
    }

    // =========================================================================
    //  ASSINATURAS
    // =========================================================================

    pub async fn create_subscription<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        plan_id: Uuid,
        client_id: Uuid,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO club_subscriptions (barbershop_id, plan_id, client_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(shop_id)
        .bind(plan_id)
        .bind(client_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // O índice único parcial garante uma assinatura ativa por plano/cliente
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::SubscriptionAlreadyActive;
                }
            }
            AppError::DatabaseError(e)
        })?;
        Ok(id)
    }

    pub async fn find_subscription<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ClubSubscription>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{SUBSCRIPTION_SELECT} WHERE s.barbershop_id = $1 AND s.id = $2");
        let subscription = sqlx::query_as::<_, ClubSubscription>(&sql)
            .bind(shop_id)
            .bind(id)
            .fetch_optional(executor)
            .await?;
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
        let sql = format!(
            "{SUBSCRIPTION_SELECT} WHERE s.barbershop_id = $1 \
             AND ($2::subscription_status IS NULL OR s.status = $2) \
             ORDER BY s.started_at DESC"
        );
        let subscriptions = sqlx::query_as::<_, ClubSubscription>(&sql)
            .bind(shop_id)
            .bind(status)
            .fetch_all(executor)
            .await?;
        Ok(subscriptions)
    }

    /// Cancela só se ainda estiver ativa; devolve `false` caso contrário.
    pub async fn cancel_subscription<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE club_subscriptions
            SET status = 'canceled', canceled_at = NOW()
            WHERE barbershop_id = $1 AND id = $2 AND status = 'active'
            "#,
        )
        .bind(shop_id)
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
