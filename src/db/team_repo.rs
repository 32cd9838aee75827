// src/db/team_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::team::{CreateProfessionalPayload, Professional, UpdateProfessionalPayload},
};

#[derive(Clone, Default)]
pub struct TeamRepository;

impl TeamRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        input: &CreateProfessionalPayload,
    ) -> Result<Professional, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let professional = sqlx::query_as::<_, Professional>(
            r#"
            INSERT INTO professionals (barbershop_id, name, phone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(&input.name)
        .bind(input.phone.as_deref())
        .fetch_one(executor)
        .await?;
        Ok(professional)
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<Professional>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let team = sqlx::query_as::<_, Professional>(
            r#"
            SELECT * FROM professionals
            WHERE barbershop_id = $1 AND (NOT $2 OR is_active)
            ORDER BY name
            "#,
        )
        .bind(shop_id)
        .bind(active_only)
        .fetch_all(executor)
        .await?;
        Ok(team)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Professional>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let professional = sqlx::query_as::<_, Professional>(
            "SELECT * FROM professionals WHERE barbershop_id = $1 AND id = $2",
        )
        .bind(shop_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(professional)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
        input: &UpdateProfessionalPayload,
    ) -> Result<Option<Professional>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let professional = sqlx::query_as::<_, Professional>(
            r#"
            UPDATE professionals SET
                name = COALESCE($3, name),
                phone = COALESCE($4, phone),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE barbershop_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.is_active)
        .fetch_optional(executor)
        .await?;
        Ok(professional)
    }
}
