// src/db/catalog_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{CatalogItem, CatalogKind, CreateCatalogItemPayload, UpdateCatalogItemPayload},
};

#[derive(Clone, Default)]
pub struct CatalogRepository;

impl CatalogRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        input: &CreateCatalogItemPayload,
    ) -> Result<CatalogItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            INSERT INTO catalog_items (barbershop_id, kind, name, description, price, duration_minutes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(input.kind)
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.price)
        .bind(input.duration_minutes)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        kind: Option<CatalogKind>,
        active_only: bool,
    ) -> Result<Vec<CatalogItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT * FROM catalog_items
            WHERE barbershop_id = $1
              AND ($2::catalog_kind IS NULL OR kind = $2)
              AND (NOT $3 OR is_active)
            ORDER BY kind, name
            "#,
        )
        .bind(shop_id)
        .bind(kind)
        .bind(active_only)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<CatalogItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, CatalogItem>(
            "SELECT * FROM catalog_items WHERE barbershop_id = $1 AND id = $2",
        )
        .bind(shop_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }

    /// Itens ativos do tipo pedido, limitados à loja.
    pub async fn find_active_by_ids<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        kind: CatalogKind,
        ids: &[Uuid],
    ) -> Result<Vec<CatalogItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT * FROM catalog_items
            WHERE barbershop_id = $1 AND kind = $2 AND is_active AND id = ANY($3)
            "#,
        )
        .bind(shop_id)
        .bind(kind)
        .bind(ids)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
        input: &UpdateCatalogItemPayload,
    ) -> Result<Option<CatalogItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            UPDATE catalog_items SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                duration_minutes = COALESCE($6, duration_minutes),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE barbershop_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.description.as_deref())
        .bind(input.price)
        .bind(input.duration_minutes)
        .bind(input.is_active)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }
}
