// src/services/catalog_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{
        CatalogItem, CatalogKind, CatalogListQuery, CreateCatalogItemPayload,
        UpdateCatalogItemPayload,
    },
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
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
        // Duração só faz sentido para serviços
        if input.kind == CatalogKind::Product && input.duration_minutes.is_some() {
            let mut errors = validator::ValidationErrors::new();
            errors.add(
                "durationMinutes",
                validator::ValidationError::new("product_duration")
                    .with_message("Produtos não têm duração.".into()),
            );
            return Err(AppError::ValidationError(errors));
        }
        self.repo.create(executor, shop_id, input).await
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        query: &CatalogListQuery,
    ) -> Result<Vec<CatalogItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .list(executor, shop_id, query.kind, query.active_only.unwrap_or(false))
            .await
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
        input: &UpdateCatalogItemPayload,
    ) -> Result<CatalogItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update(executor, shop_id, id, input)
            .await?
            .ok_or(AppError::ResourceNotFound("catalog_item"))
    }
}
