// src/services/team_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::TeamRepository,
    models::team::{CreateProfessionalPayload, Professional, UpdateProfessionalPayload},
};

#[derive(Clone)]
pub struct TeamService {
    repo: TeamRepository,
}

impl TeamService {
    pub fn new(repo: TeamRepository) -> Self {
        Self { repo }
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
        self.repo.create(executor, shop_id, input).await
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
        self.repo.list(executor, shop_id, active_only).await
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
        input: &UpdateProfessionalPayload,
    ) -> Result<Professional, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update(executor, shop_id, id, input)
            .await?
            .ok_or(AppError::ResourceNotFound("professional"))
    }
}
