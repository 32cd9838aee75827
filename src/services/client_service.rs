// src/services/client_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ClientRepository,
    models::client::{Client, CreateClientPayload, UpdateClientPayload},
};

#[derive(Clone)]
pub struct ClientService {
    repo: ClientRepository,
}

impl ClientService {
    pub fn new(repo: ClientRepository) -> Self {
        Self { repo }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        input: &CreateClientPayload,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.create(executor, shop_id, input).await
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Busca vazia = sem filtro
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        self.repo.list(executor, shop_id, search).await
    }

    pub async fn get<'e, E>(&self, executor: E, shop_id: Uuid, id: Uuid) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .find_by_id(executor, shop_id, id)
            .await?
            .ok_or(AppError::ResourceNotFound("client"))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
        input: &UpdateClientPayload,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update(executor, shop_id, id, input)
            .await?
            .ok_or(AppError::ResourceNotFound("client"))
    }
}
