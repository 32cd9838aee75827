// src/db/client_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::client::{Client, CreateClientPayload, UpdateClientPayload},
};

#[derive(Clone, Default)]
pub struct ClientRepository;

impl ClientRepository {
    pub fn new() -> Self {
        Self
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
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (barbershop_id, name, phone, email, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(&input.name)
        .bind(input.phone.as_deref())
        .bind(input.email.as_deref())
        .bind(input.notes.as_deref())
        .fetch_one(executor)
        .await?;
        Ok(client)
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
        let pattern = search.map(|s| format!("%{}%", s.trim()));
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT * FROM clients
            WHERE barbershop_id = $1
              AND ($2::text IS NULL OR name ILIKE $2)
            ORDER BY name ASC
            "#,
        )
        .bind(shop_id)
        .bind(pattern)
        .fetch_all(executor)
        .await?;
        Ok(clients)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE barbershop_id = $1 AND id = $2",
        )
        .bind(shop_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(client)
    }

    pub async fn find_by_phone<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        phone: &str,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT * FROM clients
            WHERE barbershop_id = $1 AND phone = $2
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(shop_id)
        .bind(phone)
        .fetch_optional(executor)
        .await?;
        Ok(client)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
        input: &UpdateClientPayload,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients SET
                name = COALESCE($3, name),
                phone = COALESCE($4, phone),
                email = COALESCE($5, email),
                notes = COALESCE($6, notes),
                updated_at = NOW()
            WHERE barbershop_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.email.as_deref())
        .bind(input.notes.as_deref())
        .fetch_optional(executor)
        .await?;
        Ok(client)
    }
}
