// src/db/shop_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::shop::{Barbershop, UpdateShopPayload},
    services::tenancy_service::ShopDirectory,
};

#[derive(Clone)]
pub struct ShopRepository {
    pool: PgPool,
}

impl ShopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lojas do dono, da mais antiga para a mais nova.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Barbershop>, AppError> {
        let shops = sqlx::query_as::<_, Barbershop>(
            "SELECT * FROM barbershops WHERE owner_id = $1 ORDER BY created_at ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(shops)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Barbershop>, AppError> {
        let shop = sqlx::query_as::<_, Barbershop>("SELECT * FROM barbershops WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(shop)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Barbershop>, AppError> {
        let shop = sqlx::query_as::<_, Barbershop>("SELECT * FROM barbershops WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(shop)
    }

    /// `None` quando o slug já está em uso. O conflito não aborta a transação
    /// de quem chamou, então dá para tentar de novo com outro slug.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        owner_id: Uuid,
        name: &str,
        slug: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Option<Barbershop>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let shop = sqlx::query_as::<_, Barbershop>(
            r#"
            INSERT INTO barbershops (owner_id, name, slug, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (slug) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(slug)
        .bind(phone)
        .bind(address)
        .fetch_optional(executor)
        .await?;
        Ok(shop)
    }

    /// Atualiza só os campos enviados (COALESCE mantém o valor atual).
    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateShopPayload,
    ) -> Result<Barbershop, AppError> {
        let shop = sqlx::query_as::<_, Barbershop>(
            r#"
            UPDATE barbershops SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                address = COALESCE($4, address),
                pix_key = COALESCE($5, pix_key),
                logo_url = COALESCE($6, logo_url),
                primary_color = COALESCE($7, primary_color),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.address.as_deref())
        .bind(input.pix_key.as_deref())
        .bind(input.logo_url.as_deref())
        .bind(input.primary_color.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(shop)
    }
}

#[async_trait]
impl ShopDirectory for ShopRepository {
    async fn shops_owned_by(&self, owner_id: Uuid) -> Result<Vec<Barbershop>, AppError> {
        self.list_by_owner(owner_id).await
    }
}
