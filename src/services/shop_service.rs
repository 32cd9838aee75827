// src/services/shop_service.rs

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::{error::AppError, slug},
    db::ShopRepository,
    models::shop::{Barbershop, UpdateShopPayload},
};

const MAX_SLUG_ATTEMPTS: usize = 5;

/// Primeiro o slug puro, depois variantes com sufixo, até desistir.
fn slug_candidate(base: &str, attempt: usize) -> Option<String> {
    match attempt {
        0 => Some(base.to_string()),
        n if n < MAX_SLUG_ATTEMPTS => Some(slug::with_suffix(base)),
        _ => None,
    }
}

#[derive(Clone)]
pub struct ShopService {
    repo: ShopRepository,
}

impl ShopService {
    pub fn new(repo: ShopRepository) -> Self {
        Self { repo }
    }

    /// Cria a loja com um slug público único (sufixo aleatório em caso de colisão).
    pub async fn create_shop(
        &self,
        conn: &mut PgConnection,
        owner_id: Uuid,
        name: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Barbershop, AppError> {
        let base = slug::slugify(name);

        let mut attempt = 0;
        let shop = loop {
            let candidate = slug_candidate(&base, attempt).ok_or(AppError::SlugUnavailable)?;
            let created = self
                .repo
                .create(&mut *conn, owner_id, name.trim(), &candidate, phone, address)
                .await?;
            match created {
                Some(shop) => break shop,
                None => {
                    tracing::debug!(slug = %candidate, "slug em uso, tentando outro");
                    attempt += 1;
                }
            }
        };

        tracing::info!("💈 Barbearia '{}' criada ({}) para o dono {}", shop.name, shop.slug, owner_id);
        Ok(shop)
    }

    pub async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<Barbershop>, AppError> {
        self.repo.list_by_owner(owner_id).await
    }

    /// Loja ativa (já validada pelo tenant_guard).
    pub async fn get(&self, shop_id: Uuid) -> Result<Barbershop, AppError> {
        self.repo.find_by_id(shop_id).await?.ok_or(AppError::ShopNotFound)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Barbershop, AppError> {
        self.repo.find_by_slug(slug).await?.ok_or(AppError::ShopNotFound)
    }

    pub async fn update(
        &self,
        shop_id: Uuid,
        input: &UpdateShopPayload,
    ) -> Result<Barbershop, AppError> {
        self.repo.update(shop_id, input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_uses_the_plain_slug() {
        assert_eq!(slug_candidate("barbearia-centro", 0).as_deref(), Some("barbearia-centro"));
    }

    #[test]
    fn retries_get_suffixed_slugs_then_give_up() {
        for attempt in 1..MAX_SLUG_ATTEMPTS {
            let candidate = slug_candidate("barbearia-centro", attempt).unwrap();
            assert!(candidate.starts_with("barbearia-centro-"));
            assert_ne!(candidate, "barbearia-centro");
        }
        assert_eq!(slug_candidate("barbearia-centro", MAX_SLUG_ATTEMPTS), None);
    }
}
