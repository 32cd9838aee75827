// src/services/tenancy_service.rs

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::shop::{Barbershop, ShopSummary},
};

/// Cookie que guarda a loja escolhida no painel.
pub const SHOP_COOKIE: &str = "barbearia_shop_id";

/// Onde o resolvedor descobre as lojas de um dono.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopDirectory: Send + Sync {
    async fn shops_owned_by(&self, owner_id: Uuid) -> Result<Vec<Barbershop>, AppError>;
}

/// Escolhe a loja ativa a partir das lojas do dono.
///
/// Uma loja pedida explicitamente (cookie ou cabeçalho) só vale se for do
/// usuário. Sem pedido, só existe escolha automática quando há uma única loja.
pub fn pick_active_shop(requested: Option<Uuid>, owned: &[Barbershop]) -> Result<Uuid, AppError> {
    if let Some(shop_id) = requested {
        return if owned.iter().any(|s| s.id == shop_id) {
            Ok(shop_id)
        } else {
            Err(AppError::ShopAccessDenied(shop_id))
        };
    }

    match owned {
        [] => Err(AppError::NoShop),
        [only] => Ok(only.id),
        many => Err(AppError::ShopSelectionRequired(
            many.iter().map(ShopSummary::from).collect(),
        )),
    }
}

#[derive(Clone)]
pub struct TenantService {
    directory: Arc<dyn ShopDirectory>,
}

impl TenantService {
    pub fn new(directory: Arc<dyn ShopDirectory>) -> Self {
        Self { directory }
    }

    pub async fn resolve_active_shop(
        &self,
        user_id: Uuid,
        requested: Option<Uuid>,
    ) -> Result<Uuid, AppError> {
        let owned = self.directory.shops_owned_by(user_id).await?;
        let shop_id = pick_active_shop(requested, &owned)?;
        tracing::debug!(%user_id, %shop_id, "loja ativa resolvida");
        Ok(shop_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn shop(owner_id: Uuid, name: &str, age_days: i64) -> Barbershop {
        let created_at = Utc::now() - Duration::days(age_days);
        Barbershop {
            id: Uuid::new_v4(),
            owner_id,
            name: name.to_string(),
            slug: crate::common::slug::slugify(name),
            phone: None,
            address: None,
            pix_key: None,
            logo_url: None,
            primary_color: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn single_shop_is_picked_automatically() {
        let owner = Uuid::new_v4();
        let only = shop(owner, "Centro", 10);
        assert_eq!(pick_active_shop(None, &[only.clone()]).unwrap(), only.id);
    }

    #[test]
    fn no_shop_is_an_error() {
        assert!(matches!(pick_active_shop(None, &[]), Err(AppError::NoShop)));
    }

    #[test]
    fn several_shops_require_explicit_selection() {
        let owner = Uuid::new_v4();
        let shops = vec![shop(owner, "Centro", 30), shop(owner, "Shopping", 1)];

        match pick_active_shop(None, &shops) {
            Err(AppError::ShopSelectionRequired(choices)) => {
                let names: Vec<_> = choices.iter().map(|c| c.name.as_str()).collect();
                assert_eq!(names, vec!["Centro", "Shopping"]);
            }
            other => panic!("esperava seleção obrigatória, veio {other:?}"),
        }
    }

    #[test]
    fn requested_shop_must_be_owned() {
        let owner = Uuid::new_v4();
        let mine = shop(owner, "Centro", 3);
        let foreign = Uuid::new_v4();

        assert_eq!(pick_active_shop(Some(mine.id), &[mine.clone()]).unwrap(), mine.id);
        assert!(matches!(
            pick_active_shop(Some(foreign), &[mine]),
            Err(AppError::ShopAccessDenied(id)) if id == foreign
        ));
    }

    #[test]
    fn requested_shop_wins_among_many() {
        let owner = Uuid::new_v4();
        let shops = vec![shop(owner, "Centro", 30), shop(owner, "Shopping", 1)];
        assert_eq!(pick_active_shop(Some(shops[1].id), &shops).unwrap(), shops[1].id);
    }

    #[tokio::test]
    async fn service_asks_the_directory_for_the_callers_shops() {
        let owner = Uuid::new_v4();
        let only = shop(owner, "Centro", 5);
        let expected = only.id;

        let mut directory = MockShopDirectory::new();
        directory
            .expect_shops_owned_by()
            .withf(move |id| *id == owner)
            .times(1)
            .returning(move |_| Ok(vec![only.clone()]));

        let service = TenantService::new(Arc::new(directory));
        assert_eq!(service.resolve_active_shop(owner, None).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn directory_errors_are_propagated() {
        let mut directory = MockShopDirectory::new();
        directory
            .expect_shops_owned_by()
            .returning(|_| Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut)));

        let service = TenantService::new(Arc::new(directory));
        let result = service.resolve_active_shop(Uuid::new_v4(), None).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }
}
