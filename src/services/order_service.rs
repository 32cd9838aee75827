// src/services/order_service.rs

use std::collections::HashMap;

use sqlx::{Acquire, Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, OrderRepository},
    models::{
        catalog::{CatalogItem, CatalogKind},
        order::{
            order_total, Order, OrderDetail, OrderLinePayload, OrderStatus, PlaceOrderPayload,
            PricedLine,
        },
    },
};

/// Precifica as linhas com o catálogo da loja. Preço vem sempre do banco.
pub fn price_lines(
    lines: &[OrderLinePayload],
    catalog: &[CatalogItem],
) -> Result<Vec<PricedLine>, AppError> {
    if lines.is_empty() {
        return Err(AppError::EmptyOrder);
    }

    let by_id: HashMap<Uuid, &CatalogItem> = catalog.iter().map(|i| (i.id, i)).collect();

    lines
        .iter()
        .map(|line| {
            let item = by_id
                .get(&line.item_id)
                .ok_or(AppError::ItemUnavailable(line.item_id))?;
            Ok(PricedLine {
                item_id: item.id,
                item_name: item.name.clone(),
                quantity: line.quantity,
                unit_price: item.price,
            })
        })
        .collect()
}

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    catalog_repo: CatalogRepository,
}

impl OrderService {
    pub fn new(repo: OrderRepository, catalog_repo: CatalogRepository) -> Self {
        Self { repo, catalog_repo }
    }

    /// Pedido da vitrine: cabeçalho + itens na mesma transação.
    pub async fn place_order<'e, A>(
        &self,
        executor: A,
        shop_id: Uuid,
        client_id: Option<Uuid>,
        payload: &PlaceOrderPayload,
    ) -> Result<OrderDetail, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let ids: Vec<Uuid> = payload.items.iter().map(|l| l.item_id).collect();
        let catalog = self.catalog_repo
            .find_active_by_ids(&mut *tx, shop_id, CatalogKind::Product, &ids)
            .await?;

        let lines = price_lines(&payload.items, &catalog)?;
        let total = order_total(&lines);

        let header = self.repo
            .create_header(
                &mut *tx,
                shop_id,
                client_id,
                payload.customer_name.trim(),
                payload.customer_phone.as_deref(),
                payload.notes.as_deref(),
                total,
            )
            .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            items.push(self.repo.add_item(&mut *tx, shop_id, header.id, line).await?);
        }

        tx.commit().await?;

        tracing::info!("🧾 Pedido #{} ({}) criado na loja {}: total {}", header.display_id, header.id, shop_id, total);
        Ok(OrderDetail { header, items })
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list(executor, shop_id, status).await
    }

    pub async fn detail(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<OrderDetail, AppError> {
        let header = self.repo
            .find_by_id(&mut *conn, shop_id, id)
            .await?
            .ok_or(AppError::ResourceNotFound("order"))?;
        let items = self.repo.list_items(&mut *conn, shop_id, id).await?;

        Ok(OrderDetail { header, items })
    }

    pub async fn transition<'e, A>(
        &self,
        executor: A,
        shop_id: Uuid,
        id: Uuid,
        next: OrderStatus,
    ) -> Result<Order, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current = self.repo
            .lock_status(&mut *tx, shop_id, id)
            .await?
            .ok_or(AppError::ResourceNotFound("order"))?;

        current.transition_to(next)?;
        let order = self.repo.update_status(&mut *tx, shop_id, id, next).await?;

        tx.commit().await?;

        tracing::info!("🔁 Pedido {}: {} -> {}", id, current.as_str(), next.as_str());
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product(name: &str, cents: i64) -> CatalogItem {
        CatalogItem {
            id: Uuid::new_v4(),
            barbershop_id: Uuid::new_v4(),
            kind: CatalogKind::Product,
            name: name.to_string(),
            description: None,
            price: Decimal::new(cents, 2),
            duration_minutes: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn lines_take_price_and_name_from_catalog() {
        let pomada = product("Pomada", 3995);
        let lines = vec![OrderLinePayload { item_id: pomada.id, quantity: 2 }];

        let priced = price_lines(&lines, &[pomada.clone()]).unwrap();
        assert_eq!(priced.len(), 1);
        assert_eq!(priced[0].item_name, "Pomada");
        assert_eq!(priced[0].unit_price, Decimal::new(3995, 2));
        assert_eq!(order_total(&priced), Decimal::new(7990, 2));
    }

    #[test]
    fn unknown_or_inactive_item_is_rejected() {
        let pomada = product("Pomada", 3995);
        let missing = Uuid::new_v4();
        let lines = vec![
            OrderLinePayload { item_id: pomada.id, quantity: 1 },
            OrderLinePayload { item_id: missing, quantity: 1 },
        ];

        assert!(matches!(
            price_lines(&lines, &[pomada]),
            Err(AppError::ItemUnavailable(id)) if id == missing
        ));
    }

    #[test]
    fn empty_order_is_rejected() {
        assert!(matches!(price_lines(&[], &[]), Err(AppError::EmptyOrder)));
    }
}
