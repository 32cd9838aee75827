// src/db/order_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, time::UtcRange},
    models::{
        order::{Order, OrderItem, OrderStatus, PricedLine},
        report::RealizedOrder,
    },
};

#[derive(Clone, Default)]
pub struct OrderRepository;

impl OrderRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_header<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        client_id: Option<Uuid>,
        customer_name: &str,
        customer_phone: Option<&str>,
        notes: Option<&str>,
        total: rust_decimal::Decimal,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO pedidos (barbershop_id, client_id, customer_name, customer_phone, notes, total)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(client_id)
        .bind(customer_name)
        .bind(customer_phone)
        .bind(notes)
        .bind(total)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    pub async fn add_item<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        order_id: Uuid,
        line: &PricedLine,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO pedido_itens (pedido_id, barbershop_id, item_id, item_name, quantity, unit_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, pedido_id, item_id, item_name, quantity, unit_price
            "#,
        )
        .bind(order_id)
        .bind(shop_id)
        .bind(line.item_id)
        .bind(&line.item_name)
        .bind(line.quantity)
        .bind(line.unit_price)
        .fetch_one(executor)
        .await?;
        Ok(item)
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
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM pedidos
            WHERE barbershop_id = $1 AND ($2::order_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(shop_id)
        .bind(status)
        .fetch_all(executor)
        .await?;
        Ok(orders)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            "SELECT * FROM pedidos WHERE barbershop_id = $1 AND id = $2",
        )
        .bind(shop_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(order)
    }

    pub async fn lock_status<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<OrderStatus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: Option<(OrderStatus,)> = sqlx::query_as(
            "SELECT status FROM pedidos WHERE barbershop_id = $1 AND id = $2 FOR UPDATE",
        )
        .bind(shop_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(row.map(|r| r.0))
    }

    pub async fn list_items<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        order_id: Uuid,
    ) -> Result<Vec<OrderItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, pedido_id, item_id, item_name, quantity, unit_price
            FROM pedido_itens
            WHERE barbershop_id = $1 AND pedido_id = $2
            ORDER BY item_name
            "#,
        )
        .bind(shop_id)
        .bind(order_id)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE pedidos SET status = $3, updated_at = NOW()
            WHERE barbershop_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    /// Pedidos concluídos/entregues criados no período.
    pub async fn list_realized<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        range: UtcRange,
    ) -> Result<Vec<RealizedOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, RealizedOrder>(
            r#"
            SELECT id, total, created_at FROM pedidos
            WHERE barbershop_id = $1
              AND created_at >= $2 AND created_at < $3
              AND status::text = ANY($4)
            ORDER BY created_at ASC
            "#,
        )
        .bind(shop_id)
        .bind(range.start)
        .bind(range.end)
        .bind(OrderStatus::realized_labels())
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    pub async fn count_open<'e, E>(&self, executor: E, shop_id: Uuid) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM pedidos
            WHERE barbershop_id = $1
              AND status::text = ANY($2)
            "#,
        )
        .bind(shop_id)
        .bind(OrderStatus::open_labels())
        .fetch_one(executor)
        .await?;
        Ok(count)
    }
}
