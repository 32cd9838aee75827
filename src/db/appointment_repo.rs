// src/db/appointment_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, time::UtcRange},
    models::{
        appointment::{Appointment, AppointmentOrigin, AppointmentStatus},
        report::RealizedAppointment,
    },
};

/// Colunas + joins das telas; `source` é a tabela (ou CTE) com alias `a`.
fn select_with_names(source: &str) -> String {
    format!(
        r#"
        SELECT
            a.id, a.barbershop_id,
            a.client_id, c.name AS client_name,
            a.professional_id, p.name AS professional_name,
            a.service_id, s.name AS service_name,
            a.scheduled_at, a.status, a.price, a.origin, a.notes,
            a.concluded_at, a.created_at, a.updated_at
        FROM {source}
        LEFT JOIN clients c ON c.id = a.client_id
        LEFT JOIN professionals p ON p.id = a.professional_id
        LEFT JOIN catalog_items s ON s.id = a.service_id
        "#
    )
}

/// Campos de um novo agendamento.
#[derive(Debug, Clone)]
pub struct NewAppointment<'a> {
    pub client_id: Option<Uuid>,
    pub professional_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub price: Option<Decimal>,
    pub origin: AppointmentOrigin,
    pub notes: Option<&'a str>,
    pub concluded_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Default)]
pub struct AppointmentRepository;

impl AppointmentRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        new: &NewAppointment<'_>,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH a AS (
                INSERT INTO agendamentos (
                    barbershop_id, client_id, professional_id, service_id,
                    scheduled_at, status, price, origin, notes, concluded_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
            )
            {}
            "#,
            select_with_names("a")
        );

        let appointment = sqlx::query_as::<_, Appointment>(&sql)
            .bind(shop_id)
            .bind(new.client_id)
            .bind(new.professional_id)
            .bind(new.service_id)
            .bind(new.scheduled_at)
            .bind(new.status)
            .bind(new.price)
            .bind(new.origin)
            .bind(new.notes)
            .bind(new.concluded_at)
            .fetch_one(executor)
            .await?;

        Ok(appointment)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "{} WHERE a.barbershop_id = $1 AND a.id = $2",
            select_with_names("agendamentos a")
        );
        let appointment = sqlx::query_as::<_, Appointment>(&sql)
            .bind(shop_id)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(appointment)
    }

    /// Agenda do período (pelo horário marcado).
    pub async fn list_scheduled<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        range: UtcRange,
        status: Option<AppointmentStatus>,
        professional_id: Option<Uuid>,
    ) -> Result<Vec<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            {}
            WHERE a.barbershop_id = $1
              AND a.scheduled_at >= $2 AND a.scheduled_at < $3
              AND ($4::appointment_status IS NULL OR a.status = $4)
              AND ($5::uuid IS NULL OR a.professional_id = $5)
            ORDER BY a.scheduled_at ASC
            "#,
            select_with_names("agendamentos a")
        );

        let appointments = sqlx::query_as::<_, Appointment>(&sql)
            .bind(shop_id)
            .bind(range.start)
            .bind(range.end)
            .bind(status)
            .bind(professional_id)
            .fetch_all(executor)
            .await?;
        Ok(appointments)
    }

    /// Trava o agendamento para a transição de status.
    pub async fn lock_status<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<AppointmentStatus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: Option<(AppointmentStatus,)> = sqlx::query_as(
            "SELECT status FROM agendamentos WHERE barbershop_id = $1 AND id = $2 FOR UPDATE",
        )
        .bind(shop_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(row.map(|r| r.0))
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
        status: AppointmentStatus,
        concluded_at: Option<DateTime<Utc>>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE agendamentos
            SET status = $3, concluded_at = COALESCE($4, concluded_at), updated_at = NOW()
            WHERE barbershop_id = $1 AND id = $2
            "#,
        )
        .bind(shop_id)
        .bind(id)
        .bind(status)
        .bind(concluded_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Agendamentos concluídos no período, com o preço do item vinculado.
    pub async fn list_realized<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        range: UtcRange,
    ) -> Result<Vec<RealizedAppointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, RealizedAppointment>(
            r#"
            SELECT a.id, a.service_id, a.origin, a.price,
                   i.price AS item_price, a.concluded_at
            FROM agendamentos a
            LEFT JOIN catalog_items i ON i.id = a.service_id
            WHERE a.barbershop_id = $1
              AND a.concluded_at >= $2 AND a.concluded_at < $3
              AND a.status = $4
            ORDER BY a.concluded_at ASC
            "#,
        )
        .bind(shop_id)
        .bind(range.start)
        .bind(range.end)
        .bind(AppointmentStatus::Completed)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    pub async fn count_pending_scheduled<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        range: UtcRange,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM agendamentos
            WHERE barbershop_id = $1
              AND scheduled_at >= $2 AND scheduled_at < $3
              AND status::text = ANY($4)
            "#,
        )
        .bind(shop_id)
        .bind(range.start)
        .bind(range.end)
        .bind(AppointmentStatus::open_labels())
        .fetch_one(executor)
        .await?;
        Ok(count)
    }
}
