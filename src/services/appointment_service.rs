// src/services/appointment_service.rs

use chrono::{FixedOffset, Utc};
use sqlx::{Acquire, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, time::local_day_range},
    db::{
        appointment_repo::NewAppointment, AppointmentRepository, CatalogRepository,
        ClientRepository, TeamRepository,
    },
    models::{
        appointment::{
            Appointment, AppointmentAction, AppointmentListQuery, AppointmentOrigin,
            AppointmentStatus, CreateAppointmentPayload, QuickSalePayload,
        },
        catalog::{CatalogItem, CatalogKind},
    },
};

#[derive(Clone)]
pub struct AppointmentService {
    repo: AppointmentRepository,
    client_repo: ClientRepository,
    team_repo: TeamRepository,
    catalog_repo: CatalogRepository,
    utc_offset: FixedOffset,
}

impl AppointmentService {
    pub fn new(
        repo: AppointmentRepository,
        client_repo: ClientRepository,
        team_repo: TeamRepository,
        catalog_repo: CatalogRepository,
        utc_offset: FixedOffset,
    ) -> Self {
        Self { repo, client_repo, team_repo, catalog_repo, utc_offset }
    }

    // Cliente e profissional precisam ser da mesma loja
    async fn check_refs(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
        client_id: Option<Uuid>,
        professional_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        if let Some(id) = client_id {
            self.client_repo
                .find_by_id(&mut *conn, shop_id, id)
                .await?
                .ok_or(AppError::ResourceNotFound("client"))?;
        }
        if let Some(id) = professional_id {
            self.team_repo
                .find_by_id(&mut *conn, shop_id, id)
                .await?
                .ok_or(AppError::ResourceNotFound("professional"))?;
        }
        Ok(())
    }

    async fn catalog_item(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<CatalogItem, AppError> {
        self.catalog_repo
            .find_by_id(&mut *conn, shop_id, id)
            .await?
            .ok_or(AppError::ResourceNotFound("catalog_item"))
    }

    pub async fn create(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
        input: &CreateAppointmentPayload,
    ) -> Result<Appointment, AppError> {
        self.check_refs(conn, shop_id, input.client_id, input.professional_id).await?;

        if let Some(service_id) = input.service_id {
            let item = self.catalog_item(conn, shop_id, service_id).await?;
            if item.kind != CatalogKind::Service {
                return Err(AppError::ResourceNotFound("service"));
            }
        }

        let new = NewAppointment {
            client_id: input.client_id,
            professional_id: input.professional_id,
            service_id: input.service_id,
            scheduled_at: input.scheduled_at,
            status: AppointmentStatus::Pending,
            price: input.price,
            origin: AppointmentOrigin::Normal,
            notes: input.notes.as_deref(),
            concluded_at: None,
        };

        let appointment = self.repo.create(&mut *conn, shop_id, &new).await?;
        tracing::info!("📅 Agendamento {} criado na loja {}", appointment.id, shop_id);
        Ok(appointment)
    }

    /// Venda de balcão: já nasce concluída e entra como produto no faturamento.
    pub async fn quick_sale(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
        input: &QuickSalePayload,
    ) -> Result<Appointment, AppError> {
        self.check_refs(conn, shop_id, input.client_id, input.professional_id).await?;

        if let Some(item_id) = input.item_id {
            self.catalog_item(conn, shop_id, item_id).await?;
        }

        let now = Utc::now();
        let new = NewAppointment {
            client_id: input.client_id,
            professional_id: input.professional_id,
            // Sem preço explícito o relatório usa o preço do item
            service_id: input.item_id,
            scheduled_at: now,
            status: AppointmentStatus::Completed,
            price: input.price,
            origin: AppointmentOrigin::QuickSale,
            notes: input.notes.as_deref(),
            concluded_at: Some(now),
        };

        let sale = self.repo.create(&mut *conn, shop_id, &new).await?;
        tracing::info!("🛒 Venda rápida {} registrada na loja {}", sale.id, shop_id);
        Ok(sale)
    }

    pub async fn list(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
        query: &AppointmentListQuery,
    ) -> Result<Vec<Appointment>, AppError> {
        let range = local_day_range(query.start, query.end, self.utc_offset)?;
        self.repo
            .list_scheduled(&mut *conn, shop_id, range, query.status, query.professional_id)
            .await
    }

    pub async fn get(
        &self,
        conn: &mut PgConnection,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Appointment, AppError> {
        self.repo
            .find_by_id(&mut *conn, shop_id, id)
            .await?
            .ok_or(AppError::ResourceNotFound("appointment"))
    }

    /// Confirma, conclui ou cancela. A linha fica travada até o commit.
    pub async fn transition<'e, A>(
        &self,
        executor: A,
        shop_id: Uuid,
        id: Uuid,
        action: AppointmentAction,
    ) -> Result<Appointment, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current = self.repo
            .lock_status(&mut *tx, shop_id, id)
            .await?
            .ok_or(AppError::ResourceNotFound("appointment"))?;

        let next = current.apply(action)?;
        let concluded_at = (next == AppointmentStatus::Completed).then(Utc::now);

        self.repo.update_status(&mut *tx, shop_id, id, next, concluded_at).await?;

        let appointment = self.repo
            .find_by_id(&mut *tx, shop_id, id)
            .await?
            .ok_or(AppError::ResourceNotFound("appointment"))?;

        tx.commit().await?;

        tracing::info!(
            "🔁 Agendamento {}: {} -> {}",
            id,
            current.as_str(),
            next.as_str()
        );
        Ok(appointment)
    }
}
