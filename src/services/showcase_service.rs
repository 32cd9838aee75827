// src/services/showcase_service.rs

use sqlx::{Acquire, PgConnection, Postgres};

use crate::{
    common::error::AppError,
    db::{
        appointment_repo::NewAppointment, AppointmentRepository, CatalogRepository,
        ClientRepository, ClubRepository, TeamRepository,
    },
    models::{
        appointment::{Appointment, AppointmentOrigin, AppointmentStatus, BookAppointmentPayload},
        catalog::CatalogKind,
        client::CreateClientPayload,
        order::{OrderDetail, PlaceOrderPayload},
        showcase::{PublicProfessional, ShowcasePage},
    },
    services::{order_service::OrderService, shop_service::ShopService},
};

/// Vitrine pública da barbearia, acessada pelo slug.
#[derive(Clone)]
pub struct ShowcaseService {
    shop_service: ShopService,
    order_service: OrderService,
    catalog_repo: CatalogRepository,
    team_repo: TeamRepository,
    club_repo: ClubRepository,
    client_repo: ClientRepository,
    appointment_repo: AppointmentRepository,
}

impl ShowcaseService {
    pub fn new(
        shop_service: ShopService,
        order_service: OrderService,
        catalog_repo: CatalogRepository,
        team_repo: TeamRepository,
        club_repo: ClubRepository,
        client_repo: ClientRepository,
        appointment_repo: AppointmentRepository,
    ) -> Self {
        Self {
            shop_service,
            order_service,
            catalog_repo,
            team_repo,
            club_repo,
            client_repo,
            appointment_repo,
        }
    }

    pub async fn page(&self, conn: &mut PgConnection, slug: &str) -> Result<ShowcasePage, AppError> {
        let shop = self.shop_service.find_by_slug(slug).await?;

        let services = self.catalog_repo
            .list(&mut *conn, shop.id, Some(CatalogKind::Service), true)
            .await?;
        let products = self.catalog_repo
            .list(&mut *conn, shop.id, Some(CatalogKind::Product), true)
            .await?;
        let professionals = self.team_repo
            .list(&mut *conn, shop.id, true)
            .await?
            .into_iter()
            .map(PublicProfessional::from)
            .collect();
        let club_plans = self.club_repo.list_plans(&mut *conn, shop.id, true).await?;

        Ok(ShowcasePage {
            shop: shop.into(),
            services,
            products,
            professionals,
            club_plans,
        })
    }

    /// Pedido público. Se o telefone já for de um cliente da loja, o pedido fica vinculado.
    pub async fn place_order(
        &self,
        conn: &mut PgConnection,
        slug: &str,
        payload: &PlaceOrderPayload,
    ) -> Result<OrderDetail, AppError> {
        let shop = self.shop_service.find_by_slug(slug).await?;

        let client_id = match payload.customer_phone.as_deref() {
            Some(phone) => self.client_repo
                .find_by_phone(&mut *conn, shop.id, phone.trim())
                .await?
                .map(|c| c.id),
            None => None,
        };

        self.order_service
            .place_order(&mut *conn, shop.id, client_id, payload)
            .await
    }

    /// Agendamento público: nasce pendente, com o cliente achado pelo telefone ou criado.
    pub async fn book_appointment<'e, A>(
        &self,
        executor: A,
        slug: &str,
        payload: &BookAppointmentPayload,
    ) -> Result<Appointment, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let shop = self.shop_service.find_by_slug(slug).await?;
        let mut tx = executor.begin().await?;

        let service = self.catalog_repo
            .find_active_by_ids(&mut *tx, shop.id, CatalogKind::Service, &[payload.service_id])
            .await?
            .into_iter()
            .next()
            .ok_or(AppError::ItemUnavailable(payload.service_id))?;

        if let Some(professional_id) = payload.professional_id {
            let professional = self.team_repo
                .find_by_id(&mut *tx, shop.id, professional_id)
                .await?
                .filter(|p| p.is_active);
            if professional.is_none() {
                return Err(AppError::ResourceNotFound("professional"));
            }
        }

        let phone = payload.client_phone.trim();
        let client = match self.client_repo.find_by_phone(&mut *tx, shop.id, phone).await? {
            Some(client) => client,
            None => {
                let input = CreateClientPayload {
                    name: payload.client_name.trim().to_string(),
                    phone: Some(phone.to_string()),
                    email: None,
                    notes: None,
                };
                self.client_repo.create(&mut *tx, shop.id, &input).await?
            }
        };

        let new = NewAppointment {
            client_id: Some(client.id),
            professional_id: payload.professional_id,
            service_id: Some(service.id),
            scheduled_at: payload.scheduled_at,
            status: AppointmentStatus::Pending,
            price: Some(service.price),
            origin: AppointmentOrigin::Normal,
            notes: payload.notes.as_deref(),
            concluded_at: None,
        };
        let appointment = self.appointment_repo.create(&mut *tx, shop.id, &new).await?;

        tx.commit().await?;

        tracing::info!("🌐 Agendamento {} pela vitrine '{}' (cliente {})", appointment.id, shop.slug, client.id);
        Ok(appointment)
    }
}
