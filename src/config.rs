// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::FixedOffset;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::{
        i18n::I18nStore,
        time::{parse_utc_offset, DEFAULT_UTC_OFFSET},
    },
    db::{
        AppointmentRepository, CatalogRepository, ClientRepository, ClubRepository,
        LeadRepository, OrderRepository, ShopRepository, TeamRepository, UserRepository,
    },
    services::{
        appointment_service::AppointmentService, auth::AuthService,
        catalog_service::CatalogService, client_service::ClientService,
        club_service::ClubService, document_service::DocumentService,
        lead_service::LeadService, order_service::OrderService, report_service::ReportService,
        shop_service::ShopService, showcase_service::ShowcaseService, team_service::TeamService,
        tenancy_service::TenantService,
    },
};

const DEFAULT_FONTS_DIR: &str = "./fonts";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Configuração lida do ambiente (`.env` incluído).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub utc_offset: FixedOffset,
    pub fonts_dir: PathBuf,
    pub bind_addr: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let raw_offset = env::var("SHOP_UTC_OFFSET").unwrap_or_else(|_| DEFAULT_UTC_OFFSET.to_string());
        let utc_offset = parse_utc_offset(&raw_offset).context("SHOP_UTC_OFFSET inválido")?;

        Ok(Self {
            database_url,
            jwt_secret,
            utc_offset,
            fonts_dir: env::var("FONTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_FONTS_DIR)),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub i18n_store: I18nStore,
    pub utc_offset: FixedOffset,

    pub auth_service: AuthService,
    pub tenant_service: TenantService,
    pub lead_service: LeadService,
    pub shop_service: ShopService,
    pub client_service: ClientService,
    pub catalog_service: CatalogService,
    pub team_service: TeamService,
    pub appointment_service: AppointmentService,
    pub order_service: OrderService,
    pub club_service: ClubService,
    pub report_service: ReportService,
    pub showcase_service: ShowcaseService,
    pub document_service: DocumentService,
}

impl AppState {
    pub async fn connect(settings: &Settings) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::build(db_pool, settings))
    }

    /// Monta o grafo de dependências sobre um pool já criado.
    pub fn build(db_pool: PgPool, settings: &Settings) -> Self {
        // --- Repositórios ---
        let user_repo = UserRepository::new(db_pool.clone());
        let lead_repo = LeadRepository::new(db_pool.clone());
        let shop_repo = ShopRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new();
        let catalog_repo = CatalogRepository::new();
        let team_repo = TeamRepository::new();
        let appointment_repo = AppointmentRepository::new();
        let order_repo = OrderRepository::new();
        let club_repo = ClubRepository::new();

        // --- Serviços ---
        let shop_service = ShopService::new(shop_repo.clone());
        let auth_service = AuthService::new(
            user_repo,
            lead_repo.clone(),
            shop_service.clone(),
            settings.jwt_secret.clone(),
            db_pool.clone(),
        );
        let tenant_service = TenantService::new(Arc::new(shop_repo));
        let lead_service = LeadService::new(lead_repo, db_pool.clone());
        let order_service = OrderService::new(order_repo.clone(), catalog_repo.clone());

        Self {
            jwt_secret: settings.jwt_secret.clone(),
            i18n_store: I18nStore::load(),
            utc_offset: settings.utc_offset,

            auth_service,
            tenant_service,
            lead_service,
            client_service: ClientService::new(client_repo.clone()),
            catalog_service: CatalogService::new(catalog_repo.clone()),
            team_service: TeamService::new(team_repo.clone()),
            appointment_service: AppointmentService::new(
                appointment_repo.clone(),
                client_repo.clone(),
                team_repo.clone(),
                catalog_repo.clone(),
                settings.utc_offset,
            ),
            club_service: ClubService::new(club_repo.clone(), client_repo.clone()),
            report_service: ReportService::new(
                appointment_repo.clone(),
                order_repo,
                settings.utc_offset,
            ),
            showcase_service: ShowcaseService::new(
                shop_service.clone(),
                order_service.clone(),
                catalog_repo,
                team_repo,
                club_repo,
                client_repo,
                appointment_repo,
            ),
            document_service: DocumentService::new(
                order_service.clone(),
                shop_service.clone(),
                settings.fonts_dir.clone(),
            ),
            order_service,
            shop_service,
            db_pool,
        }
    }
}
