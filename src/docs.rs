// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Barbearia API", description = "Backend multi-loja para barbearias"),
    paths(
        // --- Auth / Users ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Leads ---
        handlers::leads::create_lead,
        handlers::leads::list_leads,
        handlers::leads::approve_lead,
        handlers::leads::reject_lead,

        // --- Shops ---
        handlers::shops::list_my_shops,
        handlers::shops::create_shop,
        handlers::shops::select_shop,
        handlers::shops::get_active_shop,
        handlers::shops::update_active_shop,

        // --- Cadastros ---
        handlers::clients::create_client,
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::catalog::create_item,
        handlers::catalog::list_items,
        handlers::catalog::update_item,
        handlers::team::create_professional,
        handlers::team::list_professionals,
        handlers::team::update_professional,

        // --- Appointments ---
        handlers::appointments::create_appointment,
        handlers::appointments::quick_sale,
        handlers::appointments::list_appointments,
        handlers::appointments::get_appointment,
        handlers::appointments::confirm_appointment,
        handlers::appointments::complete_appointment,
        handlers::appointments::cancel_appointment,

        // --- Orders ---
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::transition_order,
        handlers::documents::order_receipt,

        // --- Club ---
        handlers::club::create_plan,
        handlers::club::list_plans,
        handlers::club::update_plan,
        handlers::club::subscribe,
        handlers::club::list_subscriptions,
        handlers::club::cancel_subscription,

        // --- Reports / Dashboard ---
        handlers::reports::revenue_summary,
        handlers::reports::revenue_daily,
        handlers::dashboard::get_dashboard,

        // --- Showcase ---
        handlers::showcase::get_showcase,
        handlers::showcase::place_order,
        handlers::showcase::book_appointment,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Leads ---
            models::lead::LeadStatus,
            models::lead::Lead,
            models::lead::CreateLeadPayload,

            // --- Shops ---
            models::shop::Barbershop,
            models::shop::ShopSummary,
            models::shop::CreateShopPayload,
            models::shop::SelectShopPayload,
            models::shop::UpdateShopPayload,

            // --- Cadastros ---
            models::client::Client,
            models::client::CreateClientPayload,
            models::client::UpdateClientPayload,
            models::catalog::CatalogKind,
            models::catalog::CatalogItem,
            models::catalog::CreateCatalogItemPayload,
            models::catalog::UpdateCatalogItemPayload,
            models::team::Professional,
            models::team::CreateProfessionalPayload,
            models::team::UpdateProfessionalPayload,

            // --- Appointments ---
            models::appointment::AppointmentStatus,
            models::appointment::AppointmentOrigin,
            models::appointment::Appointment,
            models::appointment::CreateAppointmentPayload,
            models::appointment::QuickSalePayload,
            models::appointment::BookAppointmentPayload,

            // --- Orders ---
            models::order::OrderStatus,
            models::order::Order,
            models::order::OrderItem,
            models::order::OrderDetail,
            models::order::OrderLinePayload,
            models::order::PlaceOrderPayload,
            models::order::TransitionOrderPayload,

            // --- Club ---
            models::club::SubscriptionStatus,
            models::club::ClubPlan,
            models::club::ClubSubscription,
            models::club::CreateClubPlanPayload,
            models::club::UpdateClubPlanPayload,
            models::club::SubscribePayload,

            // --- Reports ---
            models::report::RevenueSummary,
            models::report::DailyRevenue,
            models::report::DashboardSummary,

            // --- Showcase ---
            models::showcase::PublicShop,
            models::showcase::PublicProfessional,
            models::showcase::ShowcasePage,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Leads", description = "Cadastros do site e aprovação pelo superadmin"),
        (name = "Shops", description = "Lojas do dono e loja ativa"),
        (name = "Clients", description = "Clientes da loja"),
        (name = "Catalog", description = "Serviços e produtos"),
        (name = "Team", description = "Profissionais"),
        (name = "Appointments", description = "Agenda e vendas rápidas"),
        (name = "Orders", description = "Pedidos da vitrine"),
        (name = "Club", description = "Clube de assinatura"),
        (name = "Reports", description = "Faturamento realizado"),
        (name = "Dashboard", description = "Indicadores do dia"),
        (name = "Showcase", description = "Vitrine pública")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
