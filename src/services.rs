pub mod appointment_service;
pub mod auth;
pub mod catalog_service;
pub mod client_service;
pub mod club_service;
pub mod document_service;
pub mod lead_service;
pub mod order_service;
pub mod report_service;
pub mod shop_service;
pub mod showcase_service;
pub mod team_service;
pub mod tenancy_service;
