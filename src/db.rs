pub mod user_repo;
pub use user_repo::UserRepository;
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod shop_repo;
pub use shop_repo::ShopRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod team_repo;
pub use team_repo::TeamRepository;
pub mod appointment_repo;
pub use appointment_repo::AppointmentRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod club_repo;
pub use club_repo::ClubRepository;
