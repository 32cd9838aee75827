pub mod appointments;
pub mod auth;
pub mod catalog;
pub mod clients;
pub mod club;
pub mod dashboard;
pub mod documents;
pub mod leads;
pub mod orders;
pub mod reports;
pub mod shops;
pub mod showcase;
pub mod team;
