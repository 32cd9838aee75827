pub mod appointment;
pub mod auth;
pub mod catalog;
pub mod client;
pub mod club;
pub mod lead;
pub mod order;
pub mod report;
pub mod shop;
pub mod showcase;
pub mod team;
