pub mod config;
pub mod database;
pub mod http;
pub mod models;
pub mod registry;
pub mod repositories;
pub mod store;
