pub mod connection;
pub mod error;
pub mod models;
mod portfolio;
pub mod repository;
