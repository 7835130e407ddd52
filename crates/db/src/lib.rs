//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - Connection setup for the sales store
//! - `SeaORM` entity definitions for the development schema
//! - The sales repository (model lookup and joined sales lines)
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{SalesError, SalesFetch, SalesRepository};

use std::time::Duration;

use salesboard_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database with default pool settings.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection using the database configuration.
///
/// The returned handle is meant to be created once per process, shared by
/// every request, and closed at shutdown.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    Database::connect(options).await
}
