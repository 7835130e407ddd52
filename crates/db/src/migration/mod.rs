//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. They create the
//! development copy of the sales store; production stores already provide it.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_sales_schema;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_sales_schema::Migration)]
    }
}
