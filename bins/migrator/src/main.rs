//! Development schema migration runner.
//!
//! Creates the product cost table, the sales line table and the
//! `vendas_itens_view` view in a local database. Production stores already
//! provide these objects.
//!
//! Usage (reads `DATABASE_URL`):
//!   migrator up      - Create the schema
//!   migrator down    - Drop the schema
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop everything and re-create the schema

use sea_orm_migration::prelude::*;
use salesboard_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI sets up its own tracing
    cli::run_cli(Migrator).await;
}
