//! Development sales schema.
//!
//! Creates the product cost table, the sales line table, and the
//! `vendas_itens_view` view the reports read from.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(PRODUCTS_SQL).await?;
        db.execute_unprepared(SALES_ITEMS_SQL).await?;
        db.execute_unprepared(SALES_ITEMS_VIEW_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP VIEW IF EXISTS vendas_itens_view;
             DROP TABLE IF EXISTS vendas_itens CASCADE;
             DROP TABLE IF EXISTS produto CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const PRODUCTS_SQL: &str = r"
-- Product catalogue with the last purchase price used as unit cost
CREATE TABLE produto (
    codigo VARCHAR(60) PRIMARY KEY,
    descricao TEXT NOT NULL,
    precoultimacompra NUMERIC(18, 4)
);
";

const SALES_ITEMS_SQL: &str = r"
-- One row per product line of a sale document
CREATE TABLE vendas_itens (
    id BIGSERIAL PRIMARY KEY,
    modelo VARCHAR(10) NOT NULL,
    emissao TIMESTAMP NOT NULL,
    produto VARCHAR(60) NOT NULL,
    descricao TEXT NOT NULL,
    quantidade NUMERIC(18, 4) NOT NULL DEFAULT 0,
    total NUMERIC(18, 2) NOT NULL,
    documento VARCHAR(60) NOT NULL
);

-- Range scans by issuance date, optionally narrowed by model
CREATE INDEX idx_vendas_itens_emissao ON vendas_itens(emissao);
CREATE INDEX idx_vendas_itens_modelo_emissao ON vendas_itens(modelo, emissao);
";

const SALES_ITEMS_VIEW_SQL: &str = r"
CREATE VIEW vendas_itens_view AS
SELECT modelo, emissao, produto, descricao, quantidade, total, documento
FROM vendas_itens;
";
