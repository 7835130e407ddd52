//! `SeaORM` Entity for the sales line item table.
//!
//! Reports read through the `vendas_itens_view` view; this entity maps the
//! underlying table so development data can be written.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vendas_itens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "modelo")]
    pub model: String,
    #[sea_orm(column_name = "emissao")]
    pub issued_at: DateTime,
    #[sea_orm(column_name = "produto")]
    pub product_code: String,
    #[sea_orm(column_name = "descricao")]
    pub product_description: String,
    #[sea_orm(column_name = "quantidade", column_type = "Decimal(Some((18, 4)))")]
    pub quantity: Decimal,
    #[sea_orm(column_name = "total", column_type = "Decimal(Some((18, 2)))")]
    pub line_total: Decimal,
    #[sea_orm(column_name = "documento")]
    pub document_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
