//! `SeaORM` Entity for the product cost table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "produto")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "codigo")]
    pub code: String,
    #[sea_orm(column_name = "descricao")]
    pub description: String,
    #[sea_orm(
        column_name = "precoultimacompra",
        column_type = "Decimal(Some((18, 4)))",
        nullable
    )]
    pub last_purchase_price: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
