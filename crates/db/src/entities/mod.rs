//! `SeaORM` entities for the development sales schema.
//!
//! Table and column names are those of the sales store.

pub mod prelude;

pub mod products;
pub mod sales_items;
