//! Re-exports of every entity.

pub use super::products::Entity as Products;
pub use super::sales_items::Entity as SalesItems;
