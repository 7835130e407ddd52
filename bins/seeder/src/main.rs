//! Demo data seeder for local development.
//!
//! Seeds a small product catalogue (one product without a purchase price)
//! and a week of sale documents split between models `55` and `65`.
//! Existing rows are left untouched, so the seeder can be re-run.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use salesboard_db::entities::{products, sales_items};
use salesboard_shared::AppConfig;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Number of days of sales to seed, ending today.
const SEED_DAYS: i64 = 7;

/// Sale documents per day and model.
const DOCUMENTS_PER_DAY: u32 = 2;

/// Document models the demo sales are split between.
const MODELS: [&str; 2] = ["55", "65"];

/// Demo catalogue: code, description, sale price, last purchase price.
const CATALOGUE: [(&str, &str, i64, Option<i64>); 5] = [
    ("P001", "Coffee 500g", 1890, Some(1250)),
    ("P002", "Sugar 1kg", 549, Some(320)),
    ("P003", "Whole milk 1L", 499, Some(290)),
    ("P004", "Sliced bread", 799, Some(410)),
    ("P005", "Handmade soap", 1200, None),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = salesboard_db::connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding products...");
    seed_products(&db).await?;

    println!("Seeding sales...");
    let today = Local::now().date_naive();
    seed_sales(&db, today).await?;

    db.close().await?;
    println!("Seeding complete!");
    Ok(())
}

/// Converts an amount in cents.
fn cents(amount: i64) -> Decimal {
    Decimal::new(amount, 2)
}

/// Seeds the demo catalogue.
async fn seed_products(db: &DatabaseConnection) -> anyhow::Result<()> {
    for (code, description, _, cost) in CATALOGUE {
        if products::Entity::find_by_id(code.to_string())
            .one(db)
            .await?
            .is_some()
        {
            println!("  Product {code} already exists, skipping...");
            continue;
        }

        products::ActiveModel {
            code: Set(code.to_string()),
            description: Set(description.to_string()),
            last_purchase_price: Set(cost.map(cents)),
        }
        .insert(db)
        .await
        .with_context(|| format!("Failed to insert product {code}"))?;
        println!("  Created product {code}");
    }
    Ok(())
}

/// Seeds `SEED_DAYS` days of sale documents ending on `today`.
async fn seed_sales(db: &DatabaseConnection, today: NaiveDate) -> anyhow::Result<()> {
    let mut created = 0_u32;

    for offset in 0..SEED_DAYS {
        let day = today - Duration::days(offset);
        for (model_index, model) in MODELS.into_iter().enumerate() {
            for sequence in 0..DOCUMENTS_PER_DAY {
                let document_id = format!("SEED-{}-{model}-{sequence}", day.format("%Y%m%d"));
                if sales_items::Entity::find()
                    .filter(sales_items::Column::DocumentId.eq(document_id.as_str()))
                    .one(db)
                    .await?
                    .is_some()
                {
                    continue;
                }

                let hour = 9 + sequence * 3 + u32::try_from(model_index)?;
                let issued_at = day.and_time(
                    NaiveTime::from_hms_opt(hour, 15, 0).context("Invalid seed time")?,
                );
                let seed = usize::try_from(offset)? + model_index * 2 + usize::try_from(sequence)?;

                // Two to three lines per document, rotating through the catalogue
                for line in 0..(2 + seed % 2) {
                    let (code, description, price, _) =
                        CATALOGUE[(seed + line * 2) % CATALOGUE.len()];
                    let quantity = Decimal::from(1 + (seed + line) % 4);

                    sales_items::ActiveModel {
                        model: Set(model.to_string()),
                        issued_at: Set(issued_at),
                        product_code: Set(code.to_string()),
                        product_description: Set(description.to_string()),
                        quantity: Set(quantity),
                        line_total: Set(cents(price) * quantity),
                        document_id: Set(document_id.clone()),
                        ..Default::default()
                    }
                    .insert(db)
                    .await
                    .with_context(|| format!("Failed to insert line of {document_id}"))?;
                }
                created += 1;
            }
        }
    }

    println!("  Created {created} sale documents");
    Ok(())
}
