//! In-memory database fixtures shared by the compute tests.

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use model::entities::{store, supply, transaction};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, Set};

/// Fresh in-memory SQLite database with the full schema applied.
pub async fn setup_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Enable foreign keys
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

    Migrator::up(&db, None).await.expect("Migrations failed.");
    Ok(db)
}

pub async fn insert_store(db: &DatabaseConnection, name: &str) -> Result<store::Model, DbErr> {
    store::ActiveModel {
        name: Set(name.to_string()),
        address: Set(None),
        phone: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_supply(
    db: &DatabaseConnection,
    id: &str,
    store_id: i32,
    amount: &str,
    date: NaiveDate,
) -> Result<supply::Model, DbErr> {
    supply::ActiveModel {
        id: Set(id.to_string()),
        amount: Set(amount.parse::<Decimal>().expect("bad test amount")),
        date: Set(date),
        store_id: Set(store_id),
    }
    .insert(db)
    .await
}

pub async fn insert_transaction(
    db: &DatabaseConnection,
    store_id: i32,
    amount: &str,
    date: NaiveDate,
) -> Result<transaction::Model, DbErr> {
    transaction::ActiveModel {
        amount: Set(amount.parse::<Decimal>().expect("bad test amount")),
        date: Set(date),
        store_id: Set(store_id),
        ..Default::default()
    }
    .insert(db)
    .await
}
