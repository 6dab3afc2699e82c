//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the store reconciliation application here:
//! stores, the supplies and payments flowing through them, and the act and
//! summary records that parameterize reports.

pub mod act;
pub mod store;
pub mod summary;
pub mod summary_store;
pub mod supply;
pub mod transaction;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::act::Entity as Act;
    pub use super::store::Entity as Store;
    pub use super::summary::Entity as Summary;
    pub use super::summary_store::Entity as SummaryStore;
    pub use super::supply::Entity as Supply;
    pub use super::transaction::Entity as Transaction;
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        // Try to apply migrations first
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        // Setup database
        let db = setup_db().await?;

        // Create stores
        let store1 = store::ActiveModel {
            name: Set("Corner Grocery".to_string()),
            address: Set(Some("12 Main St".to_string())),
            phone: Set(Some("+1 555 0100".to_string())),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let store2 = store::ActiveModel {
            name: Set("Riverside Market".to_string()),
            address: Set(None),
            phone: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create supplies (business-assigned document ids)
        let supply1 = supply::ActiveModel {
            id: Set("INV-2024-001".to_string()),
            amount: Set(Decimal::new(100000, 2)), // 1000.00
            date: Set(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
            store_id: Set(store1.id),
        }
        .insert(&db)
        .await?;

        supply::ActiveModel {
            id: Set("INV-2024-002".to_string()),
            amount: Set(Decimal::new(25000, 2)), // 250.00
            date: Set(NaiveDate::from_ymd_opt(2024, 1, 12).unwrap()),
            store_id: Set(store2.id),
        }
        .insert(&db)
        .await?;

        // Create a payment
        let payment = transaction::ActiveModel {
            amount: Set(Decimal::new(40000, 2)), // 400.00
            date: Set(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
            store_id: Set(store1.id),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a reconciliation act for store1
        let act = act::ActiveModel {
            period_start: Set(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            period_end: Set(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            store_id: Set(store1.id),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create a summary covering both stores
        let summary = summary::ActiveModel {
            period_start: Set(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            period_end: Set(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        for store_id in [store1.id, store2.id] {
            summary_store::ActiveModel {
                summary_id: Set(summary.id),
                store_id: Set(store_id),
            }
            .insert(&db)
            .await?;
        }

        // Read back and verify data
        let stores = Store::find().all(&db).await?;
        assert_eq!(stores.len(), 2);
        assert!(stores.iter().any(|s| s.name == "Corner Grocery"));
        assert!(stores.iter().any(|s| s.name == "Riverside Market"));

        let supplies = Supply::find()
            .filter(supply::Column::StoreId.eq(store1.id))
            .all(&db)
            .await?;
        assert_eq!(supplies.len(), 1);
        assert_eq!(supplies[0].id, "INV-2024-001");
        assert_eq!(supplies[0].amount, Decimal::new(100000, 2));

        let payments = store1.find_related(Transaction).all(&db).await?;
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].id, payment.id);

        // Verify the many-to-many summary membership
        let member_stores = summary.find_related(Store).all(&db).await?;
        assert_eq!(member_stores.len(), 2);

        // Deleting a store must take its supplies, payments and acts with it
        store1.delete(&db).await?;

        assert!(Supply::find_by_id(supply1.id.clone()).one(&db).await?.is_none());
        assert!(Transaction::find_by_id(payment.id).one(&db).await?.is_none());
        assert!(Act::find_by_id(act.id).one(&db).await?.is_none());

        // The other store's records are untouched
        assert_eq!(Supply::find().all(&db).await?.len(), 1);

        Ok(())
    }
}
