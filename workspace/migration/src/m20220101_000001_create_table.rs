use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create stores table
        manager
            .create_table(
                Table::create()
                    .table(Stores::Table)
                    .if_not_exists()
                    .col(pk_auto(Stores::Id))
                    .col(string(Stores::Name))
                    .col(string_null(Stores::Address))
                    .col(string_null(Stores::Phone))
                    .to_owned(),
            )
            .await?;

        // Create supplies table. The id is the business document number,
        // assigned by the caller rather than the database.
        manager
            .create_table(
                Table::create()
                    .table(Supplies::Table)
                    .if_not_exists()
                    .col(string(Supplies::Id).primary_key())
                    .col(decimal(Supplies::Amount).decimal_len(12, 2))
                    .col(date(Supplies::Date))
                    .col(integer(Supplies::StoreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supply_store")
                            .from(Supplies::Table, Supplies::StoreId)
                            .to(Stores::Table, Stores::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create transactions table
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(pk_auto(Transactions::Id))
                    .col(decimal(Transactions::Amount).decimal_len(12, 2))
                    .col(date(Transactions::Date))
                    .col(integer(Transactions::StoreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_store")
                            .from(Transactions::Table, Transactions::StoreId)
                            .to(Stores::Table, Stores::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create acts table
        manager
            .create_table(
                Table::create()
                    .table(Acts::Table)
                    .if_not_exists()
                    .col(pk_auto(Acts::Id))
                    .col(date(Acts::PeriodStart))
                    .col(date(Acts::PeriodEnd))
                    .col(integer(Acts::StoreId))
                    .col(timestamp_with_time_zone(Acts::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_act_store")
                            .from(Acts::Table, Acts::StoreId)
                            .to(Stores::Table, Stores::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create summaries table
        manager
            .create_table(
                Table::create()
                    .table(Summaries::Table)
                    .if_not_exists()
                    .col(pk_auto(Summaries::Id))
                    .col(date(Summaries::PeriodStart))
                    .col(date(Summaries::PeriodEnd))
                    .col(timestamp_with_time_zone(Summaries::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create summaries_stores table (join table)
        manager
            .create_table(
                Table::create()
                    .table(SummariesStores::Table)
                    .if_not_exists()
                    .col(integer(SummariesStores::SummaryId))
                    .col(integer(SummariesStores::StoreId))
                    .primary_key(
                        Index::create()
                            .name("pk_summaries_stores")
                            .col(SummariesStores::SummaryId)
                            .col(SummariesStores::StoreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_summaries_stores_summary")
                            .from(SummariesStores::Table, SummariesStores::SummaryId)
                            .to(Summaries::Table, Summaries::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_summaries_stores_store")
                            .from(SummariesStores::Table, SummariesStores::StoreId)
                            .to(Stores::Table, Stores::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SummariesStores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Summaries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Acts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Supplies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stores::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Stores {
    Table,
    Id,
    Name,
    Address,
    Phone,
}

#[derive(DeriveIden)]
enum Supplies {
    Table,
    Id,
    Amount,
    Date,
    StoreId,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    Amount,
    Date,
    StoreId,
}

#[derive(DeriveIden)]
enum Acts {
    Table,
    Id,
    PeriodStart,
    PeriodEnd,
    StoreId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Summaries {
    Table,
    Id,
    PeriodStart,
    PeriodEnd,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SummariesStores {
    Table,
    SummaryId,
    StoreId,
}
