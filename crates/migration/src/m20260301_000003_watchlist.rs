use sea_orm::entity::prelude::DeriveIden;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Watchlist::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Watchlist::WalletAddress)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Watchlist::AirdropId).integer().not_null())
                    .col(ColumnDef::new(Watchlist::CreatedAt).timestamp().not_null())
                    .primary_key(
                        Index::create()
                            .col(Watchlist::WalletAddress)
                            .col(Watchlist::AirdropId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_watchlist_airdrop")
                            .from(Watchlist::Table, Watchlist::AirdropId)
                            .to(Airdrop::Table, Airdrop::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_watchlist_wallet_address")
                    .table(Watchlist::Table)
                    .col(Watchlist::WalletAddress)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_watchlist_wallet_address")
                    .table(Watchlist::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Watchlist::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Watchlist {
    #[sea_orm(iden = "Watchlist")]
    Table,
    WalletAddress,
    AirdropId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Airdrop {
    #[sea_orm(iden = "Airdrop")]
    Table,
    Id,
}
