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
                    .table(Airdrop::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Airdrop::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Airdrop::ProjectName).string().not_null())
                    .col(ColumnDef::new(Airdrop::Chain).string().not_null())
                    .col(ColumnDef::new(Airdrop::TokenSymbol).string().null())
                    .col(ColumnDef::new(Airdrop::Description).text().null())
                    .col(ColumnDef::new(Airdrop::EligibilityRules).text().not_null())
                    .col(ColumnDef::new(Airdrop::StartDate).timestamp().null())
                    .col(ColumnDef::new(Airdrop::EndDate).timestamp().null())
                    .col(ColumnDef::new(Airdrop::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Airdrop::OfficialLinks).text().null())
                    .col(ColumnDef::new(Airdrop::RiskScore).integer().not_null())
                    .col(ColumnDef::new(Airdrop::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Airdrop::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Listing filters and the (created_at, id) ordering.
        manager
            .create_index(
                Index::create()
                    .name("idx_airdrop_chain")
                    .table(Airdrop::Table)
                    .col(Airdrop::Chain)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_airdrop_status")
                    .table(Airdrop::Table)
                    .col(Airdrop::Status)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_airdrop_created_at_id")
                    .table(Airdrop::Table)
                    .col(Airdrop::CreatedAt)
                    .col(Airdrop::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_airdrop_created_at_id")
                    .table(Airdrop::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_airdrop_status")
                    .table(Airdrop::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_airdrop_chain")
                    .table(Airdrop::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Airdrop::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Airdrop {
    #[sea_orm(iden = "Airdrop")]
    Table,
    Id,
    ProjectName,
    Chain,
    TokenSymbol,
    Description,
    EligibilityRules,
    StartDate,
    EndDate,
    Status,
    OfficialLinks,
    RiskScore,
    CreatedAt,
    UpdatedAt,
}
