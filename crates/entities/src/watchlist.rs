//! `SeaORM` Entity definition for per-wallet watchlist entries.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "Watchlist")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub wallet_address: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub airdrop_id: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::airdrop::Entity",
        from = "Column::AirdropId",
        to = "super::airdrop::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Airdrop,
}

impl Related<super::airdrop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Airdrop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
