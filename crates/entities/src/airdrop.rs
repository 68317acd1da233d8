//! `SeaORM` Entity definition for catalog airdrops.

use super::sea_orm_active_enums::AirdropStatus;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "Airdrop")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub project_name: String,
    #[sea_orm(column_type = "Text")]
    pub chain: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub token_symbol: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub eligibility_rules: String,
    pub start_date: Option<DateTime>,
    pub end_date: Option<DateTime>,
    pub status: AirdropStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub official_links: Option<String>,
    pub risk_score: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::watchlist::Entity")]
    Watchlist,
}

impl Related<super::watchlist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Watchlist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
