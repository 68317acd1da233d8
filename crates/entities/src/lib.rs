//! `SeaORM` entities for the airdrop catalog.

pub mod airdrop;
pub mod auth_challenge;
pub mod sea_orm_active_enums;
pub mod watchlist;
