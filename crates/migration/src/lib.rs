pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_airdrops;
mod m20260301_000002_auth_challenges;
mod m20260301_000003_watchlist;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_airdrops::Migration),
            Box::new(m20260301_000002_auth_challenges::Migration),
            Box::new(m20260301_000003_watchlist::Migration),
        ]
    }
}
