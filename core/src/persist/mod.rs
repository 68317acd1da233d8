use crate::config::DatabaseConfig;
use chrono::NaiveDateTime;
use entities::sea_orm_active_enums::AirdropStatus;
use log::info;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend};
use std::sync::Arc;

pub mod filter;
pub mod mapper;
pub mod repo;

#[derive(Clone)]
pub struct PersistCtx {
    pub db: Arc<DatabaseConnection>,
}

/// Validated input for a new catalog entry.
#[derive(Debug, Clone)]
pub struct NewAirdrop {
    pub project_name: String,
    pub chain: String,
    pub token_symbol: Option<String>,
    pub description: Option<String>,
    pub eligibility_rules: String,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub status: AirdropStatus,
    pub official_links: Vec<String>,
    pub risk_score: i32,
}

impl PersistCtx {
    /// Connect using the configured `DATABASE_URL`.
    pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Self> {
        let mut opts = ConnectOptions::new(cfg.url.clone());
        opts.max_connections(cfg.max_connections)
            .sqlx_logging_level(log::LevelFilter::Debug);
        let db = Database::connect(opts).await?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Inject an existing `DatabaseConnection`.
    pub fn from_conn(conn: DatabaseConnection) -> Self {
        Self { db: Arc::new(conn) }
    }

    pub fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        Migrator::up(self.db.as_ref(), None).await?;
        info!("database migrations applied");
        Ok(())
    }
}
