use airdrop_core::{
    config::{AppConfig, AuthConfig, DatabaseConfig, ListingConfig, ServerConfig},
    persist::{NewAirdrop, PersistCtx, repo},
    service::CatalogService,
    util::SystemTimeSourceStub,
};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use entities::{airdrop, sea_orm_active_enums::AirdropStatus};
use rpc::CreateAirdropRequest;
use sea_orm::{ConnectOptions, Database};
use std::{path::PathBuf, sync::Arc};
use uuid::Uuid;

pub const NONCE_TTL_SECS: i64 = 600;
pub const SESSION_TTL_SECS: u64 = 86_400;

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server_config: ServerConfig {
            host: "127.0.0.1".into(),
            port: "0".into(),
            log_level: log::Level::Debug,
        },
        database_config: DatabaseConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
        },
        auth: AuthConfig {
            nonce_ttl_secs: NONCE_TTL_SECS,
            session_ttl_secs: SESSION_TTL_SECS,
            jwt_issuer: "test-issuer".into(),
            jwt_audience: "test-audience".into(),
            jwt_hmac_secret: "test-secret".into(),
        },
        listing: ListingConfig::default(),
    }
}

/// A single-connection in-memory database; every pooled connection would
/// otherwise see its own empty database.
pub async fn memory_ctx() -> Result<PersistCtx> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let ctx = PersistCtx::from_conn(Database::connect(opts).await?);
    ctx.migrate().await?;
    Ok(ctx)
}

/// A file-backed database shared by a pool of `connections`, removed on drop.
pub struct SharedDb {
    pub ctx: PersistCtx,
    path: PathBuf,
}

impl SharedDb {
    pub async fn open(connections: u32) -> Result<Self> {
        let path = std::env::temp_dir().join(format!("airdrop-core-{}.db", Uuid::new_v4()));
        let mut opts = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
        opts.max_connections(connections)
            .min_connections(connections)
            .sqlx_logging(false);
        let ctx = PersistCtx::from_conn(Database::connect(opts).await?);
        ctx.migrate().await?;
        Ok(Self { ctx, path })
    }
}

impl Drop for SharedDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub struct TestEnv {
    pub service: CatalogService,
    pub clock: Arc<SystemTimeSourceStub>,
    pub ctx: PersistCtx,
}

pub async fn setup() -> Result<TestEnv> {
    setup_with_config(test_config()).await
}

pub async fn setup_with_config(config: AppConfig) -> Result<TestEnv> {
    let ctx = memory_ctx().await?;
    let clock = Arc::new(SystemTimeSourceStub::new_set(start_time()));
    let service = CatalogService::new_with_dependencies(config, ctx.clone(), clock.clone())?;
    Ok(TestEnv {
        service,
        clock,
        ctx,
    })
}

pub async fn sign(signer: &PrivateKeySigner, message: &str) -> Result<Vec<u8>> {
    let signature = signer.sign_message(message.as_bytes()).await?;
    Ok(signature.as_bytes().to_vec())
}

pub fn lowercase_address(signer: &PrivateKeySigner) -> String {
    format!("0x{}", hex::encode(signer.address().as_slice()))
}

pub fn create_request(project_name: &str, chain: &str, status: &str) -> CreateAirdropRequest {
    CreateAirdropRequest {
        project_name: project_name.into(),
        chain: chain.into(),
        token_symbol: Some("TKN".into()),
        description: Some(format!("{project_name} community distribution")),
        eligibility_rules: "Hold a position before the snapshot block".into(),
        start_date: None,
        end_date: None,
        status: status.into(),
        official_links: Some("https://example.org".into()),
        risk_score: 4,
    }
}

pub async fn seed_airdrop(
    ctx: &PersistCtx,
    project_name: &str,
    chain: &str,
    status: AirdropStatus,
    created_at: NaiveDateTime,
) -> Result<airdrop::Model> {
    let new = NewAirdrop {
        project_name: project_name.into(),
        chain: chain.into(),
        token_symbol: None,
        description: Some(format!("{project_name} community distribution")),
        eligibility_rules: "Hold a position before the snapshot block".into(),
        start_date: None,
        end_date: None,
        status,
        official_links: Vec::new(),
        risk_score: 5,
    };
    Ok(repo::insert_airdrop(ctx, new, created_at).await?)
}
