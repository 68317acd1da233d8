use crate::{
    auth::{NonceStore, SessionIssuer},
    config::AppConfig,
    persist::{PersistCtx, filter::FilterQueryBuilder},
    util::{SystemTimeSource, SystemTimeSourceDefault, to_naive},
};
use chrono::NaiveDateTime;
use log::{info, warn};
use std::sync::Arc;

pub mod airdrops;
pub mod auth;
pub mod health;
pub mod watchlist;

pub struct Inner {
    config: AppConfig,
    persist_ctx: PersistCtx,
    time_source: Arc<dyn SystemTimeSource>,
    nonce_store: NonceStore,
    session_issuer: SessionIssuer,
    filter_builder: FilterQueryBuilder,
}

#[derive(Clone)]
pub struct CatalogService {
    inner: Arc<Inner>,
}

impl CatalogService {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let persist_ctx = PersistCtx::connect(&config.database_config).await?;
        persist_ctx.migrate().await?;

        let service =
            Self::new_with_dependencies(config, persist_ctx, Arc::new(SystemTimeSourceDefault))?;

        // Leftovers from a previous run are unusable; a failure here is not fatal.
        if let Err(e) = service.inner.nonce_store.purge_expired().await {
            warn!("failed to purge stale auth challenges: {e}");
        }

        Ok(service)
    }

    pub fn new_with_dependencies(
        config: AppConfig,
        persist_ctx: PersistCtx,
        time_source: Arc<dyn SystemTimeSource>,
    ) -> anyhow::Result<Self> {
        config.validate()?;

        let nonce_store = NonceStore::new(
            persist_ctx.clone(),
            time_source.clone(),
            config.auth.nonce_ttl_secs,
        );
        let session_issuer = SessionIssuer::new(&config.auth, time_source.clone());
        let filter_builder =
            FilterQueryBuilder::new(persist_ctx.backend(), config.listing.max_page_size);

        info!(
            "catalog service ready (challenge ttl {}s, session ttl {}s, max page size {})",
            config.auth.nonce_ttl_secs, config.auth.session_ttl_secs, config.listing.max_page_size
        );

        let inner = Inner {
            config,
            persist_ctx,
            time_source,
            nonce_store,
            session_issuer,
            filter_builder,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn persist_ctx(&self) -> &PersistCtx {
        &self.inner.persist_ctx
    }

    pub fn nonce_store(&self) -> &NonceStore {
        &self.inner.nonce_store
    }

    pub fn session_issuer(&self) -> &SessionIssuer {
        &self.inner.session_issuer
    }

    pub fn filter_builder(&self) -> &FilterQueryBuilder {
        &self.inner.filter_builder
    }

    fn now_naive(&self) -> NaiveDateTime {
        to_naive(self.inner.time_source.now())
    }
}
