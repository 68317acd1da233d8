use crate::auth::AccessContext;
use crate::error::{PersistDbError, ServiceResult};
use crate::persist::{mapper, repo};
use crate::service::CatalogService;
use rpc::{AirdropInfo, PageQuery, WatchlistEntryInfo};

impl CatalogService {
    pub async fn add_to_watchlist(
        &self,
        auth: &AccessContext,
        airdrop_id: i32,
    ) -> ServiceResult<WatchlistEntryInfo> {
        let ctx = &self.inner.persist_ctx;
        // foreign keys are not enforced on every backend
        if !repo::airdrop_exists(ctx, airdrop_id).await? {
            return Err(PersistDbError::AirdropNotFound(airdrop_id).into());
        }

        let entry =
            repo::insert_watchlist_entry(ctx, &auth.wallet_address, airdrop_id, self.now_naive())
                .await?;
        Ok(mapper::watchlist_model_to_info(entry))
    }

    pub async fn list_watchlist(
        &self,
        auth: &AccessContext,
        query: PageQuery,
    ) -> ServiceResult<Vec<AirdropInfo>> {
        let spec = self
            .page_spec(query.page, query.limit)
            .scoped_to_watchlist(auth.wallet_address.clone());
        self.run_listing(&spec).await
    }
}
