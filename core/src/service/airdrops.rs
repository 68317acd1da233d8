use crate::auth::AccessContext;
use crate::error::ServiceResult;
use crate::persist::{
    filter::{EqualityField, FilterSpec, SubstringField},
    mapper, repo,
};
use crate::service::CatalogService;
use crate::validation;
use log::info;
use rpc::{AirdropInfo, CreateAirdropRequest, ListAirdropsQuery, UpdateAirdropStatusRequest};

/// Query-string values are optional and blank means absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl CatalogService {
    pub(crate) fn page_spec(&self, page: Option<u64>, limit: Option<u64>) -> FilterSpec {
        FilterSpec::new(
            page.unwrap_or(1),
            limit.unwrap_or(self.inner.config.listing.default_page_size),
        )
    }

    pub fn listing_spec(&self, query: &ListAirdropsQuery) -> ServiceResult<FilterSpec> {
        let mut spec = self.page_spec(query.page, query.limit);

        if let Some(chain) = non_blank(query.chain.as_deref()) {
            spec = spec.with_equality(EqualityField::Chain, chain);
        }
        if let Some(status) = non_blank(query.status.as_deref()) {
            let status = validation::parse_status(status)?;
            spec = spec.with_equality(EqualityField::Status, status.as_str());
        }
        if let Some(search) = non_blank(query.search.as_deref()) {
            spec = spec.with_substring(SubstringField::Keyword, search);
        }

        Ok(spec)
    }

    pub async fn run_listing(&self, spec: &FilterSpec) -> ServiceResult<Vec<AirdropInfo>> {
        let statement = self.inner.filter_builder.build(spec)?;
        let rows = repo::list_airdrops(&self.inner.persist_ctx, statement).await?;
        Ok(rows.into_iter().map(mapper::airdrop_model_to_info).collect())
    }

    pub async fn list_airdrops(&self, query: ListAirdropsQuery) -> ServiceResult<Vec<AirdropInfo>> {
        let spec = self.listing_spec(&query)?;
        self.run_listing(&spec).await
    }

    pub async fn get_airdrop(&self, id: i32) -> ServiceResult<AirdropInfo> {
        let model = repo::get_airdrop(&self.inner.persist_ctx, id).await?;
        Ok(mapper::airdrop_model_to_info(model))
    }

    pub async fn create_airdrop(
        &self,
        auth: &AccessContext,
        req: CreateAirdropRequest,
    ) -> ServiceResult<AirdropInfo> {
        let new = validation::validate_new_airdrop(req)?;
        let model = repo::insert_airdrop(&self.inner.persist_ctx, new, self.now_naive()).await?;
        info!(
            "airdrop {} ({}) created by {}",
            model.id, model.project_name, auth.wallet_address
        );
        Ok(mapper::airdrop_model_to_info(model))
    }

    pub async fn update_airdrop_status(
        &self,
        auth: &AccessContext,
        id: i32,
        req: UpdateAirdropStatusRequest,
    ) -> ServiceResult<AirdropInfo> {
        let status = validation::parse_status(&req.status)?;
        let model =
            repo::update_airdrop_status(&self.inner.persist_ctx, id, status, self.now_naive())
                .await?;
        info!(
            "airdrop {id} status set to {status} by {}",
            auth.wallet_address
        );
        Ok(mapper::airdrop_model_to_info(model))
    }
}
