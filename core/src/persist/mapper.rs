use entities::{airdrop, watchlist};
use rpc::{AirdropInfo, WatchlistEntryInfo};

pub fn split_links(raw: Option<&str>) -> Vec<String> {
    raw.map(|links| {
        links
            .split(',')
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

pub fn airdrop_model_to_info(model: airdrop::Model) -> AirdropInfo {
    let official_links = split_links(model.official_links.as_deref());
    AirdropInfo {
        id: model.id,
        project_name: model.project_name,
        chain: model.chain,
        token_symbol: model.token_symbol,
        description: model.description,
        eligibility_rules: model.eligibility_rules,
        start_date: model.start_date.map(|t| t.and_utc()),
        end_date: model.end_date.map(|t| t.and_utc()),
        status: model.status.as_str().to_owned(),
        official_links,
        risk_score: model.risk_score,
        created_at: model.created_at.and_utc(),
        updated_at: model.updated_at.and_utc(),
    }
}

pub fn watchlist_model_to_info(model: watchlist::Model) -> WatchlistEntryInfo {
    WatchlistEntryInfo {
        wallet_address: model.wallet_address,
        airdrop_id: model.airdrop_id,
        created_at: model.created_at.and_utc(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_are_split_and_trimmed() {
        assert_eq!(
            split_links(Some("https://a.xyz, https://b.xyz/claim ,")),
            vec!["https://a.xyz".to_string(), "https://b.xyz/claim".to_string()]
        );
        assert!(split_links(None).is_empty());
        assert!(split_links(Some("")).is_empty());
    }
}
