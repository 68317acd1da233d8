use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirdropInfo {
    pub id: i32,
    pub project_name: String,
    pub chain: String,
    pub token_symbol: Option<String>,
    pub description: Option<String>,
    pub eligibility_rules: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: String,
    pub official_links: Vec<String>,
    pub risk_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAirdropsQuery {
    pub chain: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAirdropRequest {
    pub project_name: String,
    pub chain: String,
    pub token_symbol: Option<String>,
    pub description: Option<String>,
    pub eligibility_rules: String,
    /// RFC 3339 timestamp.
    pub start_date: Option<String>,
    /// RFC 3339 timestamp, must be after `start_date` when both are set.
    pub end_date: Option<String>,
    pub status: String,
    /// Comma-separated absolute URLs.
    pub official_links: Option<String>,
    pub risk_score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAirdropStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistEntryInfo {
    pub wallet_address: String,
    pub airdrop_id: i32,
    pub created_at: DateTime<Utc>,
}
