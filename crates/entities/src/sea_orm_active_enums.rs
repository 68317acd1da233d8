use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum AirdropStatus {
    #[sea_orm(string_value = "upcoming")]
    Upcoming,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "ended")]
    Ended,
}

impl AirdropStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AirdropStatus::Upcoming => "upcoming",
            AirdropStatus::Active => "active",
            AirdropStatus::Ended => "ended",
        }
    }
}

impl fmt::Display for AirdropStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AirdropStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(AirdropStatus::Upcoming),
            "active" => Ok(AirdropStatus::Active),
            "ended" => Ok(AirdropStatus::Ended),
            other => Err(format!("unknown airdrop status: {other}")),
        }
    }
}
