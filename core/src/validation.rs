//! Input rules for curated catalog entries.

use crate::error::{ServiceError, ServiceResult};
use crate::persist::NewAirdrop;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound};
use entities::sea_orm_active_enums::AirdropStatus;
use rpc::CreateAirdropRequest;
use url::Url;

pub const SUPPORTED_CHAINS: [&str; 5] = ["Ethereum", "Polygon", "Optimism", "Arbitrum", "BSC"];

pub const PROJECT_NAME_LEN: (usize, usize) = (2, 100);
pub const TOKEN_SYMBOL_LEN: (usize, usize) = (1, 10);
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const ELIGIBILITY_RULES_LEN: (usize, usize) = (10, 2000);
pub const RISK_SCORE_RANGE: (i32, i32) = (1, 10);

pub fn validate_new_airdrop(req: CreateAirdropRequest) -> ServiceResult<NewAirdrop> {
    let project_name = required_text("project_name", &req.project_name, PROJECT_NAME_LEN)?;
    let chain = validate_chain(&req.chain)?;
    let token_symbol = optional_text("token_symbol", req.token_symbol.as_deref(), TOKEN_SYMBOL_LEN)?;
    let description =
        optional_text("description", req.description.as_deref(), (0, DESCRIPTION_MAX_LEN))?;
    let eligibility_rules =
        required_text("eligibility_rules", &req.eligibility_rules, ELIGIBILITY_RULES_LEN)?;

    let start_date = optional_date("start_date", req.start_date.as_deref())?;
    let end_date = optional_date("end_date", req.end_date.as_deref())?;
    if let (Some(start), Some(end)) = (start_date, end_date)
        && end <= start
    {
        return Err(ServiceError::InvalidParams(
            "end_date must be after start_date".into(),
        ));
    }

    let status = parse_status(&req.status)?;
    let official_links = parse_links(req.official_links.as_deref())?;

    let (min, max) = RISK_SCORE_RANGE;
    if !(min..=max).contains(&req.risk_score) {
        return Err(ServiceError::InvalidParams(format!(
            "risk_score must be between {min} and {max}"
        )));
    }

    Ok(NewAirdrop {
        project_name,
        chain,
        token_symbol,
        description,
        eligibility_rules,
        start_date,
        end_date,
        status,
        official_links,
        risk_score: req.risk_score,
    })
}

pub fn parse_status(raw: &str) -> ServiceResult<AirdropStatus> {
    raw.parse::<AirdropStatus>()
        .map_err(|_| ServiceError::InvalidParams(format!("invalid status: {}", raw.trim())))
}

pub fn validate_chain(raw: &str) -> ServiceResult<String> {
    let chain = raw.trim();
    if !SUPPORTED_CHAINS.contains(&chain) {
        return Err(ServiceError::InvalidParams(format!("invalid chain: {chain}")));
    }
    Ok(chain.to_owned())
}

fn required_text(field: &str, raw: &str, (min, max): (usize, usize)) -> ServiceResult<String> {
    let value = raw.trim();
    let len = value.chars().count();
    if len < min.max(1) || len > max {
        return Err(ServiceError::InvalidParams(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(value.to_owned())
}

fn optional_text(
    field: &str,
    raw: Option<&str>,
    (min, max): (usize, usize),
) -> ServiceResult<Option<String>> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ServiceError::InvalidParams(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(Some(value.to_owned()))
}

/// RFC 3339 timestamps, or bare `YYYY-MM-DD` dates taken as midnight UTC.
fn optional_date(field: &str, raw: Option<&str>) -> ServiceResult<Option<NaiveDateTime>> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(dt.naive_utc().trunc_subsecs(0)));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Some(dt));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(Some(midnight));
    }

    Err(ServiceError::InvalidParams(format!("invalid {field} format")))
}

fn parse_links(raw: Option<&str>) -> ServiceResult<Vec<String>> {
    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .map(|link| {
            Url::parse(link)
                .map(|_| link.to_owned())
                .map_err(|_| ServiceError::InvalidParams(format!("invalid URL in official_links: {link}")))
        })
        .collect()
}
