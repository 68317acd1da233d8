use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthNonceRequest {
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthNonceResponse {
    pub nonce: String,
    /// Exact text the wallet is expected to sign.
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthVerifyRequest {
    pub address: String,
    /// 65-byte `personal_sign` signature as hex, `0x` prefix optional.
    pub signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthVerifyResponse {
    pub credential: String,
    pub address: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in: u64,
}
