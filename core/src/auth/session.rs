use crate::auth::address::WalletAddress;
use crate::config::AuthConfig;
use crate::error::{AuthError, ServiceError, ServiceResult};
use crate::util::SystemTimeSource;
use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// A minted bearer credential and the identity it proves.
#[derive(Debug, Clone)]
pub struct Credential {
    pub token: String,
    pub address: WalletAddress,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn expires_in_secs(&self) -> u64 {
        (self.expires_at - self.issued_at).num_seconds().max(0) as u64
    }
}

/// Mints and checks HS256 session credentials.
///
/// Expiry is checked against the injected clock rather than by
/// `jsonwebtoken`, so an expired but authentic credential is reported as
/// [`AuthError::CredentialExpired`] and not lumped in with forgeries.
#[derive(Clone)]
pub struct SessionIssuer {
    issuer: String,
    audience: String,
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    time_source: Arc<dyn SystemTimeSource>,
}

impl SessionIssuer {
    pub fn new(cfg: &AuthConfig, time_source: Arc<dyn SystemTimeSource>) -> Self {
        let secret = cfg.jwt_hmac_secret.as_bytes();
        Self {
            issuer: cfg.jwt_issuer.clone(),
            audience: cfg.jwt_audience.clone(),
            ttl: Duration::seconds(cfg.session_ttl_secs as i64),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            time_source,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn mint(&self, address: &WalletAddress) -> ServiceResult<Credential> {
        let issued_at = self.time_source.now();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| ServiceError::Other(anyhow!("session exp overflow")))?;

        let claims = SessionClaims {
            sub: address.as_str().to_owned(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(Algorithm::HS256);
        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(|err| ServiceError::Other(anyhow!("failed to issue jwt: {err}")))?;

        Ok(Credential {
            token,
            address: address.clone(),
            issued_at,
            expires_at,
        })
    }

    /// Returns the canonical address a credential was minted for.
    pub fn authorize(&self, token: &str) -> Result<WalletAddress, AuthError> {
        let claims = self.decode(token)?;

        let address =
            WalletAddress::parse(&claims.sub).map_err(|_| AuthError::InvalidCredential)?;
        if address.as_str() != claims.sub {
            return Err(AuthError::InvalidCredential);
        }

        if claims.exp <= self.time_source.now().timestamp() {
            return Err(AuthError::CredentialExpired);
        }

        Ok(address)
    }

    fn decode(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidCredential)
    }
}
