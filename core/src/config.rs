use envconfig::Envconfig;
use std::fmt;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, Envconfig)]
pub struct ServerConfig {
    #[envconfig(from = "SERVER_HOST", default = "127.0.0.1")]
    pub host: String,

    #[envconfig(from = "SERVER_PORT", default = "3001")]
    pub port: String,

    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: log::Level,
}

#[derive(Debug, Clone, Envconfig)]
pub struct DatabaseConfig {
    #[envconfig(from = "DATABASE_URL")]
    pub url: String,

    #[envconfig(from = "DATABASE_MAX_CONNECTIONS", default = "10")]
    pub max_connections: u32,
}

#[derive(Clone, Envconfig)]
pub struct AuthConfig {
    #[envconfig(from = "AUTH_NONCE_TTL_SECS", default = "600")]
    pub nonce_ttl_secs: i64,

    #[envconfig(from = "AUTH_SESSION_TTL_SECS", default = "86400")]
    pub session_ttl_secs: u64,

    #[envconfig(from = "AUTH_JWT_ISSUER", default = "airdrop-catalog")]
    pub jwt_issuer: String,

    #[envconfig(from = "AUTH_JWT_AUDIENCE", default = "airdrop-catalog-api")]
    pub jwt_audience: String,

    #[envconfig(from = "AUTH_JWT_HMAC_SECRET")]
    pub jwt_hmac_secret: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("nonce_ttl_secs", &self.nonce_ttl_secs)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("jwt_hmac_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Envconfig)]
pub struct ListingConfig {
    #[envconfig(from = "LISTING_DEFAULT_PAGE_SIZE", default = "10")]
    pub default_page_size: u64,

    #[envconfig(from = "LISTING_MAX_PAGE_SIZE", default = "100")]
    pub max_page_size: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_config: ServerConfig,
    pub database_config: DatabaseConfig,
    pub auth: AuthConfig,
    pub listing: ListingConfig,
}

impl AppConfig {
    pub fn fetch() -> anyhow::Result<Self> {
        let server_config = ServerConfig::init_from_env()
            .map_err(|e| anyhow::anyhow!("failed to load server config: {e}"))?;
        let database_config = DatabaseConfig::init_from_env()
            .map_err(|e| anyhow::anyhow!("failed to load database config: {e}"))?;
        let auth = AuthConfig::init_from_env()
            .map_err(|e| anyhow::anyhow!("failed to load auth config: {e}"))?;
        let listing = ListingConfig::init_from_env()
            .map_err(|e| anyhow::anyhow!("failed to load listing config: {e}"))?;

        let config = Self {
            server_config,
            database_config,
            auth,
            listing,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.auth.jwt_hmac_secret.trim().is_empty() {
            anyhow::bail!("AUTH_JWT_HMAC_SECRET must not be empty");
        }
        if self.auth.nonce_ttl_secs <= 0 {
            anyhow::bail!("AUTH_NONCE_TTL_SECS must be positive");
        }
        if self.auth.session_ttl_secs == 0 {
            anyhow::bail!("AUTH_SESSION_TTL_SECS must be positive");
        }
        let listing = &self.listing;
        if listing.max_page_size == 0 {
            anyhow::bail!("LISTING_MAX_PAGE_SIZE must be positive");
        }
        if listing.default_page_size == 0 || listing.default_page_size > listing.max_page_size {
            anyhow::bail!(
                "LISTING_DEFAULT_PAGE_SIZE ({}) must be within 1..={}",
                listing.default_page_size,
                listing.max_page_size
            );
        }
        Ok(())
    }
}
