use anyhow::anyhow;
use thiserror::Error;

// ---------- Persistence ----------

#[derive(Debug, Error)]
pub enum PersistDbError {
    #[error("Database operation failed: {0}")]
    DatabaseFailure(#[from] sea_orm::DbErr),

    #[error("Airdrop not found: {0}")]
    AirdropNotFound(i32),

    #[error("Airdrop {airdrop_id} is already in the watchlist of {wallet}")]
    AlreadyInWatchlist { wallet: String, airdrop_id: i32 },

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

// ---------- Challenge store ----------

/// Reasons a challenge could not be consumed.
#[derive(Debug, Error)]
pub enum NonceError {
    #[error("no challenge has been issued for this address")]
    NoSuchChallenge,

    #[error("challenge expired")]
    Expired,

    #[error("challenge already consumed")]
    AlreadyConsumed,

    #[error("challenge does not match the active one")]
    Mismatch,

    #[error(transparent)]
    Db(#[from] PersistDbError),
}

impl From<sea_orm::DbErr> for NonceError {
    fn from(err: sea_orm::DbErr) -> Self {
        NonceError::Db(PersistDbError::DatabaseFailure(err))
    }
}

// ---------- Authentication ----------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("no active challenge for this address")]
    NoActiveChallenge,

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("signature does not match the claimed address")]
    SignatureMismatch,

    #[error("challenge could not be consumed")]
    ChallengeConsumptionFailed,

    #[error("authentication required")]
    Unauthenticated,

    #[error("invalid credential")]
    InvalidCredential,

    #[error("credential expired")]
    CredentialExpired,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidAddress(_) => "InvalidAddress",
            AuthError::NoActiveChallenge => "NoActiveChallenge",
            AuthError::MalformedSignature(_) => "MalformedSignature",
            AuthError::SignatureMismatch => "SignatureMismatch",
            AuthError::ChallengeConsumptionFailed => "ChallengeConsumptionFailed",
            AuthError::Unauthenticated => "Unauthenticated",
            AuthError::InvalidCredential => "InvalidCredential",
            AuthError::CredentialExpired => "CredentialExpired",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidAddress(_) => ErrorKind::Input,
            AuthError::ChallengeConsumptionFailed => ErrorKind::Concurrency,
            AuthError::NoActiveChallenge
            | AuthError::MalformedSignature(_)
            | AuthError::SignatureMismatch
            | AuthError::Unauthenticated
            | AuthError::InvalidCredential
            | AuthError::CredentialExpired => ErrorKind::Authentication,
        }
    }
}

// ---------- Listing ----------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid pagination: page {page}, page size {page_size} (page >= 1, 1 <= page size <= {max_page_size})")]
    InvalidPagination {
        page: u64,
        page_size: u64,
        max_page_size: u64,
    },
}

// ---------- Service ----------

/// Coarse classification used by the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Authentication,
    Concurrency,
    NotFound,
    Conflict,
    Infrastructure,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("database error: {0}")]
    Db(PersistDbError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::InvalidParams(_) | ServiceError::Filter(_) => ErrorKind::Input,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Conflict(_) => ErrorKind::Conflict,
            ServiceError::Auth(e) => e.kind(),
            ServiceError::Db(_) | ServiceError::Other(_) => ErrorKind::Infrastructure,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidParams(_) => "InvalidParams",
            ServiceError::Filter(FilterError::InvalidPagination { .. }) => "InvalidPagination",
            ServiceError::NotFound(_) => "NotFound",
            ServiceError::Conflict(_) => "Conflict",
            ServiceError::Auth(e) => e.code(),
            ServiceError::Db(_) | ServiceError::Other(_) => "Internal",
        }
    }
}

impl From<PersistDbError> for ServiceError {
    fn from(e: PersistDbError) -> Self {
        match e {
            PersistDbError::AirdropNotFound(id) => {
                ServiceError::NotFound(format!("Airdrop {id} not found"))
            }
            PersistDbError::AlreadyInWatchlist { .. } => {
                ServiceError::Conflict("Already in watchlist".into())
            }
            PersistDbError::InvariantViolation(msg) => ServiceError::Other(anyhow!(msg)),
            PersistDbError::DatabaseFailure(e) => {
                ServiceError::Db(PersistDbError::DatabaseFailure(e))
            }
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Db(PersistDbError::DatabaseFailure(e))
    }
}

/// Infrastructure failures surface as-is; every other consume failure means
/// the challenge was lost to a concurrent or repeated attempt.
impl From<NonceError> for ServiceError {
    fn from(e: NonceError) -> Self {
        match e {
            NonceError::Db(db) => ServiceError::from(db),
            NonceError::NoSuchChallenge
            | NonceError::Expired
            | NonceError::AlreadyConsumed
            | NonceError::Mismatch => ServiceError::Auth(AuthError::ChallengeConsumptionFailed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_classify() {
        let err = ServiceError::from(AuthError::SignatureMismatch);
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.code(), "SignatureMismatch");

        let err = ServiceError::from(AuthError::MalformedSignature("odd length".into()));
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.code(), "MalformedSignature");

        let err = ServiceError::from(AuthError::InvalidAddress("0x12".into()));
        assert_eq!(err.kind(), ErrorKind::Input);

        let err = ServiceError::from(NonceError::AlreadyConsumed);
        assert_eq!(err.kind(), ErrorKind::Concurrency);
        assert_eq!(err.code(), "ChallengeConsumptionFailed");
    }

    #[test]
    fn persistence_failures_classify() {
        let err = ServiceError::from(PersistDbError::AlreadyInWatchlist {
            wallet: "0xabc".into(),
            airdrop_id: 7,
        });
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "conflict: Already in watchlist");

        let err = ServiceError::from(sea_orm::DbErr::Custom("boom".into()));
        assert_eq!(err.kind(), ErrorKind::Infrastructure);

        let err = ServiceError::from(NonceError::Db(PersistDbError::DatabaseFailure(
            sea_orm::DbErr::Custom("boom".into()),
        )));
        assert_eq!(err.kind(), ErrorKind::Infrastructure);
    }

    #[test]
    fn pagination_is_input_error() {
        let err = ServiceError::from(FilterError::InvalidPagination {
            page: 0,
            page_size: 10,
            max_page_size: 100,
        });
        assert_eq!(err.kind(), ErrorKind::Input);
        assert_eq!(err.code(), "InvalidPagination");
    }
}
