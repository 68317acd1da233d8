use crate::auth::address::WalletAddress;
use crate::auth::constants::CHALLENGE_ENTROPY_BYTES;
use crate::error::NonceError;
use crate::persist::{PersistCtx, repo};
use crate::util::{SystemTimeSource, to_naive};
use chrono::NaiveDateTime;
use log::{debug, info};
use rand::RngCore;
use std::sync::Arc;

/// Per-address single-use login challenges.
///
/// At most one challenge exists per canonical address. Issuing replaces the
/// previous value, and consuming is a single conditional update, so a value
/// authenticates at most one login no matter how many requests race for it.
#[derive(Clone)]
pub struct NonceStore {
    persist_ctx: PersistCtx,
    time_source: Arc<dyn SystemTimeSource>,
    ttl_secs: i64,
}

impl NonceStore {
    pub fn new(
        persist_ctx: PersistCtx,
        time_source: Arc<dyn SystemTimeSource>,
        ttl_secs: i64,
    ) -> Self {
        Self {
            persist_ctx,
            time_source,
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    pub fn generate_value() -> String {
        let mut bytes = [0u8; CHALLENGE_ENTROPY_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Issue a fresh challenge for `address`, invalidating any earlier one.
    pub async fn issue(&self, address: &WalletAddress) -> Result<String, NonceError> {
        let value = Self::generate_value();
        let issued_at = to_naive(self.time_source.now());
        repo::upsert_challenge(&self.persist_ctx, address, &value, issued_at).await?;
        debug!("issued challenge for {address}");
        Ok(value)
    }

    /// The challenge a login for `address` must sign right now, if any.
    pub async fn active_challenge(
        &self,
        address: &WalletAddress,
    ) -> Result<Option<String>, NonceError> {
        let now = self.now();
        let row = repo::get_challenge(&self.persist_ctx, address).await?;
        Ok(row
            .filter(|row| !row.consumed && !self.is_expired(row.issued_at, now))
            .map(|row| row.value))
    }

    /// Atomically mark `presented` as used.
    ///
    /// On failure the stored row is re-read only to report why; the outcome
    /// itself was decided by the conditional update.
    pub async fn consume(&self, address: &WalletAddress, presented: &str) -> Result<(), NonceError> {
        let now = self.now();
        let not_before = repo::common::window_start(now, self.ttl_secs);
        if repo::mark_challenge_consumed(&self.persist_ctx, address, presented, not_before).await? {
            return Ok(());
        }

        let row = repo::get_challenge(&self.persist_ctx, address).await?;
        let err = match row {
            None => NonceError::NoSuchChallenge,
            Some(row) if self.is_expired(row.issued_at, now) => NonceError::Expired,
            Some(row) if row.consumed => NonceError::AlreadyConsumed,
            Some(row) if row.value != presented => NonceError::Mismatch,
            // only reachable when a concurrent writer touched the row in between
            Some(_) => NonceError::AlreadyConsumed,
        };
        debug!("challenge consume for {address} rejected: {err}");
        Err(err)
    }

    /// Remove expired and consumed challenges. Returns the number removed.
    pub async fn purge_expired(&self) -> Result<u64, NonceError> {
        let cutoff = repo::common::window_start(self.now(), self.ttl_secs);
        let removed = repo::delete_stale_challenges(&self.persist_ctx, cutoff).await?;
        if removed > 0 {
            info!("purged {removed} stale auth challenges");
        }
        Ok(removed)
    }

    fn now(&self) -> NaiveDateTime {
        to_naive(self.time_source.now())
    }

    fn is_expired(&self, issued_at: NaiveDateTime, now: NaiveDateTime) -> bool {
        issued_at < repo::common::window_start(now, self.ttl_secs)
    }
}
