use crate::auth::WalletAddress;
use crate::error::PersistDbError;
use crate::persist::PersistCtx;
use chrono::NaiveDateTime;
use entities::watchlist;
use sea_orm::{EntityTrait, Set};

use super::common::{is_foreign_key_violation, is_unique_violation};

pub async fn insert_watchlist_entry(
    ctx: &PersistCtx,
    wallet: &WalletAddress,
    airdrop_id: i32,
    now: NaiveDateTime,
) -> Result<watchlist::Model, PersistDbError> {
    let model = watchlist::ActiveModel {
        wallet_address: Set(wallet.as_str().to_owned()),
        airdrop_id: Set(airdrop_id),
        created_at: Set(now),
    };

    watchlist::Entity::insert(model)
        .exec_with_returning(ctx.db.as_ref())
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                PersistDbError::AlreadyInWatchlist {
                    wallet: wallet.as_str().to_owned(),
                    airdrop_id,
                }
            } else if is_foreign_key_violation(&err) {
                PersistDbError::AirdropNotFound(airdrop_id)
            } else {
                PersistDbError::DatabaseFailure(err)
            }
        })
}
