use crate::auth::WalletAddress;
use crate::error::PersistDbError;
use crate::persist::PersistCtx;
use chrono::NaiveDateTime;
use entities::auth_challenge;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

/// Store `value` as the only challenge for `address`, replacing any prior one.
pub async fn upsert_challenge(
    ctx: &PersistCtx,
    address: &WalletAddress,
    value: &str,
    issued_at: NaiveDateTime,
) -> Result<(), PersistDbError> {
    let model = auth_challenge::ActiveModel {
        address: Set(address.as_str().to_owned()),
        value: Set(value.to_owned()),
        issued_at: Set(issued_at),
        consumed: Set(false),
    };

    auth_challenge::Entity::insert(model)
        .on_conflict(
            OnConflict::column(auth_challenge::Column::Address)
                .update_columns([
                    auth_challenge::Column::Value,
                    auth_challenge::Column::IssuedAt,
                    auth_challenge::Column::Consumed,
                ])
                .to_owned(),
        )
        .exec_without_returning(ctx.db.as_ref())
        .await?;

    Ok(())
}

pub async fn get_challenge(
    ctx: &PersistCtx,
    address: &WalletAddress,
) -> Result<Option<auth_challenge::Model>, PersistDbError> {
    let row = auth_challenge::Entity::find_by_id(address.as_str())
        .one(ctx.db.as_ref())
        .await?;
    Ok(row)
}

/// Flip `consumed` if and only if the stored challenge is still `value`,
/// unconsumed, and issued no earlier than `not_before`.
///
/// The check and the write are one statement; of any number of concurrent
/// callers at most one observes `true`.
pub async fn mark_challenge_consumed(
    ctx: &PersistCtx,
    address: &WalletAddress,
    value: &str,
    not_before: NaiveDateTime,
) -> Result<bool, PersistDbError> {
    let res = auth_challenge::Entity::update_many()
        .col_expr(auth_challenge::Column::Consumed, Expr::value(true))
        .filter(auth_challenge::Column::Address.eq(address.as_str()))
        .filter(auth_challenge::Column::Value.eq(value))
        .filter(auth_challenge::Column::Consumed.eq(false))
        .filter(auth_challenge::Column::IssuedAt.gte(not_before))
        .exec(ctx.db.as_ref())
        .await?;

    Ok(res.rows_affected > 0)
}

/// Drop challenges that were consumed or issued before `cutoff`.
pub async fn delete_stale_challenges(
    ctx: &PersistCtx,
    cutoff: NaiveDateTime,
) -> Result<u64, PersistDbError> {
    let res = auth_challenge::Entity::delete_many()
        .filter(
            auth_challenge::Column::IssuedAt
                .lt(cutoff)
                .or(auth_challenge::Column::Consumed.eq(true)),
        )
        .exec(ctx.db.as_ref())
        .await?;

    Ok(res.rows_affected)
}
