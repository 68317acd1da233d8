use crate::error::PersistDbError;
use crate::persist::{NewAirdrop, PersistCtx};
use chrono::NaiveDateTime;
use entities::{airdrop, sea_orm_active_enums::AirdropStatus};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set, Statement};

pub async fn insert_airdrop(
    ctx: &PersistCtx,
    new: NewAirdrop,
    now: NaiveDateTime,
) -> Result<airdrop::Model, PersistDbError> {
    let official_links = (!new.official_links.is_empty()).then(|| new.official_links.join(","));
    let model = airdrop::ActiveModel {
        project_name: Set(new.project_name),
        chain: Set(new.chain),
        token_symbol: Set(new.token_symbol),
        description: Set(new.description),
        eligibility_rules: Set(new.eligibility_rules),
        start_date: Set(new.start_date),
        end_date: Set(new.end_date),
        status: Set(new.status),
        official_links: Set(official_links),
        risk_score: Set(new.risk_score),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    airdrop::Entity::insert(model)
        .exec_with_returning(ctx.db.as_ref())
        .await
        .map_err(PersistDbError::from)
}

pub async fn get_airdrop(ctx: &PersistCtx, id: i32) -> Result<airdrop::Model, PersistDbError> {
    airdrop::Entity::find_by_id(id)
        .one(ctx.db.as_ref())
        .await?
        .ok_or(PersistDbError::AirdropNotFound(id))
}

pub async fn airdrop_exists(ctx: &PersistCtx, id: i32) -> Result<bool, PersistDbError> {
    let row = airdrop::Entity::find_by_id(id).one(ctx.db.as_ref()).await?;
    Ok(row.is_some())
}

pub async fn update_airdrop_status(
    ctx: &PersistCtx,
    id: i32,
    status: AirdropStatus,
    now: NaiveDateTime,
) -> Result<airdrop::Model, PersistDbError> {
    let res = airdrop::Entity::update_many()
        .col_expr(airdrop::Column::Status, Expr::value(status))
        .col_expr(airdrop::Column::UpdatedAt, Expr::value(now))
        .filter(airdrop::Column::Id.eq(id))
        .exec(ctx.db.as_ref())
        .await?;

    if res.rows_affected == 0 {
        return Err(PersistDbError::AirdropNotFound(id));
    }
    get_airdrop(ctx, id).await
}

/// Run a statement produced by the listing query builder.
pub async fn list_airdrops(
    ctx: &PersistCtx,
    statement: Statement,
) -> Result<Vec<airdrop::Model>, PersistDbError> {
    let rows = airdrop::Entity::find()
        .from_raw_sql(statement)
        .all(ctx.db.as_ref())
        .await?;
    Ok(rows)
}
