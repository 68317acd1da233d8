use chrono::NaiveDateTime;
use sea_orm::{DbErr, SqlErr};

pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

/// Oldest `issued_at` that is still inside a window of `ttl_secs` ending at `now`.
pub fn window_start(now: NaiveDateTime, ttl_secs: i64) -> NaiveDateTime {
    now - chrono::Duration::seconds(ttl_secs)
}
