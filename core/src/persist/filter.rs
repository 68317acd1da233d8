//! Listing query construction.
//!
//! A [`FilterSpec`] names which optional predicates apply; the
//! [`FilterQueryBuilder`] turns it into one parameterized `SELECT`. Predicates
//! are collected into a single `Condition` as typed expressions, so filter
//! values only ever reach the database as bound parameters and the rendered
//! template depends on which filters are set, never on what they contain.

use crate::auth::WalletAddress;
use crate::error::FilterError;
use entities::{airdrop, watchlist};
use sea_orm::sea_query::{Condition, Expr, LikeExpr, Order, Query, SelectStatement};
use sea_orm::{DbBackend, Iterable, Statement};
use std::collections::BTreeMap;

const LIKE_ESCAPE: char = '\\';

/// Columns that can be matched exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EqualityField {
    Chain,
    Status,
}

impl EqualityField {
    fn column(self) -> airdrop::Column {
        match self {
            EqualityField::Chain => airdrop::Column::Chain,
            EqualityField::Status => airdrop::Column::Status,
        }
    }
}

/// Substring targets. `Keyword` matches if any of its columns contains the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubstringField {
    ProjectName,
    Description,
    Keyword,
}

impl SubstringField {
    fn columns(self) -> &'static [airdrop::Column] {
        match self {
            SubstringField::ProjectName => &[airdrop::Column::ProjectName],
            SubstringField::Description => &[airdrop::Column::Description],
            SubstringField::Keyword => &[airdrop::Column::ProjectName, airdrop::Column::Description],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListingScope {
    #[default]
    All,
    /// Only airdrops on this wallet's watchlist.
    Watchlist(WalletAddress),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub scope: ListingScope,
    pub equality_filters: BTreeMap<EqualityField, String>,
    pub substring_filters: BTreeMap<SubstringField, String>,
    pub page: u64,
    pub page_size: u64,
}

impl FilterSpec {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            scope: ListingScope::All,
            equality_filters: BTreeMap::new(),
            substring_filters: BTreeMap::new(),
            page,
            page_size,
        }
    }

    pub fn scoped_to_watchlist(mut self, wallet: WalletAddress) -> Self {
        self.scope = ListingScope::Watchlist(wallet);
        self
    }

    pub fn with_equality(mut self, field: EqualityField, value: impl Into<String>) -> Self {
        self.equality_filters.insert(field, value.into());
        self
    }

    pub fn with_substring(mut self, field: SubstringField, pattern: impl Into<String>) -> Self {
        self.substring_filters.insert(field, pattern.into());
        self
    }

    pub fn validate(&self, max_page_size: u64) -> Result<(), FilterError> {
        let invalid = || FilterError::InvalidPagination {
            page: self.page,
            page_size: self.page_size,
            max_page_size,
        };
        if self.page < 1 || self.page_size < 1 || self.page_size > max_page_size {
            return Err(invalid());
        }
        match self.offset() {
            Some(offset) if offset <= i64::MAX as u64 => Ok(()),
            _ => Err(invalid()),
        }
    }

    /// `(page - 1) * page_size`, or `None` on overflow or `page == 0`.
    pub fn offset(&self) -> Option<u64> {
        self.page.checked_sub(1)?.checked_mul(self.page_size)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FilterQueryBuilder {
    backend: DbBackend,
    max_page_size: u64,
}

impl FilterQueryBuilder {
    pub fn new(backend: DbBackend, max_page_size: u64) -> Self {
        Self {
            backend,
            max_page_size,
        }
    }

    pub fn max_page_size(&self) -> u64 {
        self.max_page_size
    }

    /// Render `spec` into a statement whose `values` carry every filter
    /// value, the limit, and the offset, in predicate order.
    pub fn build(&self, spec: &FilterSpec) -> Result<Statement, FilterError> {
        spec.validate(self.max_page_size)?;
        Ok(self.backend.build(&select(spec)))
    }
}

fn select(spec: &FilterSpec) -> SelectStatement {
    let mut query = Query::select();
    query
        .columns(airdrop::Column::iter().map(|c| (airdrop::Entity, c)))
        .from(airdrop::Entity);

    let mut condition = Condition::all();

    if let ListingScope::Watchlist(wallet) = &spec.scope {
        query.inner_join(
            watchlist::Entity,
            Expr::col((watchlist::Entity, watchlist::Column::AirdropId))
                .equals((airdrop::Entity, airdrop::Column::Id)),
        );
        condition = condition.add(
            Expr::col((watchlist::Entity, watchlist::Column::WalletAddress)).eq(wallet.as_str()),
        );
    }

    for (field, value) in &spec.equality_filters {
        condition = condition.add(Expr::col((airdrop::Entity, field.column())).eq(value.as_str()));
    }

    for (field, pattern) in &spec.substring_filters {
        let pattern = contains_pattern(pattern);
        let mut any = Condition::any();
        for column in field.columns() {
            any = any.add(
                Expr::col((airdrop::Entity, *column))
                    .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
            );
        }
        condition = condition.add(any);
    }

    if !condition.is_empty() {
        query.cond_where(condition);
    }

    // validated by the caller
    let offset = spec.offset().unwrap_or_default();
    query
        .order_by((airdrop::Entity, airdrop::Column::CreatedAt), Order::Desc)
        .order_by((airdrop::Entity, airdrop::Column::Id), Order::Desc)
        .limit(spec.page_size)
        .offset(offset);

    query
}

/// Wrap `raw` in wildcards, escaping the wildcard characters it contains.
fn contains_pattern(raw: &str) -> String {
    let mut pattern = String::with_capacity(raw.len() + 2);
    pattern.push('%');
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Value;

    fn builder() -> FilterQueryBuilder {
        FilterQueryBuilder::new(DbBackend::Sqlite, 100)
    }

    fn values(stmt: &Statement) -> Vec<Value> {
        stmt.values.clone().map(|v| v.0).unwrap_or_default()
    }

    #[test]
    fn unfiltered_listing_binds_only_limit_and_offset() {
        let stmt = builder().build(&FilterSpec::new(3, 10)).unwrap();
        assert!(!stmt.sql.contains("WHERE"));
        assert!(stmt.sql.contains(r#"ORDER BY "Airdrop"."created_at" DESC, "Airdrop"."id" DESC"#));
        assert_eq!(values(&stmt), vec![Value::from(10u64), Value::from(20u64)]);
    }

    #[test]
    fn values_follow_predicate_order() {
        let spec = FilterSpec::new(1, 5)
            .with_substring(SubstringField::Keyword, "drop")
            .with_equality(EqualityField::Status, "active")
            .with_equality(EqualityField::Chain, "Ethereum");

        let stmt = builder().build(&spec).unwrap();
        assert_eq!(
            values(&stmt),
            vec![
                Value::from("Ethereum"),
                Value::from("active"),
                Value::from("%drop%"),
                Value::from("%drop%"),
                Value::from(5u64),
                Value::from(0u64),
            ]
        );
    }

    #[test]
    fn template_is_invariant_under_adversarial_values() {
        let benign = FilterSpec::new(2, 10)
            .with_equality(EqualityField::Chain, "Polygon")
            .with_substring(SubstringField::Keyword, "zk");
        let hostile_chain = "x' OR '1'='1";
        let hostile_search = "'); DROP TABLE \"Airdrop\"; --";
        let hostile = FilterSpec::new(2, 10)
            .with_equality(EqualityField::Chain, hostile_chain)
            .with_substring(SubstringField::Keyword, hostile_search);

        let benign = builder().build(&benign).unwrap();
        let hostile = builder().build(&hostile).unwrap();

        assert_eq!(benign.sql, hostile.sql);
        assert!(!hostile.sql.contains("DROP"));
        assert!(!hostile.sql.contains("OR '1'"));
        assert!(values(&hostile).contains(&Value::from(hostile_chain)));
        assert!(values(&hostile).contains(&Value::from(format!("%{hostile_search}%"))));
    }

    #[test]
    fn wildcards_in_search_are_escaped() {
        assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn watchlist_scope_joins_and_binds_wallet_first() {
        let wallet = WalletAddress::parse("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        let spec = FilterSpec::new(1, 10)
            .scoped_to_watchlist(wallet.clone())
            .with_equality(EqualityField::Chain, "BSC");

        let stmt = builder().build(&spec).unwrap();
        assert!(stmt.sql.contains(r#"INNER JOIN "Watchlist""#));
        assert!(!stmt.sql.contains(wallet.as_str()));
        assert_eq!(values(&stmt)[0], Value::from(wallet.as_str()));
        assert_eq!(values(&stmt)[1], Value::from("BSC"));
    }

    #[test]
    fn rejects_invalid_pagination() {
        let b = builder();
        for (page, size) in [(0, 10), (1, 0), (1, 101), (u64::MAX, 100)] {
            let err = b.build(&FilterSpec::new(page, size)).unwrap_err();
            assert!(matches!(err, FilterError::InvalidPagination { .. }), "{page}/{size}");
        }
        assert!(b.build(&FilterSpec::new(1, 100)).is_ok());
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(FilterSpec::new(1, 25).offset(), Some(0));
        assert_eq!(FilterSpec::new(4, 25).offset(), Some(75));
        assert_eq!(FilterSpec::new(0, 25).offset(), None);
    }
}
