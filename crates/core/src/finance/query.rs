//! Query parameter normalization for transaction list endpoints.
//!
//! Raw query strings are tolerated, never trusted: page and limit get
//! defaults with floor/clamp enforcement, and each filter is validated
//! independently - an invalid filter value is dropped rather than failing
//! the whole parse.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::types::{TransactionStatus, TransactionType};

/// Default page when absent or invalid.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size when absent or invalid.
pub const DEFAULT_LIMIT: u32 = 20;
/// Maximum page size.
pub const MAX_LIMIT: u32 = 100;

/// Raw, string-typed query parameters as they arrive on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListQuery {
    /// Requested page number.
    pub page: Option<String>,
    /// Requested page size.
    pub limit: Option<String>,
    /// Transaction type filter.
    pub transaction_type: Option<String>,
    /// Status filter.
    pub status: Option<String>,
    /// Inclusive lower bound on transaction date.
    pub date_from: Option<String>,
    /// Inclusive upper bound on transaction date.
    pub date_to: Option<String>,
    /// Inclusive lower bound on amount.
    pub min_amount: Option<String>,
    /// Inclusive upper bound on amount.
    pub max_amount: Option<String>,
    /// Free-text search over description and number.
    pub search: Option<String>,
}

/// Normalized pagination plus validated filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Page number, 1-indexed, floored at 1.
    pub page: u32,
    /// Page size, clamped to `[1, MAX_LIMIT]`.
    pub limit: u32,
    /// Validated filters; invalid inputs are dropped.
    pub filters: TransactionFilters,
}

/// Validated transaction list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilters {
    /// Filter by transaction type.
    pub transaction_type: Option<TransactionType>,
    /// Filter by status.
    pub status: Option<TransactionStatus>,
    /// Filter by date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end.
    pub date_to: Option<NaiveDate>,
    /// Filter by minimum amount.
    pub min_amount: Option<Decimal>,
    /// Filter by maximum amount.
    pub max_amount: Option<Decimal>,
    /// Free-text search term.
    pub search: Option<String>,
}

impl ListQuery {
    /// Database query offset for the normalized page/limit.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Normalizes raw query parameters. Total over all inputs.
#[must_use]
pub fn parse_query_params(raw: &RawListQuery) -> ListQuery {
    let page = raw
        .page
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&p| p >= 1)
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(DEFAULT_PAGE);

    let limit = raw
        .limit
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&l| l >= 1)
        .map_or(DEFAULT_LIMIT, |l| {
            u32::try_from(l).unwrap_or(MAX_LIMIT).min(MAX_LIMIT)
        });

    let filters = TransactionFilters {
        transaction_type: raw
            .transaction_type
            .as_deref()
            .and_then(TransactionType::parse),
        status: raw.status.as_deref().and_then(TransactionStatus::parse),
        date_from: parse_date(raw.date_from.as_deref()),
        date_to: parse_date(raw.date_to.as_deref()),
        min_amount: parse_amount_filter(raw.min_amount.as_deref()),
        max_amount: parse_amount_filter(raw.max_amount.as_deref()),
        search: raw
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string),
    };

    ListQuery {
        page,
        limit,
        filters,
    }
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|s| s.trim().parse::<NaiveDate>().ok())
}

fn parse_amount_filter(value: Option<&str>) -> Option<Decimal> {
    value
        .and_then(|s| s.trim().parse::<Decimal>().ok())
        .filter(|d| *d >= Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn raw(page: Option<&str>, limit: Option<&str>) -> RawListQuery {
        RawListQuery {
            page: page.map(ToString::to_string),
            limit: limit.map(ToString::to_string),
            ..Default::default()
        }
    }

    #[rstest]
    #[case(None, DEFAULT_PAGE)]
    #[case(Some("3"), 3)]
    #[case(Some("0"), DEFAULT_PAGE)]
    #[case(Some("-5"), DEFAULT_PAGE)]
    #[case(Some("invalid"), DEFAULT_PAGE)]
    fn test_page_normalization(#[case] input: Option<&str>, #[case] expected: u32) {
        assert_eq!(parse_query_params(&raw(input, None)).page, expected);
    }

    #[rstest]
    #[case(None, DEFAULT_LIMIT)]
    #[case(Some("50"), 50)]
    #[case(Some("1000"), MAX_LIMIT)]
    #[case(Some("0"), DEFAULT_LIMIT)]
    #[case(Some("-1"), DEFAULT_LIMIT)]
    #[case(Some("abc"), DEFAULT_LIMIT)]
    fn test_limit_normalization(#[case] input: Option<&str>, #[case] expected: u32) {
        assert_eq!(parse_query_params(&raw(None, input)).limit, expected);
    }

    #[test]
    fn test_floor_and_clamp_together() {
        let parsed = parse_query_params(&raw(Some("0"), Some("1000")));
        assert_eq!(parsed.page, 1);
        assert_eq!(parsed.limit, 100);
    }

    #[test]
    fn test_offset() {
        let parsed = parse_query_params(&raw(Some("3"), Some("20")));
        assert_eq!(parsed.offset(), 40);
    }

    #[test]
    fn test_valid_filters_pass_through() {
        let parsed = parse_query_params(&RawListQuery {
            transaction_type: Some("expense".to_string()),
            status: Some("approved".to_string()),
            date_from: Some("2024-01-01".to_string()),
            date_to: Some("2024-12-31".to_string()),
            min_amount: Some("10.50".to_string()),
            max_amount: Some("500".to_string()),
            search: Some("  field rental  ".to_string()),
            ..Default::default()
        });

        assert_eq!(
            parsed.filters.transaction_type,
            Some(TransactionType::Expense)
        );
        assert_eq!(parsed.filters.status, Some(TransactionStatus::Approved));
        assert_eq!(
            parsed.filters.date_from,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(parsed.filters.min_amount, Some(dec!(10.50)));
        assert_eq!(parsed.filters.max_amount, Some(dec!(500)));
        assert_eq!(parsed.filters.search.as_deref(), Some("field rental"));
    }

    #[test]
    fn test_invalid_filters_are_dropped_independently() {
        let parsed = parse_query_params(&RawListQuery {
            transaction_type: Some("EXPENSE".to_string()),
            status: Some("nope".to_string()),
            date_from: Some("not-a-date".to_string()),
            min_amount: Some("-5".to_string()),
            max_amount: Some("abc".to_string()),
            search: Some("   ".to_string()),
            ..Default::default()
        });

        assert_eq!(parsed.filters, TransactionFilters::default());
        // Pagination still normalized even when every filter is garbage.
        assert_eq!(parsed.page, DEFAULT_PAGE);
        assert_eq!(parsed.limit, DEFAULT_LIMIT);
    }
}
