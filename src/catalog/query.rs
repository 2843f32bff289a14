//! Canonical catalog request shared by the storefront client and the products endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;
use utoipa::ToSchema;

use crate::catalog::{filter::FilterSelection, pagination::page_offset};

/// Fixed page size used by the storefront and admin product lists.
pub const ITEMS_PER_PAGE: u64 = 10;

const SORT_KEY: &str = "_sort";
const ORDER_KEY: &str = "_order";
const PAGE_KEY: &str = "_page";
const LIMIT_KEY: &str = "_limit";
const ADMIN_KEY: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortOrder) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageState {
    pub page_number: u64,
    pub page_size: u64,
}

impl PageState {
    pub fn first(page_size: u64) -> Self {
        Self {
            page_number: 1,
            page_size: page_size.max(1),
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::first(ITEMS_PER_PAGE)
    }
}

/// Fully derived catalog query. Equal browsing states produce equal requests
/// and identical query strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryRequest {
    pub filters: FilterSelection,
    pub sort: Option<SortSpec>,
    pub page: u64,
    pub limit: u64,
    pub admin: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryParseError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("_page must be at least 1")]
    ZeroPage,

    #[error("_order must be asc or desc, got {0:?}")]
    InvalidOrder(String),

    #[error("admin must be true or false, got {0:?}")]
    InvalidFlag(String),
}

pub fn build_request(
    selection: &FilterSelection,
    sort: Option<&SortSpec>,
    page: &PageState,
    admin: bool,
) -> QueryRequest {
    QueryRequest {
        filters: selection.clone(),
        sort: sort.cloned(),
        page: page.page_number.max(1),
        limit: page.page_size.max(1),
        admin,
    }
}

impl Default for QueryRequest {
    fn default() -> Self {
        build_request(&FilterSelection::default(), None, &PageState::default(), false)
    }
}

impl QueryRequest {
    /// Serializes to `dim=a&dim=b&_sort=..&_order=..&_page=..&_limit=..[&admin=true]`.
    /// Dimensions and their values come out in sorted order.
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        for (dimension, values) in self.filters.iter() {
            for value in values {
                out.append_pair(dimension, value);
            }
        }
        if let Some(sort) = &self.sort {
            out.append_pair(SORT_KEY, &sort.field);
            out.append_pair(ORDER_KEY, sort.direction.as_str());
        }
        out.append_pair(PAGE_KEY, &self.page.to_string());
        out.append_pair(LIMIT_KEY, &self.limit.to_string());
        if self.admin {
            out.append_pair(ADMIN_KEY, "true");
        }
        out.finish()
    }

    /// Parses a raw query string. Non-reserved keys are filter dimensions and
    /// may repeat; empty values are ignored.
    pub fn parse(query: &str) -> Result<Self, QueryParseError> {
        let mut filters = FilterSelection::default();
        let mut sort_field: Option<String> = None;
        let mut order: Option<SortOrder> = None;
        let mut page = 1;
        let mut limit = ITEMS_PER_PAGE;
        let mut admin = false;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                SORT_KEY => {
                    if !value.is_empty() {
                        sort_field = Some(value.into_owned());
                    }
                }
                ORDER_KEY => {
                    order = Some(
                        SortOrder::parse(&value)
                            .ok_or_else(|| QueryParseError::InvalidOrder(value.to_string()))?,
                    );
                }
                PAGE_KEY => {
                    page = parse_number(PAGE_KEY, &value)?;
                    if page == 0 {
                        return Err(QueryParseError::ZeroPage);
                    }
                }
                LIMIT_KEY => limit = parse_number(LIMIT_KEY, &value)?,
                ADMIN_KEY => {
                    admin = match value.as_ref() {
                        "true" | "1" => true,
                        "false" | "0" => false,
                        other => return Err(QueryParseError::InvalidFlag(other.to_string())),
                    };
                }
                dimension => {
                    if !value.is_empty() {
                        filters.insert(dimension, &value);
                    }
                }
            }
        }

        let sort = sort_field.map(|field| SortSpec {
            field,
            direction: order.unwrap_or(SortOrder::Desc),
        });

        Ok(Self {
            filters,
            sort,
            page,
            limit,
            admin,
        })
    }

    pub fn offset(&self) -> u64 {
        page_offset(self.page, self.limit)
    }
}

impl fmt::Display for QueryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<u64, QueryParseError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| QueryParseError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_dimension_keys() {
        let request =
            QueryRequest::parse("category=seeds&brand=acme&category=tools&_page=2&_limit=10")
                .unwrap();

        let categories: Vec<&str> = request.filters.values("category").collect();
        assert_eq!(categories, vec!["seeds", "tools"]);
        assert!(request.filters.contains("brand", "acme"));
        assert_eq!(request.page, 2);
        assert_eq!(request.offset(), 10);
        assert!(!request.admin);
    }

    #[test]
    fn sort_without_order_defaults_to_desc() {
        let request = QueryRequest::parse("_sort=rating").unwrap();
        assert_eq!(request.sort, Some(SortSpec::new("rating", SortOrder::Desc)));
    }

    #[test]
    fn order_without_sort_is_ignored() {
        let request = QueryRequest::parse("_order=asc").unwrap();
        assert_eq!(request.sort, None);
    }

    #[test]
    fn rejects_malformed_paging() {
        assert_eq!(QueryRequest::parse("_page=0"), Err(QueryParseError::ZeroPage));
        assert!(matches!(
            QueryRequest::parse("_page=two"),
            Err(QueryParseError::InvalidNumber { key: "_page", .. })
        ));
        assert_eq!(
            QueryRequest::parse("_order=sideways"),
            Err(QueryParseError::InvalidOrder("sideways".into()))
        );
        assert_eq!(
            QueryRequest::parse("admin=yes"),
            Err(QueryParseError::InvalidFlag("yes".into()))
        );
    }

    #[test]
    fn huge_page_number_saturates_offset() {
        let request = QueryRequest::parse("_page=18446744073709551615&_limit=10").unwrap();
        assert_eq!(request.page, u64::MAX);
        assert_eq!(request.offset(), i64::MAX as u64);
    }

    #[test]
    fn query_string_survives_parsing() {
        let request = QueryRequest::parse(
            "brand=Green%20Leaf&category=seeds&_sort=discountPrice&_order=asc&_page=3&_limit=10&admin=true",
        )
        .unwrap();
        let reparsed = QueryRequest::parse(&request.to_query_string()).unwrap();
        assert_eq!(reparsed, request);
        assert!(request.filters.contains("brand", "Green Leaf"));
    }
}
