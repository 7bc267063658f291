//! Freshservice filter-query construction.
//!
//! The list endpoints accept a `query` parameter made of `field:value`
//! clauses combined with ` AND `. String values are single-quoted, numeric
//! values are bare. The joined string is percent-encoded as a whole.

use std::fmt;

/// One `field:value` clause of a filter query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFragment {
    /// `field:'value'`
    Text { field: String, value: String },
    /// `field:value`
    Number { field: String, value: i64 },
}

impl QueryFragment {
    pub fn text(field: impl Into<String>, value: impl Into<String>) -> Self {
        QueryFragment::Text {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn number(field: impl Into<String>, value: i64) -> Self {
        QueryFragment::Number {
            field: field.into(),
            value,
        }
    }
}

impl fmt::Display for QueryFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryFragment::Text { field, value } => write!(f, "{field}:'{value}'"),
            QueryFragment::Number { field, value } => write!(f, "{field}:{value}"),
        }
    }
}

/// Join clauses with ` AND `.
pub fn join_fragments(fragments: &[QueryFragment]) -> String {
    fragments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Percent-encode a query string.
///
/// Unreserved characters and `/` are kept literal; everything else,
/// including spaces and quotes, becomes `%XX`.
pub fn encode_query(query: &str) -> String {
    urlencoding::encode(query).replace("%2F", "/")
}

/// `query="<encoded>"` as the departments, service catalog and
/// requesters-by-department endpoints expect it. The double quotes are part
/// of the query value; the HTTP client's URL parser sends them as `%22`.
pub fn quoted_query_param(query: &str) -> String {
    format!("query=\"{}\"", encode_query(query))
}

/// `query=<encoded>` without the surrounding quotes, used by the requester
/// name search.
pub fn bare_query_param(query: &str) -> String {
    format!("query={}", encode_query(query))
}
