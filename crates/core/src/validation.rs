//! Argument checks performed before any request is sent.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;
use crate::query::QueryFragment;

/// Require a strictly positive identifier.
pub fn positive_id(value: Option<i64>, label: &str) -> Result<u64, ApiError> {
    match value {
        Some(id) if id > 0 => Ok(id as u64),
        _ => Err(ApiError::Validation(format!(
            "{label} is required and must be a positive integer"
        ))),
    }
}

/// Require a string that is non-empty after trimming. Returns it trimmed.
pub fn non_empty(value: Option<&str>, label: &str) -> Result<String, ApiError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ApiError::Validation(format!(
            "{label} is required and cannot be empty"
        ))),
    }
}

/// Require `per_page` within `1..=max`.
pub fn page_size(value: i64, max: usize, message: &str) -> Result<usize, ApiError> {
    if value >= 1 && value as u64 <= max as u64 {
        Ok(value as usize)
    } else {
        Err(ApiError::Validation(message.to_string()))
    }
}

/// Require a 1-based page number.
pub fn page_number(value: i64) -> Result<u32, ApiError> {
    u32::try_from(value)
        .ok()
        .filter(|p| *p >= 1)
        .ok_or_else(|| ApiError::Validation("Page number must be 1 or greater".to_string()))
}

/// Which name combinations a requester search accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequesterNamePolicy {
    /// At least one of first or last name.
    #[default]
    Either,
    /// First name mandatory, last name optional.
    FirstNameRequired,
}

impl FromStr for RequesterNamePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "either" => Ok(RequesterNamePolicy::Either),
            "first-name-required" => Ok(RequesterNamePolicy::FirstNameRequired),
            other => Err(format!(
                "Invalid requester name policy '{other}'. Expected 'either' or 'first-name-required'"
            )),
        }
    }
}

impl fmt::Display for RequesterNamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequesterNamePolicy::Either => write!(f, "either"),
            RequesterNamePolicy::FirstNameRequired => write!(f, "first-name-required"),
        }
    }
}

/// Validated, trimmed requester name criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequesterName {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl RequesterName {
    /// Apply `policy` to the raw arguments.
    pub fn validate(
        first_name: Option<&str>,
        last_name: Option<&str>,
        policy: RequesterNamePolicy,
    ) -> Result<Self, ApiError> {
        let first_name = trimmed(first_name);
        let last_name = trimmed(last_name);

        match policy {
            RequesterNamePolicy::Either if first_name.is_none() && last_name.is_none() => {
                Err(ApiError::Validation(
                    "At least one of first_name or last_name must be provided and cannot be empty"
                        .to_string(),
                ))
            }
            RequesterNamePolicy::FirstNameRequired if first_name.is_none() => Err(
                ApiError::Validation("First name is required and cannot be empty".to_string()),
            ),
            _ => Ok(Self {
                first_name,
                last_name,
            }),
        }
    }

    pub fn fragments(&self) -> Vec<QueryFragment> {
        let mut fragments = Vec::new();
        if let Some(first) = &self.first_name {
            fragments.push(QueryFragment::text("first_name", first));
        }
        if let Some(last) = &self.last_name {
            fragments.push(QueryFragment::text("last_name", last));
        }
        fragments
    }
}

impl fmt::Display for RequesterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(first) = &self.first_name {
            parts.push(format!("first name: '{first}'"));
        }
        if let Some(last) = &self.last_name {
            parts.push(format!("last name: '{last}'"));
        }
        write!(f, "{}", parts.join(" and "))
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::join_fragments;

    #[test]
    fn test_positive_id() {
        assert_eq!(positive_id(Some(5), "Department ID"), Ok(5));
        assert_eq!(
            positive_id(Some(0), "Department ID"),
            Err(ApiError::Validation(
                "Department ID is required and must be a positive integer".to_string()
            ))
        );
        assert!(positive_id(Some(-3), "Requester ID").is_err());
        assert!(positive_id(None, "Requester ID").is_err());
    }

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty(Some("  Finance "), "Department name"), Ok("Finance".to_string()));
        assert_eq!(
            non_empty(Some("   "), "Department name"),
            Err(ApiError::Validation(
                "Department name is required and cannot be empty".to_string()
            ))
        );
        assert!(non_empty(None, "Query").is_err());
    }

    #[test]
    fn test_page_size_bounds() {
        let msg = "per_page must be between 1 and 100";
        assert_eq!(page_size(1, 100, msg), Ok(1));
        assert_eq!(page_size(100, 100, msg), Ok(100));
        assert_eq!(page_size(0, 100, msg), Err(ApiError::Validation(msg.to_string())));
        assert!(page_size(101, 100, msg).is_err());
        assert!(page_size(-1, 100, msg).is_err());
    }

    #[test]
    fn test_page_number() {
        assert_eq!(page_number(1), Ok(1));
        assert!(page_number(0).is_err());
        assert!(page_number(-4).is_err());
    }

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!("either".parse::<RequesterNamePolicy>(), Ok(RequesterNamePolicy::Either));
        assert_eq!(
            "First_Name_Required".parse::<RequesterNamePolicy>(),
            Ok(RequesterNamePolicy::FirstNameRequired)
        );
        assert!("whatever".parse::<RequesterNamePolicy>().is_err());
        assert_eq!(RequesterNamePolicy::FirstNameRequired.to_string(), "first-name-required");
    }

    #[test]
    fn test_either_policy_rejects_two_blank_names() {
        let err = RequesterName::validate(Some(""), Some("  "), RequesterNamePolicy::Either);
        assert!(matches!(err, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_either_policy_accepts_last_name_only() {
        let name = RequesterName::validate(None, Some(" Hopper "), RequesterNamePolicy::Either)
            .unwrap();
        assert_eq!(name.first_name, None);
        assert_eq!(name.last_name.as_deref(), Some("Hopper"));
        assert_eq!(join_fragments(&name.fragments()), "last_name:'Hopper'");
        assert_eq!(name.to_string(), "last name: 'Hopper'");
    }

    #[test]
    fn test_first_name_required_policy() {
        assert!(RequesterName::validate(None, Some("Hopper"), RequesterNamePolicy::FirstNameRequired)
            .is_err());
        assert!(RequesterName::validate(Some(""), Some(""), RequesterNamePolicy::FirstNameRequired)
            .is_err());

        let name =
            RequesterName::validate(Some("Grace"), None, RequesterNamePolicy::FirstNameRequired)
                .unwrap();
        assert_eq!(join_fragments(&name.fragments()), "first_name:'Grace'");
    }

    #[test]
    fn test_both_names_joined() {
        let name = RequesterName::validate(
            Some("Grace"),
            Some("Hopper"),
            RequesterNamePolicy::Either,
        )
        .unwrap();
        assert_eq!(
            join_fragments(&name.fragments()),
            "first_name:'Grace' AND last_name:'Hopper'"
        );
        assert_eq!(name.to_string(), "first name: 'Grace' and last name: 'Hopper'");
    }
}
