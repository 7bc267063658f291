//! Requester tool outputs.

use serde::Serialize;
use serde_json::Value;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::pagination::page_items;
use crate::query::{join_fragments, QueryFragment};
use crate::resource::Resource;
use crate::validation::RequesterName;

/// Output of the requester collection tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequesterListOutput {
    pub success: bool,
    pub message: String,
    pub requesters: Vec<Value>,
    pub total_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Output of `get_requester_by_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequesterOutput {
    pub success: bool,
    pub message: String,
    pub requester: Option<Value>,
}

/// `first_name:'..' AND last_name:'..'` for the supplied names.
pub fn name_query(name: &RequesterName) -> String {
    join_fragments(&name.fragments())
}

/// `department_id:<id>`
pub fn department_query(department_id: u64) -> String {
    join_fragments(&[QueryFragment::number("department_id", department_id as i64)])
}

fn project_all(requesters: &[Value]) -> Vec<Value> {
    requesters
        .iter()
        .map(|r| Resource::Requester.project(r))
        .collect()
}

fn full_name(requester: &Value) -> String {
    let first = requester.get("first_name").and_then(Value::as_str).unwrap_or("");
    let last = requester.get("last_name").and_then(Value::as_str).unwrap_or("");
    format!("{first} {last}").trim().to_string()
}

pub fn transform_requester_search(
    name: &RequesterName,
    result: Result<Value, ApiError>,
) -> Envelope<RequesterListOutput> {
    match result {
        Ok(body) => {
            let requesters = page_items(body, Resource::Requester.collection_key());
            let message = if requesters.is_empty() {
                format!("No requesters found with {name}")
            } else {
                format!(
                    "Found {} requester(s) matching {name}",
                    requesters.len()
                )
            };
            Envelope::Success(RequesterListOutput {
                success: true,
                message,
                total_count: requesters.len(),
                requesters: project_all(&requesters),
                department_id: None,
                note: None,
            })
        }
        Err(err) => Envelope::failure(
            &err,
            &format!("search for requesters with {name}"),
            &format!("searching for requesters with {name}"),
        ),
    }
}

/// Shape a department listing. `all_pages` tells whether `result` holds
/// every page or only the first one.
pub fn transform_department_requesters(
    department_id: u64,
    all_pages: bool,
    result: Result<Vec<Value>, ApiError>,
) -> Envelope<RequesterListOutput> {
    match result {
        Ok(requesters) if requesters.is_empty() => Envelope::Success(RequesterListOutput {
            success: true,
            message: format!("No requesters found in department ID: {department_id}"),
            requesters: Vec::new(),
            total_count: 0,
            department_id: Some(department_id),
            note: None,
        }),
        Ok(requesters) => {
            let (message, note) = if all_pages {
                (
                    format!(
                        "Found {} requester(s) in department ID: {department_id}",
                        requesters.len()
                    ),
                    None,
                )
            } else {
                (
                    format!(
                        "Found {} requester(s) in department ID: {department_id} (first page)",
                        requesters.len()
                    ),
                    Some(
                        "This shows the first page only. Set get_all=true to retrieve all requesters."
                            .to_string(),
                    ),
                )
            };
            Envelope::Success(RequesterListOutput {
                success: true,
                message,
                total_count: requesters.len(),
                requesters: project_all(&requesters),
                department_id: Some(department_id),
                note,
            })
        }
        Err(err) => Envelope::failure(
            &err,
            &format!("retrieve requesters for department ID {department_id}"),
            &format!("retrieving requesters for department ID {department_id}"),
        ),
    }
}

pub fn transform_requester_lookup(
    requester_id: u64,
    result: Result<Value, ApiError>,
) -> Envelope<RequesterOutput> {
    match result {
        Ok(body) => {
            let requester = Resource::Requester.unwrap_item(body);
            Envelope::Success(RequesterOutput {
                success: true,
                message: format!("Requester found: '{}'", full_name(&requester)),
                requester: Some(Resource::Requester.project(&requester)),
            })
        }
        Err(err) if err.is_not_found() => Envelope::Success(RequesterOutput {
            success: false,
            message: format!("No requester found with ID: {requester_id}"),
            requester: None,
        }),
        Err(err) => Envelope::failure(
            &err,
            &format!("retrieve requester with ID {requester_id}"),
            &format!("retrieving requester ID {requester_id}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RequesterNamePolicy;
    use serde_json::json;

    fn name(first: Option<&str>, last: Option<&str>) -> RequesterName {
        RequesterName::validate(first, last, RequesterNamePolicy::Either).unwrap()
    }

    #[test]
    fn test_queries() {
        assert_eq!(
            name_query(&name(Some("Ada"), Some("Lovelace"))),
            "first_name:'Ada' AND last_name:'Lovelace'"
        );
        assert_eq!(department_query(42), "department_id:42");
    }

    #[test]
    fn test_search_found() {
        let body = json!({"requesters": [
            {"id": 1, "first_name": "Ada", "last_name": "Lovelace", "primary_email": "ada@example.com", "is_agent": false}
        ]});

        let output = transform_requester_search(&name(Some("Ada"), None), Ok(body))
            .success()
            .unwrap();

        assert!(output.success);
        assert_eq!(output.total_count, 1);
        assert_eq!(output.message, "Found 1 requester(s) matching first name: 'Ada'");
        assert_eq!(output.requesters[0]["primary_email"], "ada@example.com");
        assert!(output.requesters[0].get("is_agent").is_none());
        assert_eq!(output.requesters[0]["department_ids"], json!([]));
    }

    #[test]
    fn test_search_empty_is_success() {
        let output = transform_requester_search(
            &name(Some("Ada"), Some("Byron")),
            Ok(json!({"requesters": []})),
        )
        .success()
        .unwrap();

        assert!(output.success);
        assert_eq!(output.total_count, 0);
        assert_eq!(
            output.message,
            "No requesters found with first name: 'Ada' and last name: 'Byron'"
        );
    }

    #[test]
    fn test_search_error_mentions_criteria() {
        let env = transform_requester_search(
            &name(None, Some("Hopper")),
            Err(ApiError::Unexpected("connection refused".to_string())),
        )
        .error()
        .unwrap();

        assert_eq!(
            env.error,
            "Unexpected error occurred while searching for requesters with last name: 'Hopper': connection refused"
        );
    }

    #[test]
    fn test_department_requesters_all_pages() {
        let requesters = vec![json!({"id": 1}), json!({"id": 2})];

        let value = serde_json::to_value(transform_department_requesters(7, true, Ok(requesters)))
            .unwrap();

        assert_eq!(value["total_count"], 2);
        assert_eq!(value["department_id"], 7);
        assert_eq!(value["message"], "Found 2 requester(s) in department ID: 7");
        assert!(value.get("note").is_none());
    }

    #[test]
    fn test_department_requesters_first_page_has_note() {
        let output = transform_department_requesters(7, false, Ok(vec![json!({"id": 1})]))
            .success()
            .unwrap();

        assert!(output.message.ends_with("(first page)"));
        assert!(output.note.is_some());
    }

    #[test]
    fn test_department_requesters_empty() {
        let output = transform_department_requesters(7, true, Ok(vec![])).success().unwrap();

        assert!(output.success);
        assert_eq!(output.total_count, 0);
        assert_eq!(output.message, "No requesters found in department ID: 7");
    }

    #[test]
    fn test_lookup_found() {
        let body = json!({"requester": {"id": 3, "first_name": "Grace", "last_name": "Hopper"}});

        let output = transform_requester_lookup(3, Ok(body)).success().unwrap();

        assert_eq!(output.message, "Requester found: 'Grace Hopper'");
        assert_eq!(output.requester.unwrap()["id"], 3);
    }

    #[test]
    fn test_lookup_message_trims_missing_last_name() {
        let output = transform_requester_lookup(3, Ok(json!({"first_name": "Grace"})))
            .success()
            .unwrap();

        assert_eq!(output.message, "Requester found: 'Grace'");
    }

    #[test]
    fn test_lookup_not_found() {
        let err = ApiError::from_status(404, "https://acme.freshservice.com/api/v2/requesters/3", "");

        let output = transform_requester_lookup(3, Err(err)).success().unwrap();

        assert!(!output.success);
        assert_eq!(output.requester, None);
        assert_eq!(output.message, "No requester found with ID: 3");
    }
}
