use serde::Deserialize;
use serde_json::json;

use super::{envelope_result, parse_args, JsonRpcError, Tool};
use crate::freshservice::requesters;

pub fn tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "search_requesters_by_name".to_string(),
            description: "Search requesters by first name, last name or both. At least one name must be given (the server may be configured to require the first name). Returns contact details and department IDs for each match.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "first_name": {
                        "type": "string",
                        "description": "First name to match"
                    },
                    "last_name": {
                        "type": "string",
                        "description": "Last name to match"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "get_requesters_by_department_id".to_string(),
            description: "List the requesters that belong to a department. Fetches every page by default; set get_all=false to return only the first page of 100.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "department_id": {
                        "type": "integer",
                        "description": "Department ID (positive integer)"
                    },
                    "get_all": {
                        "type": "boolean",
                        "description": "Fetch every page (default: true)"
                    }
                },
                "required": ["department_id"]
            }),
        },
        Tool {
            name: "get_requester_by_id".to_string(),
            description: "Get a requester by numeric ID. A missing requester is reported with success=false and requester=null.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "requester_id": {
                        "type": "integer",
                        "description": "Requester ID (positive integer)"
                    }
                },
                "required": ["requester_id"]
            }),
        },
    ]
}

pub async fn handle_search_requesters_by_name(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        first_name: Option<String>,
        last_name: Option<String>,
    }

    let args: Args = parse_args(arguments)?;

    envelope_result(
        requesters::search_requesters_by_name_data(
            global,
            args.first_name.as_deref(),
            args.last_name.as_deref(),
        )
        .await,
    )
}

pub async fn handle_get_requesters_by_department_id(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        department_id: Option<i64>,
        get_all: Option<bool>,
    }

    let args: Args = parse_args(arguments)?;

    envelope_result(
        requesters::get_requesters_by_department_id_data(
            global,
            args.department_id,
            args.get_all.unwrap_or(true),
        )
        .await,
    )
}

pub async fn handle_get_requester_by_id(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        requester_id: Option<i64>,
    }

    let args: Args = parse_args(arguments)?;

    envelope_result(requesters::get_requester_by_id_data(global, args.requester_id).await)
}
