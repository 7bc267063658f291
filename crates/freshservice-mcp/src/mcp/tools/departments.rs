use serde::Deserialize;
use serde_json::json;

use super::{envelope_result, parse_args, JsonRpcError, Tool};
use crate::freshservice::departments;

pub fn tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "list_all_departments".to_string(),
            description: "List all departments in Freshservice. Follows pagination until every department has been retrieved. Returns id, name, description, head and prime user IDs, domains and timestamps for each department.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        Tool {
            name: "get_department_by_name".to_string(),
            description: "Find a department by its exact name. Returns the first matching department and the number of matches.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Department name (e.g., 'Finance')"
                    }
                },
                "required": ["name"]
            }),
        },
        Tool {
            name: "get_department_by_id".to_string(),
            description: "Get a department by its numeric ID. A missing department is reported with success=false and department=null.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "department_id": {
                        "type": "integer",
                        "description": "Department ID (positive integer)"
                    }
                },
                "required": ["department_id"]
            }),
        },
    ]
}

pub async fn handle_list_all_departments(
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    envelope_result(departments::list_all_departments_data(global).await)
}

pub async fn handle_get_department_by_name(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        name: Option<String>,
    }

    let args: Args = parse_args(arguments)?;

    envelope_result(departments::get_department_by_name_data(global, args.name.as_deref()).await)
}

pub async fn handle_get_department_by_id(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        department_id: Option<i64>,
    }

    let args: Args = parse_args(arguments)?;

    envelope_result(departments::get_department_by_id_data(global, args.department_id).await)
}
