use serde::Deserialize;
use serde_json::json;

use super::{envelope_result, parse_args, JsonRpcError, Tool};
use crate::freshservice::service_items::{self, DEFAULT_LIST_PAGE_SIZE};

pub fn tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "list_all_service_items".to_string(),
            description: "List the whole service catalog. Every page is fetched; items holds the raw page objects (each with a service_items array) and total_count the number of service items across them.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "per_page": {
                        "type": "integer",
                        "description": "Items requested per page (default: 100, min: 1, max: 100)"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "search_service_items".to_string(),
            description: "Search service catalog items with a Freshservice query string, e.g. \"name:'laptop'\". The query is sent as-is after trimming.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Freshservice query (e.g., \"name:'laptop'\")"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "get_service_item_by_id".to_string(),
            description: "Get a service catalog item by its display ID. A missing item is reported with success=false and item=null.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "display_id": {
                        "type": "integer",
                        "description": "Display ID of the service item (positive integer)"
                    }
                },
                "required": ["display_id"]
            }),
        },
    ]
}

pub async fn handle_list_all_service_items(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        per_page: Option<i64>,
    }

    let args: Args = parse_args(arguments)?;

    envelope_result(
        service_items::list_all_service_items_data(
            global,
            args.per_page.unwrap_or(DEFAULT_LIST_PAGE_SIZE),
        )
        .await,
    )
}

pub async fn handle_search_service_items(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        query: Option<String>,
    }

    let args: Args = parse_args(arguments)?;

    envelope_result(service_items::search_service_items_data(global, args.query.as_deref()).await)
}

pub async fn handle_get_service_item_by_id(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        display_id: Option<i64>,
    }

    let args: Args = parse_args(arguments)?;

    envelope_result(service_items::get_service_item_by_id_data(global, args.display_id).await)
}
