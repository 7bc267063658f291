use serde::Deserialize;
use serde_json::json;

use super::{envelope_result, parse_args, JsonRpcError, Tool};
use crate::freshservice::solutions;
use freshservice_core::resource::DEFAULT_PAGE_SIZE;

pub fn tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "search_solutions".to_string(),
            description: "Search knowledge base articles. Every result page is fetched, only published articles are returned, article text is converted from HTML to Markdown and each article carries its portal URL.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "search_term": {
                        "type": "string",
                        "description": "Text to search for in article titles and bodies"
                    }
                },
                "required": ["search_term"]
            }),
        },
        Tool {
            name: "search_solutions_paginated".to_string(),
            description: "Search knowledge base articles one page at a time. Only published articles are returned; has_more is true when the page came back full.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "search_term": {
                        "type": "string",
                        "description": "Text to search for in article titles and bodies"
                    },
                    "page": {
                        "type": "integer",
                        "description": "Page number, 1-indexed (default: 1)"
                    },
                    "per_page": {
                        "type": "integer",
                        "description": "Articles per page (default: 30, min: 1, max: 100)"
                    }
                },
                "required": ["search_term"]
            }),
        },
    ]
}

pub async fn handle_search_solutions(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        search_term: Option<String>,
    }

    let args: Args = parse_args(arguments)?;

    envelope_result(solutions::search_solutions_data(global, args.search_term.as_deref()).await)
}

pub async fn handle_search_solutions_paginated(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        search_term: Option<String>,
        page: Option<i64>,
        per_page: Option<i64>,
    }

    let args: Args = parse_args(arguments)?;

    envelope_result(
        solutions::search_solutions_paginated_data(
            global,
            args.search_term.as_deref(),
            args.page.unwrap_or(1),
            args.per_page.unwrap_or(DEFAULT_PAGE_SIZE as i64),
        )
        .await,
    )
}
