mod departments;
mod requesters;
mod service_items;
mod solutions;

use freshservice_core::envelope::Envelope;
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

fn internal_error(e: serde_json::Error) -> JsonRpcError {
    JsonRpcError::new(-32603, format!("Internal error: {e}"))
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "freshservice-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(internal_error)
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let mut tools = departments::tools();
    tools.extend(requesters::tools());
    tools.extend(service_items::tools());
    tools.extend(solutions::tools());

    serde_json::to_value(ToolsList { tools }).map_err(internal_error)
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::new(-32602, format!("Invalid params: {e}")))?;

    info!("Calling tool {}", params.name);

    match params.name.as_str() {
        "list_all_departments" => departments::handle_list_all_departments(global).await,
        "get_department_by_name" => {
            departments::handle_get_department_by_name(params.arguments, global).await
        }
        "get_department_by_id" => {
            departments::handle_get_department_by_id(params.arguments, global).await
        }
        "search_requesters_by_name" => {
            requesters::handle_search_requesters_by_name(params.arguments, global).await
        }
        "get_requesters_by_department_id" => {
            requesters::handle_get_requesters_by_department_id(params.arguments, global).await
        }
        "get_requester_by_id" => {
            requesters::handle_get_requester_by_id(params.arguments, global).await
        }
        "list_all_service_items" => {
            service_items::handle_list_all_service_items(params.arguments, global).await
        }
        "search_service_items" => {
            service_items::handle_search_service_items(params.arguments, global).await
        }
        "get_service_item_by_id" => {
            service_items::handle_get_service_item_by_id(params.arguments, global).await
        }
        "search_solutions" => solutions::handle_search_solutions(params.arguments, global).await,
        "search_solutions_paginated" => {
            solutions::handle_search_solutions_paginated(params.arguments, global).await
        }
        name => Err(JsonRpcError::new(-32602, format!("Unknown tool: {name}"))),
    }
}

/// Decode tool arguments. Missing arguments decode as an empty object.
fn parse_args<T: DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    let arguments = match arguments {
        None | Some(serde_json::Value::Null) => serde_json::json!({}),
        Some(value) => value,
    };

    serde_json::from_value(arguments)
        .map_err(|e| JsonRpcError::new(-32602, format!("Invalid arguments: {e}")))
}

/// Wrap an envelope in the MCP result format. Error envelopes set `isError`.
fn envelope_result<T: Serialize>(
    envelope: Envelope<T>,
) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(&envelope)
        .map_err(|e| JsonRpcError::new(-32603, format!("Serialization error: {e}")))?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: envelope.is_error().then_some(true),
    };

    serde_json::to_value(result).map_err(internal_error)
}
