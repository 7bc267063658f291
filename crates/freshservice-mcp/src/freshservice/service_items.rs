use super::{print_envelope, records, spinner, ApiClient};
use crate::prelude::*;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use freshservice_core::envelope::Envelope;
use freshservice_core::freshservice::service_items::{
    transform_service_item_lookup, transform_service_item_pages, transform_service_item_search,
    ServiceItemListOutput, ServiceItemOutput, ServiceItemPagesOutput,
};
use freshservice_core::resource::{Resource, MAX_PAGE_SIZE};
use freshservice_core::validation::{non_empty, page_size, positive_id};

const COLUMNS: &[&str] = &[
    "id",
    "display_id",
    "name",
    "short_description",
    "cost",
    "category_id",
];

/// Default page size of the full catalog listing.
pub const DEFAULT_LIST_PAGE_SIZE: i64 = 100;

/// Service catalog commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List every service catalog item
    #[clap(name = "list")]
    List(ListOptions),

    /// Search service items with a raw Freshservice query
    #[clap(name = "search")]
    Search(SearchOptions),

    /// Get a service item by display ID
    #[clap(name = "get")]
    Get(GetOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {
    /// Items requested per page (1-100)
    #[arg(long, default_value_t = DEFAULT_LIST_PAGE_SIZE, allow_negative_numbers = true)]
    pub per_page: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct SearchOptions {
    /// Query (e.g., "name:'laptop'")
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct GetOptions {
    /// Display ID of the service item
    #[arg(allow_negative_numbers = true)]
    pub display_id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
///
/// Fetches every catalog page and returns the page bodies as they came.
pub async fn list_all_service_items_data(
    global: &crate::Global,
    per_page: i64,
) -> Envelope<ServiceItemPagesOutput> {
    let per_page = match page_size(per_page, MAX_PAGE_SIZE, "per_page must be between 1 and 100") {
        Ok(per_page) => per_page,
        Err(err) => return Envelope::rejected(err.to_string()),
    };
    let client = match ApiClient::connect(global) {
        Ok(client) => client,
        Err(envelope) => return envelope,
    };

    let endpoint = client.endpoint(Resource::ServiceItem);
    let result = client
        .get_all_pages(Resource::ServiceItem, per_page, |request| {
            endpoint.list(request.page, request.per_page)
        })
        .await;

    transform_service_item_pages(per_page, result)
}

/// Public data function - used by both CLI and MCP
pub async fn search_service_items_data(
    global: &crate::Global,
    query: Option<&str>,
) -> Envelope<ServiceItemListOutput> {
    let query = match non_empty(query, "Query") {
        Ok(query) => query,
        Err(err) => return Envelope::rejected(err.to_string()),
    };
    let client = match ApiClient::connect(global) {
        Ok(client) => client,
        Err(envelope) => return envelope,
    };

    let url = client.endpoint(Resource::ServiceItem).search_quoted(&query);

    transform_service_item_search(&query, client.get_json(&url).await)
}

/// Public data function - used by both CLI and MCP
pub async fn get_service_item_by_id_data(
    global: &crate::Global,
    display_id: Option<i64>,
) -> Envelope<ServiceItemOutput> {
    let display_id = match positive_id(display_id, "Display ID") {
        Ok(id) => id,
        Err(err) => return Envelope::rejected(err.to_string()),
    };
    let client = match ApiClient::connect(global) {
        Ok(client) => client,
        Err(envelope) => return envelope,
    };

    let url = client.endpoint(Resource::ServiceItem).by_id(display_id);

    transform_service_item_lookup(display_id, client.get_json(&url).await)
}

/// Service items nested in each page body of a listing.
fn listed_items(value: &Value) -> Vec<Value> {
    records(value, "items")
        .iter()
        .flat_map(|page| records(page, Resource::ServiceItem.collection_key()))
        .map(|item| Resource::ServiceItem.project(&item))
        .collect()
}

/// Run service catalog commands
pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    info!("Running service item command: {cmd:?}");

    match cmd {
        Commands::List(options) => {
            let progress = spinner("Fetching service catalog...");
            let envelope = list_all_service_items_data(&global, options.per_page).await;
            progress.finish_and_clear();

            print_envelope(&envelope, options.json, COLUMNS, listed_items)
        }
        Commands::Search(options) => {
            let progress = spinner("Searching service catalog...");
            let envelope = search_service_items_data(&global, Some(&options.query)).await;
            progress.finish_and_clear();

            print_envelope(&envelope, options.json, COLUMNS, |v| records(v, "items"))
        }
        Commands::Get(options) => {
            let progress = spinner("Fetching service item...");
            let envelope = get_service_item_by_id_data(&global, Some(options.display_id)).await;
            progress.finish_and_clear();

            print_envelope(&envelope, options.json, COLUMNS, |v| records(v, "item"))
        }
    }
}
