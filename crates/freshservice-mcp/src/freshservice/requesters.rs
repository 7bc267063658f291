use super::{print_envelope, records, spinner, ApiClient};
use crate::prelude::*;
use log::info;
use serde::{Deserialize, Serialize};

use freshservice_core::envelope::Envelope;
use freshservice_core::freshservice::requesters::{
    department_query, name_query, transform_department_requesters, transform_requester_lookup,
    transform_requester_search, RequesterListOutput, RequesterOutput,
};
use freshservice_core::pagination::page_items;
use freshservice_core::resource::{Resource, AGGREGATE_PAGE_SIZE};
use freshservice_core::validation::{positive_id, RequesterName};

const COLUMNS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "primary_email",
    "job_title",
    "department_ids",
];

/// Requester commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Search requesters by first and/or last name
    #[clap(name = "search")]
    Search(SearchOptions),

    /// List the requesters of a department
    #[clap(name = "department")]
    Department(DepartmentOptions),

    /// Get a requester by ID
    #[clap(name = "get")]
    Get(GetOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct SearchOptions {
    /// First name to match
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name to match
    #[arg(long)]
    pub last_name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct DepartmentOptions {
    /// Department ID
    #[arg(allow_negative_numbers = true)]
    pub department_id: i64,

    /// Only fetch the first page of results
    #[arg(long)]
    pub first_page_only: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct GetOptions {
    /// Requester ID
    #[arg(allow_negative_numbers = true)]
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
///
/// Which name combinations are accepted depends on the configured
/// requester name policy.
pub async fn search_requesters_by_name_data(
    global: &crate::Global,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Envelope<RequesterListOutput> {
    let name = match RequesterName::validate(first_name, last_name, global.requester_name_policy)
    {
        Ok(name) => name,
        Err(err) => return Envelope::rejected(err.to_string()),
    };
    let client = match ApiClient::connect(global) {
        Ok(client) => client,
        Err(envelope) => return envelope,
    };

    let url = client
        .endpoint(Resource::Requester)
        .search_bare(&name_query(&name));

    transform_requester_search(&name, client.get_json(&url).await)
}

/// Public data function - used by both CLI and MCP
///
/// With `get_all` every page is fetched; otherwise only the first page.
pub async fn get_requesters_by_department_id_data(
    global: &crate::Global,
    department_id: Option<i64>,
    get_all: bool,
) -> Envelope<RequesterListOutput> {
    let department_id = match positive_id(department_id, "Department ID") {
        Ok(id) => id,
        Err(err) => return Envelope::rejected(err.to_string()),
    };
    let client = match ApiClient::connect(global) {
        Ok(client) => client,
        Err(envelope) => return envelope,
    };

    let endpoint = client.endpoint(Resource::Requester);
    let query = department_query(department_id);

    let result = if get_all {
        client
            .get_all(Resource::Requester, |request| {
                endpoint.search_quoted_page(&query, request.page, request.per_page)
            })
            .await
    } else {
        let url = endpoint.search_quoted_page(&query, 1, AGGREGATE_PAGE_SIZE);
        client
            .get_json(&url)
            .await
            .map(|body| page_items(body, Resource::Requester.collection_key()))
    };

    transform_department_requesters(department_id, get_all, result)
}

/// Public data function - used by both CLI and MCP
pub async fn get_requester_by_id_data(
    global: &crate::Global,
    requester_id: Option<i64>,
) -> Envelope<RequesterOutput> {
    let requester_id = match positive_id(requester_id, "Requester ID") {
        Ok(id) => id,
        Err(err) => return Envelope::rejected(err.to_string()),
    };
    let client = match ApiClient::connect(global) {
        Ok(client) => client,
        Err(envelope) => return envelope,
    };

    let url = client.endpoint(Resource::Requester).by_id(requester_id);

    transform_requester_lookup(requester_id, client.get_json(&url).await)
}

/// Run requester commands
pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    info!("Running requester command: {cmd:?}");

    match cmd {
        Commands::Search(options) => {
            let progress = spinner("Searching requesters...");
            let envelope = search_requesters_by_name_data(
                &global,
                options.first_name.as_deref(),
                options.last_name.as_deref(),
            )
            .await;
            progress.finish_and_clear();

            print_envelope(&envelope, options.json, COLUMNS, |v| {
                records(v, "requesters")
            })
        }
        Commands::Department(options) => {
            let progress = spinner("Fetching department requesters...");
            let envelope = get_requesters_by_department_id_data(
                &global,
                Some(options.department_id),
                !options.first_page_only,
            )
            .await;
            progress.finish_and_clear();

            print_envelope(&envelope, options.json, COLUMNS, |v| {
                records(v, "requesters")
            })
        }
        Commands::Get(options) => {
            let progress = spinner("Fetching requester...");
            let envelope = get_requester_by_id_data(&global, Some(options.id)).await;
            progress.finish_and_clear();

            print_envelope(&envelope, options.json, COLUMNS, |v| {
                records(v, "requester")
            })
        }
    }
}
