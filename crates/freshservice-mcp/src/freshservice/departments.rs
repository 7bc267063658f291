use super::{print_envelope, records, spinner, ApiClient};
use crate::prelude::*;
use log::info;
use serde::{Deserialize, Serialize};

use freshservice_core::envelope::Envelope;
use freshservice_core::freshservice::departments::{
    name_query, transform_department_list, transform_department_lookup,
    transform_department_search, DepartmentListOutput, DepartmentOutput,
};
use freshservice_core::resource::Resource;
use freshservice_core::validation::{non_empty, positive_id};

const COLUMNS: &[&str] = &["id", "name", "description", "head_user_id", "prime_user_id"];

/// Department commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List every department
    #[clap(name = "list")]
    List(ListOptions),

    /// Find a department by its exact name
    #[clap(name = "search")]
    Search(SearchOptions),

    /// Get a department by ID
    #[clap(name = "get")]
    Get(GetOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct SearchOptions {
    /// Department name
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct GetOptions {
    /// Department ID
    #[arg(allow_negative_numbers = true)]
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
/// Lists every department, following pagination to the end.
pub async fn list_all_departments_data(global: &crate::Global) -> Envelope<DepartmentListOutput> {
    let client = match ApiClient::connect(global) {
        Ok(client) => client,
        Err(envelope) => return envelope,
    };

    let endpoint = client.endpoint(Resource::Department);
    let result = client
        .get_all(Resource::Department, |request| {
            endpoint.list(request.page, request.per_page)
        })
        .await;

    transform_department_list(result)
}

/// Public data function - used by both CLI and MCP
pub async fn get_department_by_name_data(
    global: &crate::Global,
    name: Option<&str>,
) -> Envelope<DepartmentOutput> {
    let name = match non_empty(name, "Department name") {
        Ok(name) => name,
        Err(err) => return Envelope::rejected(err.to_string()),
    };
    let client = match ApiClient::connect(global) {
        Ok(client) => client,
        Err(envelope) => return envelope,
    };

    let url = client
        .endpoint(Resource::Department)
        .search_quoted(&name_query(&name));

    transform_department_search(&name, client.get_json(&url).await)
}

/// Public data function - used by both CLI and MCP
pub async fn get_department_by_id_data(
    global: &crate::Global,
    department_id: Option<i64>,
) -> Envelope<DepartmentOutput> {
    let department_id = match positive_id(department_id, "Department ID") {
        Ok(id) => id,
        Err(err) => return Envelope::rejected(err.to_string()),
    };
    let client = match ApiClient::connect(global) {
        Ok(client) => client,
        Err(envelope) => return envelope,
    };

    let url = client.endpoint(Resource::Department).by_id(department_id);

    transform_department_lookup(department_id, client.get_json(&url).await)
}

/// Run department commands
pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    info!("Running department command: {cmd:?}");

    match cmd {
        Commands::List(options) => {
            let progress = spinner("Fetching departments...");
            let envelope = list_all_departments_data(&global).await;
            progress.finish_and_clear();

            print_envelope(&envelope, options.json, COLUMNS, |v| {
                records(v, "departments")
            })
        }
        Commands::Search(options) => {
            let progress = spinner("Searching departments...");
            let envelope = get_department_by_name_data(&global, Some(&options.name)).await;
            progress.finish_and_clear();

            print_envelope(&envelope, options.json, COLUMNS, |v| {
                records(v, "department")
            })
        }
        Commands::Get(options) => {
            let progress = spinner("Fetching department...");
            let envelope = get_department_by_id_data(&global, Some(options.id)).await;
            progress.finish_and_clear();

            print_envelope(&envelope, options.json, COLUMNS, |v| {
                records(v, "department")
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_by_id_rejects_non_positive_ids() {
        // Arrange
        let global = crate::test_global();

        // Act
        let envelope = get_department_by_id_data(&global, Some(0)).await;

        // Assert
        let err = envelope.error().unwrap();
        assert_eq!(
            err.error,
            "Department ID is required and must be a positive integer"
        );
        assert_eq!(err.status_code, None);
    }

    #[tokio::test]
    async fn test_get_by_name_rejects_blank_names() {
        let global = crate::test_global();

        let envelope = get_department_by_name_data(&global, Some("   ")).await;

        assert_eq!(
            envelope.error().unwrap().error,
            "Department name is required and cannot be empty"
        );
    }

    #[tokio::test]
    async fn test_missing_credentials_reported_at_call_time() {
        let global = crate::test_global();

        let envelope = list_all_departments_data(&global).await;

        assert!(envelope.is_error());
        assert!(envelope
            .error()
            .unwrap()
            .error
            .contains("FRESHSERVICE_DOMAIN"));
    }
}
