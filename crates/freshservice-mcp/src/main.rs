use crate::prelude::*;
use clap::Parser;
use freshservice_core::validation::RequesterNamePolicy;

mod error;
mod freshservice;
mod mcp;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "MCP server and CLI for the Freshservice departments, requesters, service catalog and solutions APIs"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Freshservice domain (e.g. acme.freshservice.com)
    #[clap(long, env = "FRESHSERVICE_DOMAIN", global = true)]
    domain: Option<String>,

    /// Freshservice API key
    #[clap(
        long,
        env = "FRESHSERVICE_API_KEY",
        global = true,
        hide_env_values = true
    )]
    api_key: Option<String>,

    /// Per-request timeout in seconds
    #[clap(
        long,
        env = "FRESHSERVICE_TIMEOUT_SECS",
        global = true,
        default_value = "30"
    )]
    timeout: u64,

    /// Retries on connection failures and 502/503/504 responses
    #[clap(
        long,
        env = "FRESHSERVICE_MAX_RETRIES",
        global = true,
        default_value = "0"
    )]
    max_retries: u32,

    /// Accepted requester name combinations: `either` or `first-name-required`
    #[clap(
        long,
        env = "FRESHSERVICE_REQUESTER_NAME_POLICY",
        global = true,
        default_value = "either"
    )]
    requester_name_policy: RequesterNamePolicy,

    /// Whether to display additional information.
    #[clap(
        long,
        env = "FRESHSERVICE_VERBOSE",
        global = true,
        default_value = "false"
    )]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Model Context Protocol server
    MCP(crate::mcp::App),

    /// Department operations
    #[clap(subcommand)]
    Departments(crate::freshservice::departments::Commands),

    /// Requester operations
    #[clap(subcommand)]
    Requesters(crate::freshservice::requesters::Commands),

    /// Service catalog operations
    #[clap(subcommand)]
    ServiceItems(crate::freshservice::service_items::Commands),

    /// Knowledge base (solutions) operations
    #[clap(subcommand)]
    Solutions(crate::freshservice::solutions::Commands),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
        SubCommands::Departments(cmd) => crate::freshservice::departments::run(cmd, app.global).await,
        SubCommands::Requesters(cmd) => crate::freshservice::requesters::run(cmd, app.global).await,
        SubCommands::ServiceItems(cmd) => {
            crate::freshservice::service_items::run(cmd, app.global).await
        }
        SubCommands::Solutions(cmd) => crate::freshservice::solutions::run(cmd, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}

/// Settings with no credentials, for tests that must never reach the network.
#[cfg(test)]
pub(crate) fn test_global() -> Global {
    Global {
        domain: None,
        api_key: None,
        timeout: 30,
        max_retries: 0,
        requester_name_policy: RequesterNamePolicy::default(),
        verbose: false,
    }
}
