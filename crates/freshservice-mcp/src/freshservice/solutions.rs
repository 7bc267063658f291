use super::{print_envelope, records, spinner, ApiClient};
use crate::prelude::*;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use freshservice_core::envelope::Envelope;
use freshservice_core::freshservice::solutions::{
    normalize_articles, transform_article_page, transform_article_search, ArticlePageOutput,
    ArticleSearchOutput,
};
use freshservice_core::pagination::page_items;
use freshservice_core::resource::{Resource, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use freshservice_core::validation::{non_empty, page_number, page_size};

const COLUMNS: &[&str] = &["id", "title", "folder_id", "updated_at", "url"];

/// Knowledge base commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Search published articles, fetching every result page
    #[clap(name = "search")]
    Search(SearchOptions),

    /// Search published articles one page at a time
    #[clap(name = "page")]
    Page(PageOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct SearchOptions {
    /// Search term
    pub search_term: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct PageOptions {
    /// Search term
    pub search_term: String,

    /// Page number, 1-indexed
    #[arg(long, default_value = "1", allow_negative_numbers = true)]
    pub page: i64,

    /// Articles per page (1-100)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE as i64, allow_negative_numbers = true)]
    pub per_page: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
///
/// Article text comes back as Markdown and only published articles are
/// returned.
pub async fn search_solutions_data(
    global: &crate::Global,
    search_term: Option<&str>,
) -> Envelope<ArticleSearchOutput> {
    let search_term = match non_empty(search_term, "Search term") {
        Ok(term) => term,
        Err(err) => return Envelope::rejected(err.to_string()),
    };
    let client = match ApiClient::connect(global) {
        Ok(client) => client,
        Err(envelope) => return envelope,
    };

    let endpoint = client.endpoint(Resource::Article);
    let result = client
        .get_all(Resource::Article, |request| {
            endpoint.term_search(&search_term, request.page, request.per_page)
        })
        .await
        .map(normalize_articles);

    if let Ok(articles) = &result {
        debug!("Search '{search_term}' matched {} article(s)", articles.len());
    }

    transform_article_search(client.domain(), &search_term, result)
}

/// Public data function - used by both CLI and MCP
pub async fn search_solutions_paginated_data(
    global: &crate::Global,
    search_term: Option<&str>,
    page: i64,
    per_page: i64,
) -> Envelope<ArticlePageOutput> {
    let search_term = match non_empty(search_term, "Search term") {
        Ok(term) => term,
        Err(err) => return Envelope::rejected(err.to_string()),
    };
    let page = match page_number(page) {
        Ok(page) => page,
        Err(err) => return Envelope::rejected(err.to_string()),
    };
    let per_page = match page_size(
        per_page,
        MAX_PAGE_SIZE,
        "Items per page must be between 1 and 100",
    ) {
        Ok(per_page) => per_page,
        Err(err) => return Envelope::rejected(err.to_string()),
    };
    let client = match ApiClient::connect(global) {
        Ok(client) => client,
        Err(envelope) => return envelope,
    };

    let url = client
        .endpoint(Resource::Article)
        .term_search(&search_term, page, per_page);
    let result = client
        .get_json(&url)
        .await
        .map(|body| normalize_articles(page_items(body, Resource::Article.collection_key())));

    transform_article_page(client.domain(), &search_term, page, per_page, result)
}

/// Run knowledge base commands
pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    info!("Running solutions command: {cmd:?}");

    match cmd {
        Commands::Search(options) => {
            let progress = spinner("Searching articles...");
            let envelope = search_solutions_data(&global, Some(&options.search_term)).await;
            progress.finish_and_clear();

            print_envelope(&envelope, options.json, COLUMNS, |v| {
                records(v, "articles")
            })
        }
        Commands::Page(options) => {
            let progress = spinner(&format!("Searching articles (page {})...", options.page));
            let envelope = search_solutions_paginated_data(
                &global,
                Some(&options.search_term),
                options.page,
                options.per_page,
            )
            .await;
            progress.finish_and_clear();

            print_envelope(&envelope, options.json, COLUMNS, |v| {
                records(v, "articles")
            })
        }
    }
}
