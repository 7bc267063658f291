//! Knowledge-base article tool outputs.

use serde::Serialize;
use serde_json::Value;

use crate::content::clean_html_content;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::resource::{article_url, is_published, Resource};

/// Output of `search_solutions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleSearchOutput {
    pub success: bool,
    pub message: String,
    pub articles: Vec<Value>,
    /// Published articles returned.
    pub total_count: usize,
    /// Articles the search matched before the published filter.
    pub total_found: usize,
    pub search_term: String,
}

/// Output of `search_solutions_paginated`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticlePageOutput {
    pub success: bool,
    pub message: String,
    pub articles: Vec<Value>,
    pub page: u32,
    pub per_page: usize,
    pub returned_count: usize,
    pub total_found: usize,
    pub search_term: String,
    /// The page came back full, so another may follow.
    pub has_more: bool,
}

/// Convert the HTML fields of each article to Markdown.
pub fn normalize_articles(articles: Vec<Value>) -> Vec<Value> {
    articles.iter().map(clean_html_content).collect()
}

/// Project an article and attach its portal URL.
pub fn format_article(domain: &str, article: &Value) -> Value {
    let mut projected = Resource::Article.project(article);
    let url = article
        .get("id")
        .and_then(|id| article_url(domain, id))
        .map(Value::String)
        .unwrap_or(Value::Null);
    if let Value::Object(map) = &mut projected {
        map.insert("url".to_string(), url);
    }
    projected
}

fn published(domain: &str, articles: &[Value]) -> Vec<Value> {
    articles
        .iter()
        .filter(|a| is_published(a))
        .map(|a| format_article(domain, a))
        .collect()
}

pub fn transform_article_search(
    domain: &str,
    search_term: &str,
    result: Result<Vec<Value>, ApiError>,
) -> Envelope<ArticleSearchOutput> {
    match result {
        Ok(articles) => {
            let total_found = articles.len();
            let published = published(domain, &articles);
            let message = if total_found == 0 {
                format!("No articles found for search term: '{search_term}'")
            } else if published.is_empty() {
                format!(
                    "No published articles found for search term: '{search_term}' (found {total_found} total articles, but none were published)"
                )
            } else {
                format!(
                    "Found {} published articles for search term: '{search_term}' (filtered from {total_found} total articles)",
                    published.len()
                )
            };
            Envelope::Success(ArticleSearchOutput {
                success: true,
                message,
                total_count: published.len(),
                total_found,
                articles: published,
                search_term: search_term.to_string(),
            })
        }
        Err(err) => Envelope::failure(
            &err,
            &format!("search for articles with term '{search_term}'"),
            &format!("searching for articles with term '{search_term}'"),
        ),
    }
}

pub fn transform_article_page(
    domain: &str,
    search_term: &str,
    page: u32,
    per_page: usize,
    result: Result<Vec<Value>, ApiError>,
) -> Envelope<ArticlePageOutput> {
    match result {
        Ok(articles) => {
            let total_found = articles.len();
            let published = published(domain, &articles);
            let message = if total_found == 0 {
                format!("No articles found for search term: '{search_term}' on page {page}")
            } else if published.is_empty() {
                format!(
                    "No published articles found for search term: '{search_term}' on page {page} (found {total_found} total articles, but none were published)"
                )
            } else {
                format!(
                    "Found {} published articles for search term: '{search_term}' on page {page} (filtered from {total_found} total articles)",
                    published.len()
                )
            };
            Envelope::Success(ArticlePageOutput {
                success: true,
                message,
                page,
                per_page,
                returned_count: published.len(),
                total_found,
                search_term: search_term.to_string(),
                has_more: total_found == per_page,
                articles: published,
            })
        }
        Err(err) => Envelope::failure(
            &err,
            &format!("search for articles with term '{search_term}'"),
            &format!("searching for articles with term '{search_term}'"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOMAIN: &str = "acme.freshservice.com";

    fn article(id: u64, status: i64) -> Value {
        json!({
            "id": id,
            "title": format!("Article {id}"),
            "description": "<p>Body</p>",
            "status": status,
            "hits": 12
        })
    }

    #[test]
    fn test_search_keeps_only_published() {
        let articles = vec![article(1, 2), article(2, 1), article(3, 2)];

        let output = transform_article_search(DOMAIN, "vpn", Ok(articles))
            .success()
            .unwrap();

        assert_eq!(output.articles.len(), 2);
        assert_eq!(output.total_count, 2);
        assert_eq!(output.total_found, 3);
        assert_eq!(output.articles[0]["id"], 1);
        assert_eq!(output.articles[1]["id"], 3);
        assert_eq!(
            output.message,
            "Found 2 published articles for search term: 'vpn' (filtered from 3 total articles)"
        );
    }

    #[test]
    fn test_search_none_published() {
        let output = transform_article_search(DOMAIN, "vpn", Ok(vec![article(1, 1)]))
            .success()
            .unwrap();

        assert!(output.success);
        assert!(output.articles.is_empty());
        assert_eq!(output.total_count, 0);
        assert_eq!(output.total_found, 1);
    }

    #[test]
    fn test_search_nothing_found() {
        let output = transform_article_search(DOMAIN, "vpn", Ok(vec![])).success().unwrap();

        assert_eq!(output.message, "No articles found for search term: 'vpn'");
        assert_eq!(output.total_found, 0);
    }

    #[test]
    fn test_format_article_adds_url_and_drops_status() {
        let formatted = format_article(DOMAIN, &article(77, 2));

        assert_eq!(
            formatted["url"],
            "https://acme.freshservice.com/support/solutions/articles/77"
        );
        assert!(formatted.get("status").is_none());
        assert!(formatted.get("hits").is_none());
        assert_eq!(formatted["thumbs_up"], 0);
    }

    #[test]
    fn test_format_article_without_id_has_null_url() {
        let formatted = format_article(DOMAIN, &json!({"title": "x"}));
        assert_eq!(formatted["url"], Value::Null);
    }

    #[test]
    fn test_normalize_articles_converts_html_fields() {
        let normalized = normalize_articles(vec![article(1, 2)]);

        assert_eq!(normalized[0]["description"], "Body");
        assert_eq!(normalized[0]["hits"], 12);
        assert_eq!(normalized[0]["status"], 2);
    }

    #[test]
    fn test_page_has_more_when_full() {
        let articles = vec![article(1, 2), article(2, 2)];

        let output = transform_article_page(DOMAIN, "printer", 3, 2, Ok(articles))
            .success()
            .unwrap();

        assert!(output.has_more);
        assert_eq!(output.page, 3);
        assert_eq!(output.returned_count, 2);
        assert_eq!(output.total_found, 2);
    }

    #[test]
    fn test_page_short_has_no_more() {
        let output = transform_article_page(DOMAIN, "printer", 1, 30, Ok(vec![article(1, 1)]))
            .success()
            .unwrap();

        assert!(!output.has_more);
        assert_eq!(output.returned_count, 0);
        assert!(output.message.contains("none were published"));
    }

    #[test]
    fn test_page_error() {
        let env = transform_article_page(
            DOMAIN,
            "printer",
            1,
            30,
            Err(ApiError::remote(400, "https://acme.freshservice.com/api/v2/solutions/articles/search", r#"{"errors":[]}"#)),
        )
        .error()
        .unwrap();

        assert_eq!(env.status_code, Some(400));
        assert_eq!(env.details, Some(json!({"errors": []})));
    }
}
