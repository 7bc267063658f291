use crate::prelude::{println, *};
use std::time::Duration;

use colored::Colorize;
use freshservice_core::envelope::Envelope;
use freshservice_core::error::ApiError;
use freshservice_core::pagination::{collect_items, collect_pages, PageRequest};
use freshservice_core::resource::{Endpoint, Resource, AGGREGATE_PAGE_SIZE};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

pub mod departments;
pub mod requesters;
pub mod service_items;
pub mod solutions;

const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(8);

/// Freshservice connection settings, resolved from the global arguments.
#[derive(Debug, Clone)]
pub struct FreshserviceConfig {
    pub domain: String,
    pub api_key: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl FreshserviceConfig {
    /// Resolve the settings. Domain and API key are only required here, so
    /// commands that never reach the API work without them.
    pub fn from_global(global: &crate::Global) -> Result<Self, Error> {
        let domain = required(
            global.domain.as_deref(),
            "FRESHSERVICE_DOMAIN",
            "--domain",
        )?;
        let api_key = required(
            global.api_key.as_deref(),
            "FRESHSERVICE_API_KEY",
            "--api-key",
        )?;

        Ok(Self {
            domain,
            api_key,
            timeout: Duration::from_secs(global.timeout.max(1)),
            max_retries: global.max_retries,
        })
    }

    /// Basic auth with the API key as user name and `X` as password.
    pub fn auth_headers(&self) -> Result<HeaderMap, ApiError> {
        use base64::Engine;

        let auth_string = format!("{}:X", self.api_key);
        let auth_encoded = base64::engine::general_purpose::STANDARD.encode(&auth_string);

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {auth_encoded}"))
                .map_err(|e| ApiError::Unexpected(format!("Invalid header value: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(headers)
    }
}

fn required(value: Option<&str>, env: &'static str, flag: &'static str) -> Result<String, Error> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(Error::MissingSetting { env, flag })
}

/// One failed attempt, and whether trying again could help.
struct Failure {
    error: ApiError,
    retryable: bool,
}

impl Failure {
    fn fatal(error: ApiError) -> Self {
        Self {
            error,
            retryable: false,
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}

/// Delay before retry number `attempt` (1-based).
fn retry_delay(attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    RETRY_BASE_DELAY.saturating_mul(factor).min(RETRY_MAX_DELAY)
}

/// Read-only Freshservice API client.
///
/// Headers are rebuilt for every request and the client itself is created
/// per tool call; nothing is shared between calls.
pub struct ApiClient {
    http: reqwest::Client,
    config: FreshserviceConfig,
}

impl ApiClient {
    pub fn new(config: FreshserviceConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Client for the configured domain, or the error envelope a tool
    /// should return instead.
    pub fn connect<T>(global: &crate::Global) -> Result<Self, Envelope<T>> {
        let config =
            FreshserviceConfig::from_global(global).map_err(|e| Envelope::rejected(e.to_string()))?;
        Self::new(config).map_err(|e| Envelope::rejected(e.to_string()))
    }

    pub fn domain(&self) -> &str {
        &self.config.domain
    }

    pub fn endpoint(&self, resource: Resource) -> Endpoint {
        Endpoint::new(&self.config.domain, resource)
    }

    /// GET `url` and decode the JSON body, retrying transient failures up
    /// to the configured limit.
    pub async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        let mut attempt = 0;

        loop {
            debug!("GET {url}");

            match self.send(url).await {
                Ok(body) => return Ok(body),
                Err(failure) if failure.retryable && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = retry_delay(attempt);
                    warn!(
                        "{} (retry {attempt}/{} in {delay:?})",
                        failure.error, self.config.max_retries
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(failure) => return Err(failure.error),
            }
        }
    }

    async fn send(&self, url: &str) -> Result<Value, Failure> {
        let headers = self.config.auth_headers().map_err(Failure::fatal)?;

        let response = self
            .http
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| Failure {
                error: ApiError::Unexpected(self.transport_message(url, &e)),
                retryable: true,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Failure {
                error: ApiError::from_status(status.as_u16(), url, &body),
                retryable: is_retryable_status(status),
            });
        }

        let text = response.text().await.map_err(|e| {
            Failure::fatal(ApiError::Unexpected(self.transport_message(url, &e)))
        })?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            Failure::fatal(ApiError::Unexpected(format!(
                "Failed to parse response from {url}: {e}"
            )))
        })
    }

    fn transport_message(&self, url: &str, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!(
                "Request to {url} timed out after {}s",
                self.config.timeout.as_secs()
            )
        } else {
            format!("Request to {url} failed: {err}")
        }
    }

    /// Follow every page of a collection and flatten its items.
    pub async fn get_all<U>(&self, resource: Resource, url_for: U) -> Result<Vec<Value>, ApiError>
    where
        U: Fn(PageRequest) -> String,
    {
        collect_items(resource.collection_key(), AGGREGATE_PAGE_SIZE, |request| {
            let url = url_for(request);
            async move { self.get_json(&url).await }
        })
        .await
    }

    /// Follow every page of a collection and keep each page body whole.
    pub async fn get_all_pages<U>(
        &self,
        resource: Resource,
        per_page: usize,
        url_for: U,
    ) -> Result<Vec<Value>, ApiError>
    where
        U: Fn(PageRequest) -> String,
    {
        collect_pages(resource.collection_key(), per_page, |request| {
            let url = url_for(request);
            async move { self.get_json(&url).await }
        })
        .await
    }
}

/// Spinner on stderr shown while a command talks to the API.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print a tool result for a human, or as raw JSON with `--json`.
///
/// `rows` picks the records to tabulate out of the serialised payload and
/// `columns` names the fields shown for each of them. Error envelopes become
/// command errors outside of JSON mode.
pub(crate) fn print_envelope<T, R>(
    envelope: &Envelope<T>,
    json: bool,
    columns: &[&str],
    rows: R,
) -> Result<()>
where
    T: Serialize,
    R: FnOnce(&Value) -> Vec<Value>,
{
    let value = serde_json::to_value(envelope)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if let Envelope::Failure(failure) = envelope {
        let mut message = failure.error.clone();
        if let Some(status) = failure.status_code {
            message.push_str(&format!(" (HTTP {status})"));
        }
        if let Some(details) = &failure.details {
            message.push_str(&format!("\n{details}"));
        }
        return Err(eyre!(message));
    }

    let message = value["message"].as_str().unwrap_or_default();
    if value["success"].as_bool().unwrap_or(false) {
        println!("{}", message.green());
    } else {
        println!("{}", message.yellow());
    }

    if let Some(note) = value["note"].as_str() {
        println!("{}", note.dimmed());
    }

    let rows = rows(&value);
    if rows.is_empty() {
        return Ok(());
    }

    println!();
    let mut table = new_table();
    table.add_row(prettytable::Row::new(
        columns
            .iter()
            .map(|c| prettytable::Cell::new(c).style_spec("b"))
            .collect(),
    ));
    for row in &rows {
        table.add_row(prettytable::Row::new(
            columns
                .iter()
                .map(|c| prettytable::Cell::new(&cell_text(&row[*c])))
                .collect(),
        ));
    }
    table.printstd();

    Ok(())
}

/// Records under `key` in a payload, or the single record there.
pub(crate) fn records(value: &Value, key: &str) -> Vec<Value> {
    match &value[key] {
        Value::Array(items) => items.clone(),
        Value::Null => Vec::new(),
        record => vec![record.clone()],
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
