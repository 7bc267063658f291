//! Service catalog tool outputs.

use serde::Serialize;
use serde_json::Value;

use super::name_or_unknown;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::pagination::{nested_item_count, page_items};
use crate::resource::Resource;

/// Page-size summary attached to the full catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub per_page: usize,
    pub total_pages: usize,
}

/// Output of `list_all_service_items`.
///
/// `items` holds the raw page objects as returned by the API; the service
/// items themselves sit under each page's `service_items` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceItemPagesOutput {
    pub success: bool,
    pub message: String,
    pub items: Vec<Value>,
    pub total_count: usize,
    pub pagination: PageSummary,
}

/// Output of `search_service_items`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceItemListOutput {
    pub success: bool,
    pub message: String,
    pub items: Vec<Value>,
    pub total_count: usize,
}

/// Output of `get_service_item_by_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceItemOutput {
    pub success: bool,
    pub message: String,
    pub item: Option<Value>,
}

pub fn transform_service_item_pages(
    per_page: usize,
    result: Result<Vec<Value>, ApiError>,
) -> Envelope<ServiceItemPagesOutput> {
    match result {
        Ok(pages) => {
            let key = Resource::ServiceItem.collection_key();
            let total_count: usize = pages.iter().map(|p| nested_item_count(p, key)).sum();
            Envelope::Success(ServiceItemPagesOutput {
                success: true,
                message: format!(
                    "Found {total_count} service item(s) across {} page(s)",
                    pages.len()
                ),
                total_count,
                pagination: PageSummary {
                    per_page,
                    total_pages: pages.len(),
                },
                items: pages,
            })
        }
        Err(err) => Envelope::failure(&err, "fetch list of service items", "listing service items"),
    }
}

pub fn transform_service_item_search(
    query: &str,
    result: Result<Value, ApiError>,
) -> Envelope<ServiceItemListOutput> {
    match result {
        Ok(body) => {
            let items = page_items(body, Resource::ServiceItem.collection_key());
            let message = if items.is_empty() {
                format!("No service items found matching query: '{query}'")
            } else {
                format!("Found {} service item(s)", items.len())
            };
            Envelope::Success(ServiceItemListOutput {
                success: true,
                message,
                total_count: items.len(),
                items: items
                    .iter()
                    .map(|i| Resource::ServiceItem.project(i))
                    .collect(),
            })
        }
        Err(err) => Envelope::failure(
            &err,
            &format!("search service items with query '{query}'"),
            "searching service items",
        ),
    }
}

pub fn transform_service_item_lookup(
    display_id: u64,
    result: Result<Value, ApiError>,
) -> Envelope<ServiceItemOutput> {
    match result {
        Ok(body) => {
            let item = Resource::ServiceItem.unwrap_item(body);
            Envelope::Success(ServiceItemOutput {
                success: true,
                message: format!("Service item found: '{}'", name_or_unknown(&item, "name")),
                item: Some(Resource::ServiceItem.project(&item)),
            })
        }
        Err(err) if err.is_not_found() => Envelope::Success(ServiceItemOutput {
            success: false,
            message: format!("No service item found with display ID: {display_id}"),
            item: None,
        }),
        Err(err) => Envelope::failure(
            &err,
            &format!("retrieve service item with display ID {display_id}"),
            &format!("retrieving service item ID {display_id}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pages_total_count_sums_nested_items() {
        let pages = vec![
            json!({"service_items": [{"id": 1}, {"id": 2}]}),
            json!({"service_items": [{"id": 3}]}),
        ];

        let output = transform_service_item_pages(2, Ok(pages)).success().unwrap();

        assert_eq!(output.total_count, 3);
        assert_eq!(output.pagination, PageSummary { per_page: 2, total_pages: 2 });
        // Page objects are passed through untouched.
        assert_eq!(output.items[1], json!({"service_items": [{"id": 3}]}));
    }

    #[test]
    fn test_pages_error() {
        let env = transform_service_item_pages(
            100,
            Err(ApiError::remote(429, "https://acme.freshservice.com/api/v2/service_catalog/items?page=1&per_page=100", "")),
        )
        .error()
        .unwrap();

        assert_eq!(env.status_code, Some(429));
        assert!(env.error.starts_with("Failed to fetch list of service items:"));
    }

    #[test]
    fn test_search_projects_items() {
        let body = json!({"service_items": [
            {"id": 9, "display_id": 1009, "name": "Laptop", "cost": "1200.0", "custom_fields": []}
        ]});

        let output = transform_service_item_search("name:'laptop'", Ok(body))
            .success()
            .unwrap();

        assert_eq!(output.total_count, 1);
        assert_eq!(output.message, "Found 1 service item(s)");
        assert_eq!(output.items[0]["display_id"], 1009);
        assert!(output.items[0].get("custom_fields").is_none());
    }

    #[test]
    fn test_search_empty() {
        let output = transform_service_item_search("name:'unicorn'", Ok(json!({})))
            .success()
            .unwrap();

        assert!(output.success);
        assert!(output.items.is_empty());
        assert_eq!(output.message, "No service items found matching query: 'name:'unicorn''");
    }

    #[test]
    fn test_lookup() {
        let body = json!({"service_item": {"id": 9, "display_id": 1009, "name": "Laptop"}});

        let output = transform_service_item_lookup(1009, Ok(body)).success().unwrap();

        assert_eq!(output.message, "Service item found: 'Laptop'");
        assert_eq!(output.item.unwrap()["id"], 9);
    }

    #[test]
    fn test_lookup_not_found() {
        let err = ApiError::from_status(404, "https://acme.freshservice.com/api/v2/service_catalog/items/77", "");

        let value = serde_json::to_value(transform_service_item_lookup(77, Err(err))).unwrap();

        assert_eq!(
            value,
            json!({
                "success": false,
                "message": "No service item found with display ID: 77",
                "item": null
            })
        );
    }
}
