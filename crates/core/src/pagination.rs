//! Short-page pagination over Freshservice list endpoints.
//!
//! Pages are requested strictly in order starting at 1. A page that returns
//! fewer items than `per_page` is the last one. An API whose final page is
//! exactly full therefore costs one extra request that comes back empty; this
//! matches how the endpoints are consumed elsewhere and is not treated as an
//! error.
//!
//! The page fetcher is injected, so the loop itself has no I/O and can be
//! driven by fixture pages in tests. Any fetch error aborts the whole
//! aggregation and items gathered so far are dropped.

use std::future::Future;

use serde_json::Value;

/// Coordinates of one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: usize,
}

/// Pull the items out of one page response.
///
/// Bodies shaped like `{ "<key>": [...] }` yield that array. A body without
/// the key is treated as the list itself when it is an array, and as empty
/// otherwise. A key holding a non-array value yields nothing.
pub fn page_items(body: Value, key: &str) -> Vec<Value> {
    match body {
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

/// Number of items under `key` in a page object, without consuming it.
pub fn nested_item_count(body: &Value, key: &str) -> usize {
    body.get(key)
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}

/// True when a page with `count` items ends the iteration.
pub fn is_last_page(count: usize, per_page: usize) -> bool {
    count < per_page
}

/// Fetch every page and flatten the items under `key` into one list.
///
/// Items keep page order, then in-page order. Duplicates across pages are
/// kept as-is.
pub async fn collect_items<F, Fut, E>(
    key: &str,
    per_page: usize,
    mut fetch_page: F,
) -> Result<Vec<Value>, E>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Value, E>>,
{
    let per_page = per_page.max(1);
    let mut all_items = Vec::new();
    let mut page = 1;

    loop {
        let body = fetch_page(PageRequest { page, per_page }).await?;
        let items = page_items(body, key);
        let count = items.len();
        all_items.extend(items);

        if is_last_page(count, per_page) {
            break;
        }

        page += 1;
    }

    Ok(all_items)
}

/// Fetch every page and keep each page object whole.
///
/// Termination looks at the length of the array under `key` inside each
/// page object. Callers unwrap the items of each page themselves.
pub async fn collect_pages<F, Fut, E>(
    key: &str,
    per_page: usize,
    mut fetch_page: F,
) -> Result<Vec<Value>, E>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Value, E>>,
{
    let per_page = per_page.max(1);
    let mut pages = Vec::new();
    let mut page = 1;

    loop {
        let body = fetch_page(PageRequest { page, per_page }).await?;
        let count = nested_item_count(&body, key);
        pages.push(body);

        if is_last_page(count, per_page) {
            break;
        }

        page += 1;
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;

    /// Scripted page source: returns the configured bodies in order and
    /// records every request it receives.
    struct FakePages {
        bodies: Vec<Value>,
        requests: RefCell<Vec<PageRequest>>,
    }

    impl FakePages {
        fn new(bodies: Vec<Value>) -> Self {
            Self {
                bodies,
                requests: RefCell::new(Vec::new()),
            }
        }

        fn fetch(&self, req: PageRequest) -> futures::future::Ready<Result<Value, String>> {
            self.requests.borrow_mut().push(req);
            let idx = (req.page - 1) as usize;
            futures::future::ready(
                self.bodies
                    .get(idx)
                    .cloned()
                    .ok_or_else(|| format!("page {} was not scripted", req.page)),
            )
        }

        fn pages_requested(&self) -> Vec<u32> {
            self.requests.borrow().iter().map(|r| r.page).collect()
        }
    }

    fn departments(range: std::ops::Range<u64>) -> Value {
        let items: Vec<Value> = range.map(|id| json!({"id": id})).collect();
        json!({ "departments": items })
    }

    fn ids(items: &[Value]) -> Vec<u64> {
        items.iter().map(|i| i["id"].as_u64().unwrap()).collect()
    }

    #[test]
    fn test_page_items_shapes() {
        assert_eq!(page_items(json!({"articles": [1, 2]}), "articles").len(), 2);
        assert_eq!(page_items(json!([1, 2, 3]), "articles").len(), 3);
        assert!(page_items(json!({"other": [1]}), "articles").is_empty());
        assert!(page_items(json!({"articles": null}), "articles").is_empty());
        assert!(page_items(json!("nope"), "articles").is_empty());
    }

    #[test]
    fn test_single_short_page_stops_immediately() {
        let source = FakePages::new(vec![departments(1..4)]);

        let items = block_on(collect_items("departments", 100, |r| source.fetch(r))).unwrap();

        assert_eq!(ids(&items), vec![1, 2, 3]);
        assert_eq!(source.pages_requested(), vec![1]);
    }

    #[test]
    fn test_stops_after_first_short_page_and_concatenates_in_order() {
        let source = FakePages::new(vec![
            departments(0..3),
            departments(3..6),
            departments(6..8),
            departments(100..103),
        ]);

        let items = block_on(collect_items("departments", 3, |r| source.fetch(r))).unwrap();

        assert_eq!(ids(&items), vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(source.pages_requested(), vec![1, 2, 3]);
    }

    #[test]
    fn test_full_final_page_costs_one_empty_request() {
        let source = FakePages::new(vec![departments(0..2), departments(2..4), departments(0..0)]);

        let items = block_on(collect_items("departments", 2, |r| source.fetch(r))).unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(source.pages_requested(), vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicates_are_not_removed() {
        let source = FakePages::new(vec![departments(0..2), departments(1..2)]);

        let items = block_on(collect_items("departments", 2, |r| source.fetch(r))).unwrap();

        assert_eq!(ids(&items), vec![0, 1, 1]);
    }

    #[test]
    fn test_raw_list_body_is_accepted() {
        let source = FakePages::new(vec![json!([{"id": 1}, {"id": 2}]), json!([{"id": 3}])]);

        let items = block_on(collect_items("requesters", 2, |r| source.fetch(r))).unwrap();

        assert_eq!(ids(&items), vec![1, 2, 3]);
    }

    #[test]
    fn test_unexpected_shape_is_an_empty_last_page() {
        let source = FakePages::new(vec![json!({"message": "nothing here"})]);

        let items = block_on(collect_items("requesters", 100, |r| source.fetch(r))).unwrap();

        assert!(items.is_empty());
        assert_eq!(source.pages_requested(), vec![1]);
    }

    #[test]
    fn test_error_discards_partial_results() {
        // Page 2 is not scripted, so the second request fails.
        let source = FakePages::new(vec![departments(0..2)]);

        let result = block_on(collect_items("departments", 2, |r| source.fetch(r)));

        assert_eq!(result, Err("page 2 was not scripted".to_string()));
    }

    #[test]
    fn test_requests_carry_page_size() {
        let source = FakePages::new(vec![departments(0..5), departments(5..7)]);

        block_on(collect_items("departments", 5, |r| source.fetch(r))).unwrap();

        let requests = source.requests.borrow();
        assert!(requests.iter().all(|r| r.per_page == 5));
    }

    #[test]
    fn test_collect_pages_keeps_page_objects() {
        let full: Vec<Value> = (0..100).map(|id| json!({"id": id})).collect();
        let source = FakePages::new(vec![
            json!({"service_items": full, "meta": {"page": 1}}),
            json!({"service_items": [], "meta": {"page": 2}}),
        ]);

        let pages = block_on(collect_pages("service_items", 100, |r| source.fetch(r))).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0]["meta"]["page"], 1);
        assert_eq!(nested_item_count(&pages[0], "service_items"), 100);
        assert_eq!(nested_item_count(&pages[1], "service_items"), 0);
        assert_eq!(source.pages_requested(), vec![1, 2]);
    }

    #[test]
    fn test_collect_pages_missing_key_counts_as_empty() {
        let source = FakePages::new(vec![json!({"unexpected": true})]);

        let pages = block_on(collect_pages("service_items", 30, |r| source.fetch(r))).unwrap();

        assert_eq!(pages, vec![json!({"unexpected": true})]);
    }
}
