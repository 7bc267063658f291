//! Freshservice resource catalogue: paths, response keys, exposed fields and
//! request URL construction.

use serde_json::{Map, Value};

use crate::query::{bare_query_param, encode_query, quoted_query_param};

/// Numeric article status meaning "published".
pub const PUBLISHED_STATUS: i64 = 2;

/// Page size used by the aggregators that do not take one from the caller.
pub const AGGREGATE_PAGE_SIZE: usize = 100;

/// Largest page size the API accepts.
pub const MAX_PAGE_SIZE: usize = 100;

/// Default page size for single-page service catalog and article requests.
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Value substituted for a field the API left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Null,
    EmptyList,
    Zero,
}

impl FieldDefault {
    fn value(self) -> Value {
        match self {
            FieldDefault::Null => Value::Null,
            FieldDefault::EmptyList => Value::Array(Vec::new()),
            FieldDefault::Zero => Value::from(0),
        }
    }
}

/// One exposed field of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub default: FieldDefault,
}

const fn field(name: &'static str) -> Field {
    Field {
        name,
        default: FieldDefault::Null,
    }
}

const fn list_field(name: &'static str) -> Field {
    Field {
        name,
        default: FieldDefault::EmptyList,
    }
}

const fn counter_field(name: &'static str) -> Field {
    Field {
        name,
        default: FieldDefault::Zero,
    }
}

const DEPARTMENT_FIELDS: &[Field] = &[
    field("id"),
    field("name"),
    field("description"),
    field("head_user_id"),
    field("prime_user_id"),
    list_field("domains"),
    field("created_at"),
    field("updated_at"),
];

const REQUESTER_FIELDS: &[Field] = &[
    field("id"),
    field("first_name"),
    field("last_name"),
    field("primary_email"),
    field("job_title"),
    list_field("department_ids"),
    field("work_phone_number"),
    field("mobile_phone_number"),
    field("active"),
    field("created_at"),
    field("updated_at"),
];

const SERVICE_ITEM_FIELDS: &[Field] = &[
    field("id"),
    field("display_id"),
    field("name"),
    field("description"),
    field("short_description"),
    field("cost"),
    field("quantity"),
    field("category_id"),
    field("visibility"),
    field("deleted"),
    field("icon_name"),
];

const ARTICLE_FIELDS: &[Field] = &[
    field("id"),
    field("title"),
    field("description"),
    field("article_type"),
    field("folder_id"),
    field("category_id"),
    counter_field("thumbs_up"),
    counter_field("thumbs_down"),
    list_field("tags"),
    list_field("keywords"),
    field("updated_at"),
];

/// An API-exposed entity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Department,
    Requester,
    ServiceItem,
    Article,
}

impl Resource {
    /// Path under `/api/v2`.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Department => "departments",
            Resource::Requester => "requesters",
            Resource::ServiceItem => "service_catalog/items",
            Resource::Article => "solutions/articles",
        }
    }

    /// Key holding the item array in list responses.
    pub fn collection_key(self) -> &'static str {
        match self {
            Resource::Department => "departments",
            Resource::Requester => "requesters",
            Resource::ServiceItem => "service_items",
            Resource::Article => "articles",
        }
    }

    /// Key wrapping the record in single-item responses.
    pub fn item_key(self) -> &'static str {
        match self {
            Resource::Department => "department",
            Resource::Requester => "requester",
            Resource::ServiceItem => "service_item",
            Resource::Article => "article",
        }
    }

    /// Fields exposed to callers, in output order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Resource::Department => DEPARTMENT_FIELDS,
            Resource::Requester => REQUESTER_FIELDS,
            Resource::ServiceItem => SERVICE_ITEM_FIELDS,
            Resource::Article => ARTICLE_FIELDS,
        }
    }

    /// Project a raw record onto the exposed fields.
    pub fn project(self, item: &Value) -> Value {
        project(self.fields(), item)
    }

    /// Unwrap `{ "<item_key>": {...} }`, or return the body itself.
    pub fn unwrap_item(self, body: Value) -> Value {
        match body {
            Value::Object(mut map) if map.contains_key(self.item_key()) => map
                .remove(self.item_key())
                .unwrap_or(Value::Null),
            other => other,
        }
    }
}

/// Project `item` onto `fields`.
///
/// Every listed field is present in the output; missing ones take the
/// field's default. A non-object input projects to all defaults.
pub fn project(fields: &[Field], item: &Value) -> Value {
    let map: Map<String, Value> = fields
        .iter()
        .map(|f| {
            let value = item
                .get(f.name)
                .cloned()
                .unwrap_or_else(|| f.default.value());
            (f.name.to_string(), value)
        })
        .collect();
    Value::Object(map)
}

/// URL builder for one resource on one Freshservice domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
}

impl Endpoint {
    pub fn new(domain: &str, resource: Resource) -> Self {
        Self {
            base_url: format!(
                "https://{}/api/v2/{}",
                bare_domain(domain),
                resource.path()
            ),
        }
    }

    /// Build against an explicit base URL instead of a domain.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{id}`
    pub fn by_id(&self, id: u64) -> String {
        format!("{}/{id}", self.base_url)
    }

    /// `{base}?page={page}&per_page={per_page}`
    pub fn list(&self, page: u32, per_page: usize) -> String {
        format!("{}?page={page}&per_page={per_page}", self.base_url)
    }

    /// `{base}?query="<encoded>"`
    pub fn search_quoted(&self, query: &str) -> String {
        format!("{}?{}", self.base_url, quoted_query_param(query))
    }

    /// `{base}?query=<encoded>`
    pub fn search_bare(&self, query: &str) -> String {
        format!("{}?{}", self.base_url, bare_query_param(query))
    }

    /// `{base}?query="<encoded>"&page={page}&per_page={per_page}`
    pub fn search_quoted_page(&self, query: &str, page: u32, per_page: usize) -> String {
        format!(
            "{}?{}&page={page}&per_page={per_page}",
            self.base_url,
            quoted_query_param(query)
        )
    }

    /// `{base}/search?search_term=<encoded>&page={page}&per_page={per_page}`
    pub fn term_search(&self, term: &str, page: u32, per_page: usize) -> String {
        format!(
            "{}/search?search_term={}&page={page}&per_page={per_page}",
            self.base_url,
            encode_query(term)
        )
    }
}

/// Public portal URL of an article.
pub fn article_url(domain: &str, id: &Value) -> Option<String> {
    let id = match id {
        Value::Number(n) => n.to_string(),
        Value::String(s) if !s.is_empty() => s.clone(),
        _ => return None,
    };
    if id == "0" {
        return None;
    }
    Some(format!(
        "https://{}/support/solutions/articles/{id}",
        bare_domain(domain)
    ))
}

/// Strip an accidental scheme and trailing slash from a configured domain.
pub fn bare_domain(domain: &str) -> &str {
    domain
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
}

/// True when the record's `status` is the published code.
pub fn is_published(article: &Value) -> bool {
    article
        .get("status")
        .and_then(Value::as_f64)
        .is_some_and(|s| s == PUBLISHED_STATUS as f64)
}
