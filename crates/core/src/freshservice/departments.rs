//! Department tool outputs.

use serde::Serialize;
use serde_json::Value;

use super::name_or_unknown;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::pagination::page_items;
use crate::query::{join_fragments, QueryFragment};
use crate::resource::Resource;

/// Output of `list_all_departments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentListOutput {
    pub success: bool,
    pub message: String,
    pub departments: Vec<Value>,
    pub total_count: usize,
}

/// Output of the single-department lookups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentOutput {
    pub success: bool,
    pub message: String,
    pub department: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_matches: Option<usize>,
}

/// `name:'<name>'`
pub fn name_query(name: &str) -> String {
    join_fragments(&[QueryFragment::text("name", name)])
}

pub fn transform_department_list(
    result: Result<Vec<Value>, ApiError>,
) -> Envelope<DepartmentListOutput> {
    match result {
        Ok(departments) => {
            let departments: Vec<Value> = departments
                .iter()
                .map(|d| Resource::Department.project(d))
                .collect();
            Envelope::Success(DepartmentListOutput {
                success: true,
                message: format!("Found {} department(s)", departments.len()),
                total_count: departments.len(),
                departments,
            })
        }
        Err(err) => Envelope::failure(&err, "fetch list of departments", "listing departments"),
    }
}

/// Shape a name search. The first match is returned; the API matches names
/// exactly, so there is normally only one.
pub fn transform_department_search(
    name: &str,
    result: Result<Value, ApiError>,
) -> Envelope<DepartmentOutput> {
    match result {
        Ok(body) => {
            let departments = page_items(body, Resource::Department.collection_key());
            match departments.first() {
                None => Envelope::Success(DepartmentOutput {
                    success: false,
                    message: format!("No department found with name: '{name}'"),
                    department: None,
                    total_matches: None,
                }),
                Some(department) => Envelope::Success(DepartmentOutput {
                    success: true,
                    message: format!(
                        "Department found: '{}'",
                        name_or_unknown(department, "name")
                    ),
                    department: Some(Resource::Department.project(department)),
                    total_matches: Some(departments.len()),
                }),
            }
        }
        Err(err) => Envelope::failure(
            &err,
            &format!("search for department '{name}'"),
            &format!("searching for department '{name}'"),
        ),
    }
}

/// Shape an id lookup. A 404 is a regular "not found" result.
pub fn transform_department_lookup(
    department_id: u64,
    result: Result<Value, ApiError>,
) -> Envelope<DepartmentOutput> {
    match result {
        Ok(body) => {
            let department = Resource::Department.unwrap_item(body);
            Envelope::Success(DepartmentOutput {
                success: true,
                message: format!(
                    "Department found: '{}'",
                    name_or_unknown(&department, "name")
                ),
                department: Some(Resource::Department.project(&department)),
                total_matches: None,
            })
        }
        Err(err) if err.is_not_found() => Envelope::Success(DepartmentOutput {
            success: false,
            message: format!("No department found with ID: {department_id}"),
            department: None,
            total_matches: None,
        }),
        Err(err) => Envelope::failure(
            &err,
            &format!("retrieve department with ID {department_id}"),
            &format!("retrieving department ID {department_id}"),
        ),
    }
}
