//! Core library for freshservice-mcp
//!
//! This crate implements the **Functional Core** of the freshservice-mcp
//! application, following the Functional Core - Imperative Shell architectural
//! pattern.
//!
//! # Architecture Overview
//!
//! The project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`freshservice_core`** (this crate): Pure transformation functions with zero I/O
//! - **`freshservice-mcp`**: HTTP calls, configuration, MCP server and CLI (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Testable**: Can be tested with fixture JSON, no HTTP mocking required
//!
//! The one place where this crate awaits anything is the pagination
//! aggregator, and even there the page fetcher is injected by the caller.
//!
//! # Module Organization
//!
//! - [`query`]: `field:value` clauses, ` AND ` joining and percent-encoding
//! - [`resource`]: Resource paths, response keys, field projection table, URL builders
//! - [`pagination`]: Short-page aggregation over an injected page fetcher
//! - [`content`]: HTML to Markdown normalisation of article text
//! - [`validation`]: Argument checks run before any request
//! - [`envelope`]: Success/error result shapes
//! - [`error`]: Error kinds for remote calls
//! - [`freshservice`]: Per-resource output models and envelope transformations
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use freshservice_core::freshservice::departments::transform_department_lookup;
//! use freshservice_core::error::ApiError;
//!
//! let not_found = ApiError::from_status(404, "https://acme.freshservice.com/api/v2/departments/9999", "");
//! let envelope = transform_department_lookup(9999, Err(not_found));
//!
//! // A 404 on a lookup is a regular "not found" result, not an error.
//! assert!(!envelope.is_error());
//! ```

pub mod content;
pub mod envelope;
pub mod error;
pub mod freshservice;
pub mod pagination;
pub mod query;
pub mod resource;
pub mod validation;
