//! HTTP API
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `middleware`: per-request ledger preparation
//! - `modules`: handlers and DTOs per resource
//! - `router`: route table and OpenAPI document

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};
