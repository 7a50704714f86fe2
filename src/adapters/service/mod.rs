//! Data-warehouse import service adapter
//!
//! The `DatasetService` trait defines the two calls an export needs (submit
//! and status query); [`HttpDatasetService`] implements them over HTTP and
//! [`ServiceClient`] builds one from configuration.

pub mod client;
pub mod http;
pub mod models;
mod r#trait;

pub use client::ServiceClient;
pub use http::HttpDatasetService;
pub use models::{StatusReport, StatusResponse, SubmitResponse};
pub use r#trait::DatasetService;

#[cfg(test)]
pub(crate) mod scripted;
