//! HTTP client module
//!
//! Thin wrapper over `reqwest` used by the GitLab client.
//!
//! # Features
//!
//! - **Base URL joining**: Relative paths resolve against the configured API root
//! - **Default headers**: Authentication and user agent applied to every request
//! - **Status mapping**: Non-2xx responses become [`crate::Error::HttpStatus`]
//!
//! Requests are sent exactly once. Failures surface to the caller unchanged.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
