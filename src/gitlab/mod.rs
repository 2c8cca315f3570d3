//! GitLab API client for project CI/CD variables.
//!
//! # Module Structure
//!
//! - [`types`] - Request and response payloads
//! - [`client`] - The [`VariablesApi`] seam and its REST implementation
//!
//! The resource handler only depends on [`VariablesApi`]; [`GitLabClient`]
//! is the implementation used against a real GitLab instance.

mod client;
mod types;

pub use client::{GitLabClient, VariablesApi};
pub use types::{CreateVariableOptions, ProjectVariable, UpdateVariableOptions};
