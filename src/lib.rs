// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # GitLab Variable Provider
//!
//! Declarative management of GitLab project CI/CD variables, shaped as a
//! resource for an infrastructure-as-code host.
//!
//! ## Features
//!
//! - **Lifecycle callbacks**: create, read, update, delete and import for
//!   `gitlab_project_variable`
//! - **Schema**: required/optional attributes, defaults, validators, force-new
//!   and sensitive flags
//! - **Plans**: diff desired against recorded state, replacing on identity
//!   changes
//! - **State**: JSON state file with atomic writes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gitlab_variable_provider::{Provider, ProviderConfig, Resource, ResourceData, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ProviderConfig::default().with_env();
//!     let provider = Provider::new(&config)?;
//!     let resource = provider.resource("gitlab_project_variable")?;
//!
//!     let mut data = ResourceData::new();
//!     data.set("project", "group/app");
//!     data.set("key", "DB_URL");
//!     data.set("value", "postgres://db");
//!     resource.create(&mut data).await?;
//!
//!     assert_eq!(data.id(), Some("group/app:DB_URL"));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Host (CLI: plan / apply / ...)               │
//! │        StateManager        plan(schema, prior, desired)      │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ Resource trait
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │                ProjectVariableResource                       │
//! │   ResourceSchema   VariableId   create/read/update/delete    │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ VariablesApi
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │           GitLabClient  ->  HttpClient (reqwest)             │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Provider configuration
pub mod config;

/// HTTP client
pub mod http;

/// GitLab project variables API
pub mod gitlab;

/// Resource schemas and attribute validation
pub mod schema;

/// Resource state and persistence
pub mod state;

/// Resource lifecycle and planning
pub mod resource;

/// Resource registry
pub mod provider;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ProviderConfig;
pub use provider::Provider;
pub use resource::{Resource, VariableId, PROJECT_VARIABLE};
pub use state::ResourceData;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
