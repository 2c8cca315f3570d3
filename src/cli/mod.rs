//! CLI module
//!
//! Command-line host for the provider. It owns the state file, computes
//! plans and invokes resource lifecycle callbacks, the way an
//! infrastructure-as-code orchestrator would.
//!
//! # Commands
//!
//! - `schema` - Print resource schemas
//! - `plan` - Diff a desired configuration against recorded state
//! - `apply` - Plan, then create, update or replace the resource
//! - `refresh` - Re-read a managed resource from GitLab
//! - `show` - Print a managed resource, sensitive values redacted
//! - `import` - Adopt an existing variable by `project:key`
//! - `destroy` - Delete a managed resource

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
