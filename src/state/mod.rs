//! State management module
//!
//! Holds the per-resource attribute container handed to lifecycle callbacks
//! and the file-backed store the CLI host keeps between runs.
//!
//! # Overview
//!
//! - `ResourceData` - ID plus typed attribute accessors
//! - `State` / `ResourceRecord` - Serialized state file layout
//! - `StateManager` - File-based state persistence

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{ResourceData, ResourceRecord, State};

pub(crate) use types::json_kind;

#[cfg(test)]
mod manager_tests;
