//! State manager implementation
//!
//! Provides file-based state persistence with atomic writes.

use super::types::{ResourceData, ResourceRecord, State};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// State manager for persisting and loading managed resources
#[derive(Debug)]
pub struct StateManager {
    /// Path to the state file
    path: PathBuf,
    /// Current state (cached)
    state: Arc<RwLock<State>>,
    /// Whether to auto-save on every update
    auto_save: bool,
}

impl StateManager {
    /// Create a new state manager with the given path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            state: Arc::new(RwLock::new(State::new())),
            auto_save: true,
        }
    }

    /// Create an in-memory state manager (no file persistence)
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            state: Arc::new(RwLock::new(State::new())),
            auto_save: false,
        }
    }

    /// Create a state manager from a file, loading existing state if present
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::state(format!("Failed to read state file: {e}")))?;
            serde_json::from_str(&contents)
                .map_err(|e| Error::state(format!("Failed to parse state file: {e}")))?
        } else {
            State::new()
        };

        Ok(Self {
            path,
            state: Arc::new(RwLock::new(state)),
            auto_save: true,
        })
    }

    /// Save current state to file
    pub async fn save(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        let state = self.state.read().await;
        let contents = serde_json::to_string_pretty(&*state)
            .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::state(format!("Failed to write state file: {e}")))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::state(format!("Failed to rename state file: {e}")))?;

        Ok(())
    }

    /// Get a managed resource by name
    pub async fn get(&self, name: &str) -> Option<ResourceRecord> {
        let state = self.state.read().await;
        state.get(name).cloned()
    }

    /// Record the observed state of a resource
    pub async fn put(
        &self,
        name: &str,
        resource_type: impl Into<String>,
        data: ResourceData,
    ) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.resources.insert(
                name.to_string(),
                ResourceRecord {
                    resource_type: resource_type.into(),
                    data,
                },
            );
        }

        if self.auto_save {
            self.save().await?;
        }

        Ok(())
    }

    /// Drop a resource from tracked state
    pub async fn remove(&self, name: &str) -> Result<Option<ResourceRecord>> {
        let removed = {
            let mut state = self.state.write().await;
            state.resources.remove(name)
        };

        if self.auto_save {
            self.save().await?;
        }

        Ok(removed)
    }

    /// Names of all managed resources
    pub async fn names(&self) -> Vec<String> {
        let state = self.state.read().await;
        state.resources.keys().cloned().collect()
    }

    /// Export state as pretty-printed JSON string
    pub async fn to_json_pretty(&self) -> Result<String> {
        let state = self.state.read().await;
        serde_json::to_string_pretty(&*state)
            .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))
    }

    /// Get the state file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}
