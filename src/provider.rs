//! Provider registry
//!
//! Maps resource type names to their lifecycle implementations so a host
//! can dispatch by the type recorded in configuration or state.

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::gitlab::{
    CreateVariableOptions, GitLabClient, ProjectVariable, UpdateVariableOptions, VariablesApi,
};
use crate::resource::{ProjectVariableResource, Resource};
use crate::schema::ResourceSchema;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Client used before credentials are known; every call fails.
struct Unconfigured;

#[async_trait]
impl VariablesApi for Unconfigured {
    async fn create_variable(
        &self,
        _project: &str,
        _options: &CreateVariableOptions,
    ) -> Result<ProjectVariable> {
        Err(Error::missing_config_field("token"))
    }

    async fn list_variables(&self, _project: &str) -> Result<Vec<ProjectVariable>> {
        Err(Error::missing_config_field("token"))
    }

    async fn update_variable(
        &self,
        _project: &str,
        _key: &str,
        _options: &UpdateVariableOptions,
    ) -> Result<ProjectVariable> {
        Err(Error::missing_config_field("token"))
    }

    async fn remove_variable(&self, _project: &str, _key: &str) -> Result<()> {
        Err(Error::missing_config_field("token"))
    }
}

/// Registered resource types sharing one API client
pub struct Provider {
    resources: BTreeMap<&'static str, Arc<dyn Resource>>,
}

impl Provider {
    /// Build a provider talking to the GitLab instance in `config`
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = GitLabClient::new(config)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Build a provider for offline work (schemas, plans) with no credentials
    pub fn unconfigured() -> Self {
        Self::with_client(Arc::new(Unconfigured))
    }

    /// Build a provider on top of any variables API implementation
    pub fn with_client(client: Arc<dyn VariablesApi>) -> Self {
        let mut provider = Self {
            resources: BTreeMap::new(),
        };
        provider.register(Arc::new(ProjectVariableResource::new(client)));
        provider
    }

    /// Add or replace a resource type
    pub fn register(&mut self, resource: Arc<dyn Resource>) {
        self.resources.insert(resource.type_name(), resource);
    }

    /// Look up a resource type
    pub fn resource(&self, resource_type: &str) -> Result<Arc<dyn Resource>> {
        self.resources
            .get(resource_type)
            .cloned()
            .ok_or_else(|| Error::UnknownResource {
                resource_type: resource_type.to_string(),
            })
    }

    /// Registered type names
    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    /// Schemas of every registered type
    pub fn schemas(&self) -> BTreeMap<&'static str, ResourceSchema> {
        self.resources
            .iter()
            .map(|(name, r)| (*name, r.schema().clone()))
            .collect()
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::PROJECT_VARIABLE;

    fn provider() -> Provider {
        let config = ProviderConfig {
            token: Some("glpat-test".to_string()),
            ..Default::default()
        };
        Provider::new(&config).unwrap()
    }

    #[test]
    fn test_registers_project_variable() {
        let provider = provider();
        let types: Vec<_> = provider.resource_types().collect();
        assert_eq!(types, vec![PROJECT_VARIABLE]);
        assert!(provider.resource(PROJECT_VARIABLE).is_ok());
    }

    #[test]
    fn test_unknown_resource_type() {
        let result = provider().resource("gitlab_group_variable");
        assert!(matches!(result, Err(Error::UnknownResource { .. })));
    }

    #[test]
    fn test_new_requires_token() {
        let err = Provider::new(&ProviderConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[tokio::test]
    async fn test_unconfigured_fails_on_remote_calls() {
        let provider = Provider::unconfigured();
        let resource = provider.resource(PROJECT_VARIABLE).unwrap();

        let mut data = crate::state::ResourceData::with_id("7:A");
        let err = resource.read(&mut data).await.unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_schemas() {
        let schemas = provider().schemas();
        let schema = &schemas[PROJECT_VARIABLE];
        assert!(schema.is_sensitive("value"));
    }
}
