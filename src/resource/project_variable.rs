//! `gitlab_project_variable` resource

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::id::VariableId;
use super::Resource;
use crate::error::{Error, Result};
use crate::gitlab::{CreateVariableOptions, ProjectVariable, UpdateVariableOptions, VariablesApi};
use crate::schema::{validate_variable_name, validate_variable_type, Attribute, ResourceSchema};
use crate::state::ResourceData;
use crate::types::VariableType;

/// Registered type name
pub const PROJECT_VARIABLE: &str = "gitlab_project_variable";

/// Desired attribute values read out of state
struct DesiredVariable {
    project: String,
    key: String,
    value: String,
    variable_type: VariableType,
    protected: bool,
    masked: bool,
    environment_scope: String,
}

impl DesiredVariable {
    fn from_data(data: &ResourceData) -> Result<Self> {
        let variable_type = match data.get_string("variable_type")? {
            s if s.is_empty() => VariableType::default(),
            s => s.parse()?,
        };

        Ok(Self {
            project: data.get_string("project")?,
            key: data.get_string("key")?,
            value: data.get_string("value")?,
            variable_type,
            protected: data.get_bool("protected")?,
            masked: data.get_bool("masked")?,
            environment_scope: data.get_string("environment_scope")?,
        })
    }

    fn create_options(&self) -> CreateVariableOptions {
        CreateVariableOptions {
            key: self.key.clone(),
            value: self.value.clone(),
            variable_type: self.variable_type,
            protected: self.protected,
            masked: self.masked,
            environment_scope: self.environment_scope.clone(),
        }
    }

    fn update_options(&self) -> UpdateVariableOptions {
        UpdateVariableOptions {
            value: self.value.clone(),
            variable_type: self.variable_type,
            protected: self.protected,
            masked: self.masked,
            environment_scope: self.environment_scope.clone(),
        }
    }
}

/// Manages one project-level CI/CD variable
pub struct ProjectVariableResource {
    client: Arc<dyn VariablesApi>,
    schema: ResourceSchema,
}

impl ProjectVariableResource {
    pub fn new(client: Arc<dyn VariablesApi>) -> Self {
        Self {
            client,
            schema: Self::build_schema(),
        }
    }

    /// Attribute declarations for `gitlab_project_variable`
    pub fn build_schema() -> ResourceSchema {
        ResourceSchema::v0()
            .with_attribute(
                "project",
                Attribute::required_string()
                    .force_new()
                    .with_description("ID or full path of the project"),
            )
            .with_attribute(
                "key",
                Attribute::required_string()
                    .force_new()
                    .with_validator(validate_variable_name)
                    .with_description("Name of the variable"),
            )
            .with_attribute(
                "value",
                Attribute::required_string()
                    .sensitive()
                    .with_description("Value of the variable"),
            )
            .with_attribute(
                "variable_type",
                Attribute::optional_string()
                    .with_default(VariableType::EnvVar.as_str())
                    .with_validator(validate_variable_type)
                    .with_description("Either env_var or file"),
            )
            .with_attribute("protected", Attribute::optional_bool().with_default(false))
            .with_attribute("masked", Attribute::optional_bool().with_default(false))
            .with_attribute(
                "environment_scope",
                Attribute::optional_string()
                    .with_description("Environment the variable is available in"),
            )
    }

    fn identity(data: &ResourceData) -> Result<VariableId> {
        let id = data
            .id()
            .ok_or_else(|| Error::invalid_id("", "project:key"))?;
        VariableId::parse(id)
    }

    fn apply_remote(data: &mut ResourceData, project: &str, variable: &ProjectVariable) {
        data.set("key", variable.key.clone());
        data.set("value", variable.value.clone());
        data.set("variable_type", variable.variable_type.as_str());
        data.set("project", project);
        data.set("protected", variable.protected);
        data.set("masked", variable.masked);
        data.set("environment_scope", variable.environment_scope.clone());
    }

    /// Validate desired state after filling defaults
    fn desired(&self, data: &mut ResourceData) -> Result<DesiredVariable> {
        self.schema.apply_defaults(data);
        self.schema.validate(data)?;
        DesiredVariable::from_data(data)
    }
}

/// First variable matching key and scope. GitLab does not guarantee the
/// pair is unique, so list order decides ties.
pub(crate) fn find_variable<'a>(
    variables: &'a [ProjectVariable],
    key: &str,
    scope: &str,
) -> Option<&'a ProjectVariable> {
    variables.iter().find(|v| v.matches(key, scope))
}

#[async_trait]
impl Resource for ProjectVariableResource {
    fn type_name(&self) -> &'static str {
        PROJECT_VARIABLE
    }

    fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    async fn create(&self, data: &mut ResourceData) -> Result<()> {
        let desired = self.desired(data)?;
        let id = VariableId::new(&desired.project, &desired.key)?;

        debug!(project = %id.project, key = %id.key, "create gitlab project variable");
        self.client
            .create_variable(&desired.project, &desired.create_options())
            .await?;

        data.set_id(id.to_string());
        self.read(data).await
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        let id = Self::identity(data)?;
        let scope = data.get_string("environment_scope")?;

        debug!(project = %id.project, key = %id.key, scope = %scope, "read gitlab project variable");
        let variables = self.client.list_variables(&id.project).await?;

        let variable = find_variable(&variables, &id.key, &scope)
            .ok_or_else(|| Error::variable_not_found(&id.project, &id.key, &scope))?;

        Self::apply_remote(data, &id.project, variable);
        Ok(())
    }

    async fn update(&self, data: &mut ResourceData) -> Result<()> {
        let desired = self.desired(data)?;
        let id = Self::identity(data)?;

        // Addressed by project and key only; GitLab picks among same-key scopes.
        debug!(project = %id.project, key = %id.key, "update gitlab project variable");
        self.client
            .update_variable(&id.project, &id.key, &desired.update_options())
            .await?;

        self.read(data).await
    }

    async fn delete(&self, data: &ResourceData) -> Result<()> {
        let id = Self::identity(data)?;

        debug!(project = %id.project, key = %id.key, "delete gitlab project variable");
        self.client.remove_variable(&id.project, &id.key).await
    }
}
